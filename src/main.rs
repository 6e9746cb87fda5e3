use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use guest_server::config::{AppState, Config};
use guest_server::logger;
use guest_server::server::{self, SignalHandler};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // Size the Tokio runtime from the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    let state = Arc::new(AppState::new(&cfg));
    let active_connections = Arc::new(AtomicUsize::new(0));

    let signals = Arc::new(SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&listener.local_addr()?, &cfg, state.routes.len());

    server::start_server_loop(
        listener,
        state,
        Arc::clone(&active_connections),
        Arc::clone(&signals.shutdown),
    )
    .await;

    let timeout = Duration::from_secs(cfg.performance.shutdown_timeout);
    server::drain_connections(&active_connections, timeout).await;
    Ok(())
}
