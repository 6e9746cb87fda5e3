// Application state module
// Read-only state shared by every connection

use super::types::Config;
use crate::routing::RouteTable;
use crate::store::GuestStore;

/// Application state
///
/// Built once at startup and shared behind an `Arc`; nothing in it is
/// mutated while the server runs.
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    pub store: GuestStore,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            routes: RouteTable::from_config(&config.routes),
            store: GuestStore::new(&config.store.guests_file),
        }
    }
}
