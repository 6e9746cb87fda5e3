//! A small HTTP server answering a fixed route table: a plain-text greeting
//! and a read-only "guests" list backed by a JSON file.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
pub mod store;
