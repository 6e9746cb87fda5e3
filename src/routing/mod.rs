//! Routing module
//!
//! Provides the fixed route table consulted for every request.

mod table;

pub use table::{RouteHandler, RouteTable};
