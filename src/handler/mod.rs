//! Request handler module
//!
//! Responsible for request routing dispatch and the guest resource handlers.

pub mod guests;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
