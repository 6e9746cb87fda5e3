//! HTTP protocol layer module
//!
//! Response builders shared by all route handlers.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_500_response, build_json_response, build_json_value_response,
    build_text_response,
};
