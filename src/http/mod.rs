//! HTTP protocol layer module
//!
//! Response builders shared by the scripture routes and the health probes,
//! decoupled from corpus lookups.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_405_response, build_json_response, build_options_response, json_response,
};
