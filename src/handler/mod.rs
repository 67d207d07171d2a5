//! Request handler module
//!
//! Responsible for request routing dispatch and the scripture lookups behind each route.

mod payload;
pub mod router;
pub mod routes;
mod scripture;

// Re-export main entry point
pub use router::handle_request;
