//! Integration tests with mock HTTP server

pub mod error_handling;
pub mod voices;
