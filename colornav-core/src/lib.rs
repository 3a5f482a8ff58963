//! ColorNavigator Core Library
//!
//! Shared pieces of the ColorNavigator API client: the error type, client
//! configuration and the request/response payloads of the HTTP API.

pub mod config;
pub mod error;
pub mod models;
pub mod samples;

pub use error::{Error, Result};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
