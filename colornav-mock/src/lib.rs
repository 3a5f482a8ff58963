//! ColorNavigator mock server
//!
//! In-memory stand-in for the ColorNavigator API. It serves the same paths,
//! status codes and error payloads so the client can be exercised without a
//! calibrated monitor attached.

mod handlers;
mod routes;
pub mod server;
pub mod state;

pub use server::{MockServer, run_mock_server};
pub use state::{MockMonitor, MockState, SharedState};
