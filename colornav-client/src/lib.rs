//! ColorNavigator API client
//!
//! One async method per documented endpoint. Each call sends exactly one
//! HTTP request and returns the decoded body, or an [`Error`] carrying the
//! status and message the service answered with.

mod client;
mod color_modes;
mod key_lock;
mod monitors;
mod pixel_inspection;
mod selfcalibration;
mod targets;

pub use client::ColorNavigatorClient;
pub use colornav_core::{Error, Result};
