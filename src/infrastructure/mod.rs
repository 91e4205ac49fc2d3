//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP client for the localities API, request
//! cancellation, and log file setup.

pub mod abort;
pub mod client;
pub mod logging;

pub use abort::*;
pub use client::*;
