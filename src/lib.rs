//! ufcities - Brazilian state and city picker
//!
//! A terminal UI that loads the list of Brazilian states from the IBGE
//! localities API, lets the user pick one, and lists its cities with their
//! micro-regions.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
pub mod config;

pub use domain::*;
pub use application::*;
