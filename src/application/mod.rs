//! Application layer managing state and business workflows.
//!
//! This module holds the view state of the picker, the scoped loading
//! flag, and the background fetches that feed results back into it.

pub mod fetcher;
pub mod loading;
pub mod requests;
pub mod state;

pub use fetcher::*;
pub use loading::*;
pub use requests::*;
pub use state::*;
