pub mod models;
pub mod collation;
pub mod errors;

pub use models::*;
pub use collation::*;
pub use errors::*;
