pub mod api;
pub mod config;
pub mod error;
pub mod ids;
pub mod types;

pub use error::{Result, SafeguardError};
pub use ids::*;
