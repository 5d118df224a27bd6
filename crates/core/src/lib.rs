//! Nestegg Core - snapshot tracking and period return analysis.
//!
//! This crate holds the domain logic behind the asset snapshot tools: the
//! snapshot models and management service, and the returns engine that turns
//! a snapshot series into monthly, quarterly and annual figures. It is
//! storage-agnostic and defines the repository trait hosts implement.

pub mod constants;
pub mod errors;
pub mod returns;
pub mod snapshots;
pub mod utils;

pub use returns::*;
pub use snapshots::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
