//! Snapshot returns module.
//!
//! Turns an irregular series of portfolio snapshots into monthly, quarterly
//! and annual returns plus withdrawal rates. The engine is a pure function
//! over its input; [`ReturnsService`] wires it to the snapshot store.

mod quarterly;
mod returns_calculator;
mod returns_model;
mod returns_service;
mod returns_traits;

pub use quarterly::summarize_by_quarter;
pub use returns_calculator::{
    calculate_report, calculate_returns, calculate_returns_with_settings, sort_snapshots,
};
pub use returns_model::*;
pub use returns_service::ReturnsService;
pub use returns_traits::ReturnsServiceTrait;
