//! Asset snapshots module - domain models, services, and traits.
//!
//! Persistence is not implemented here: hosts provide an
//! [`AssetSnapshotRepositoryTrait`] backed by their store of choice.

mod snapshots_model;
mod snapshots_service;
mod snapshots_traits;

pub use snapshots_model::{AssetSnapshot, AssetSnapshotUpdate, NewAssetSnapshot, SnapshotValues};
pub use snapshots_service::AssetSnapshotService;
pub use snapshots_traits::{AssetSnapshotRepositoryTrait, AssetSnapshotServiceTrait};
