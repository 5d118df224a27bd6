use async_trait::async_trait;

use super::snapshots_model::{AssetSnapshot, AssetSnapshotUpdate, NewAssetSnapshot};
use crate::errors::Result;

/// Storage contract for asset snapshots. Every operation is scoped to the
/// owning user; implementations must never return another user's rows.
#[async_trait]
pub trait AssetSnapshotRepositoryTrait: Send + Sync {
    /// All snapshots of a user, newest first.
    fn list_by_user(&self, user_id: &str) -> Result<Vec<AssetSnapshot>>;

    fn get_by_id(&self, user_id: &str, snapshot_id: &str) -> Result<Option<AssetSnapshot>>;

    async fn create(&self, snapshot: AssetSnapshot) -> Result<AssetSnapshot>;

    async fn update(&self, snapshot: AssetSnapshot) -> Result<AssetSnapshot>;

    /// Returns the number of rows removed.
    async fn delete(&self, user_id: &str, snapshot_id: &str) -> Result<usize>;
}

/// Trait for asset snapshot service operations
#[async_trait]
pub trait AssetSnapshotServiceTrait: Send + Sync {
    fn get_snapshots(&self, user_id: &str) -> Result<Vec<AssetSnapshot>>;

    async fn create_snapshot(
        &self,
        user_id: &str,
        new_snapshot: NewAssetSnapshot,
    ) -> Result<AssetSnapshot>;

    async fn update_snapshot(
        &self,
        user_id: &str,
        snapshot_update: AssetSnapshotUpdate,
    ) -> Result<AssetSnapshot>;

    async fn delete_snapshot(&self, user_id: &str, snapshot_id: &str) -> Result<()>;
}
