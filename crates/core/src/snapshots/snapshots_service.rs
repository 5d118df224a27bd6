use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use super::snapshots_model::{AssetSnapshot, AssetSnapshotUpdate, NewAssetSnapshot};
use super::snapshots_traits::{AssetSnapshotRepositoryTrait, AssetSnapshotServiceTrait};
use crate::errors::{Error, Result, ValidationError};

pub struct AssetSnapshotService {
    snapshot_repository: Arc<dyn AssetSnapshotRepositoryTrait>,
}

impl AssetSnapshotService {
    pub fn new(snapshot_repository: Arc<dyn AssetSnapshotRepositoryTrait>) -> Self {
        AssetSnapshotService {
            snapshot_repository,
        }
    }

    fn ensure_user(user_id: &str) -> Result<()> {
        if user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl AssetSnapshotServiceTrait for AssetSnapshotService {
    fn get_snapshots(&self, user_id: &str) -> Result<Vec<AssetSnapshot>> {
        Self::ensure_user(user_id)?;
        self.snapshot_repository.list_by_user(user_id)
    }

    async fn create_snapshot(
        &self,
        user_id: &str,
        new_snapshot: NewAssetSnapshot,
    ) -> Result<AssetSnapshot> {
        Self::ensure_user(user_id)?;
        let values = new_snapshot.validate()?;

        let id = new_snapshot
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let now = Utc::now();

        let snapshot = AssetSnapshot {
            id,
            user_id: user_id.to_string(),
            date: values.date,
            portfolio_value: values.portfolio_value,
            contributions: values.contributions,
            withdrawals: values.withdrawals,
            note: values.note,
            created_at: Some(now),
            updated_at: Some(now),
        };

        debug!(
            "Creating snapshot {} for user {} dated {}",
            snapshot.id, user_id, snapshot.date
        );
        let created = self.snapshot_repository.create(snapshot).await?;
        info!("Recorded asset snapshot {} ({})", created.id, created.date);
        Ok(created)
    }

    async fn update_snapshot(
        &self,
        user_id: &str,
        snapshot_update: AssetSnapshotUpdate,
    ) -> Result<AssetSnapshot> {
        Self::ensure_user(user_id)?;
        let values = snapshot_update.validate()?;

        let existing = self
            .snapshot_repository
            .get_by_id(user_id, &snapshot_update.id)?
            .ok_or_else(|| {
                Error::NotFound(format!("Asset snapshot {} not found", snapshot_update.id))
            })?;

        let snapshot = AssetSnapshot {
            date: values.date,
            portfolio_value: values.portfolio_value,
            contributions: values.contributions,
            withdrawals: values.withdrawals,
            note: values.note,
            updated_at: Some(Utc::now()),
            ..existing
        };

        let updated = self.snapshot_repository.update(snapshot).await?;
        info!("Updated asset snapshot {} ({})", updated.id, updated.date);
        Ok(updated)
    }

    async fn delete_snapshot(&self, user_id: &str, snapshot_id: &str) -> Result<()> {
        Self::ensure_user(user_id)?;

        let removed = self.snapshot_repository.delete(user_id, snapshot_id).await?;
        if removed == 0 {
            return Err(Error::NotFound(format!(
                "Asset snapshot {} not found",
                snapshot_id
            )));
        }
        info!("Deleted asset snapshot {}", snapshot_id);
        Ok(())
    }
}
