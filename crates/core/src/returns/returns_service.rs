use std::sync::Arc;

use log::debug;

use super::returns_calculator::calculate_report;
use super::returns_model::{ReturnResult, ReturnsReport, ReturnsSettings, Snapshot};
use super::returns_traits::ReturnsServiceTrait;
use crate::errors::Result;
use crate::snapshots::AssetSnapshotRepositoryTrait;

/// Loads a user's snapshots from the store and runs the returns engine on them.
pub struct ReturnsService {
    snapshot_repository: Arc<dyn AssetSnapshotRepositoryTrait>,
    settings: ReturnsSettings,
}

impl ReturnsService {
    pub fn new(snapshot_repository: Arc<dyn AssetSnapshotRepositoryTrait>) -> Self {
        Self {
            snapshot_repository,
            settings: ReturnsSettings::default(),
        }
    }

    /// Replaces the engine settings used by this service.
    pub fn with_settings(mut self, settings: ReturnsSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ReturnsSettings {
        &self.settings
    }

    fn load_snapshots(&self, user_id: &str) -> Result<Vec<Snapshot>> {
        let stored = self.snapshot_repository.list_by_user(user_id)?;
        debug!("Loaded {} snapshot(s) for user {}", stored.len(), user_id);
        Ok(stored.iter().map(Snapshot::from).collect())
    }
}

impl ReturnsServiceTrait for ReturnsService {
    fn get_returns(&self, user_id: &str) -> Result<Vec<ReturnResult>> {
        Ok(self.get_returns_report(user_id)?.results)
    }

    fn get_returns_report(&self, user_id: &str) -> Result<ReturnsReport> {
        let snapshots = self.load_snapshots(user_id)?;
        Ok(calculate_report(&snapshots, &self.settings))
    }
}
