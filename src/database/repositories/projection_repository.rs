// ABOUTME: Projection repository implementation over the runtime-selected database
// ABOUTME: Adds structured logging around each storage call and propagates errors unchanged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

use super::ProjectionRepository;
use crate::database_plugins::factory::Database;
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppResult;
use crate::models::{CreateProjectionInput, SavedProjection, UpdateProjectionInput};
use async_trait::async_trait;
use tracing::{debug, error, info};
use uuid::Uuid;

/// SQLite/PostgreSQL implementation of `ProjectionRepository`
#[derive(Clone)]
pub struct ProjectionRepositoryImpl {
    db: Database,
}

impl ProjectionRepositoryImpl {
    /// Create a new `ProjectionRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Database handle in use
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }
}

/// Log a storage failure at `error` and hand it back
fn log_failure<T>(operation: &'static str, result: AppResult<T>) -> AppResult<T> {
    if let Err(e) = &result {
        error!(operation, code = ?e.code, error = %e, "Projection storage operation failed");
    }
    result
}

#[async_trait]
impl ProjectionRepository for ProjectionRepositoryImpl {
    async fn get_user_projections(&self, user_id: Uuid) -> AppResult<Vec<SavedProjection>> {
        debug!(%user_id, "Fetching user projections");
        let projections = log_failure(
            "get_user_projections",
            self.db.list_projections(user_id, false).await,
        )?;
        info!(%user_id, count = projections.len(), "Fetched user projections");
        Ok(projections)
    }

    async fn get_favorite_projections(&self, user_id: Uuid) -> AppResult<Vec<SavedProjection>> {
        debug!(%user_id, "Fetching favorite projections");
        let projections = log_failure(
            "get_favorite_projections",
            self.db.list_projections(user_id, true).await,
        )?;
        info!(%user_id, count = projections.len(), "Fetched favorite projections");
        Ok(projections)
    }

    async fn get_projection(&self, projection_id: Uuid) -> AppResult<Option<SavedProjection>> {
        debug!(%projection_id, "Fetching projection");
        log_failure("get_projection", self.db.get_projection(projection_id).await)
    }

    async fn create_projection(
        &self,
        user_id: Uuid,
        input: CreateProjectionInput,
    ) -> AppResult<SavedProjection> {
        debug!(
            %user_id,
            name = %input.name,
            duration = %input.params.duration,
            "Creating projection"
        );
        let projection = log_failure(
            "create_projection",
            self.db.create_projection(user_id, &input).await,
        )?;
        info!(
            %user_id,
            projection_id = %projection.id,
            time_period_months = projection.time_period_months,
            "Projection created"
        );
        Ok(projection)
    }

    async fn update_projection(
        &self,
        projection_id: Uuid,
        input: UpdateProjectionInput,
    ) -> AppResult<SavedProjection> {
        debug!(
            %projection_id,
            updates_params = input.params.is_some(),
            "Updating projection"
        );
        let projection = log_failure(
            "update_projection",
            self.db.update_projection(projection_id, &input).await,
        )?;
        info!(%projection_id, "Projection updated");
        Ok(projection)
    }

    async fn toggle_favorite(&self, projection_id: Uuid, is_favorite: bool) -> AppResult<()> {
        debug!(%projection_id, is_favorite, "Setting projection favorite flag");
        log_failure(
            "toggle_favorite",
            self.db
                .set_projection_favorite(projection_id, is_favorite)
                .await,
        )?;
        info!(%projection_id, is_favorite, "Projection favorite flag updated");
        Ok(())
    }

    async fn delete_projection(&self, projection_id: Uuid) -> AppResult<()> {
        debug!(%projection_id, "Deleting projection");
        log_failure(
            "delete_projection",
            self.db.delete_projection(projection_id).await,
        )?;
        info!(%projection_id, "Projection deleted");
        Ok(())
    }
}
