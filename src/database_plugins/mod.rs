// ABOUTME: Database abstraction layer for TwinForge Fit
// ABOUTME: Plugin architecture for database support with SQLite and PostgreSQL backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

use crate::config::DatabaseConfig;
use crate::errors::AppResult;
use crate::models::{CreateProjectionInput, SavedProjection, UpdateProjectionInput};
use async_trait::async_trait;
use uuid::Uuid;

pub mod factory;
pub mod sqlite;

#[cfg(feature = "postgresql")]
pub mod postgres;

/// Core database abstraction trait
///
/// All database implementations must implement this trait to provide
/// a consistent interface for the repository layer. Each method runs a
/// single statement; there are no transactions or retries.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Connect using the given configuration
    async fn new(config: &DatabaseConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Run database migrations to set up schema
    async fn migrate(&self) -> AppResult<()>;

    // ================================
    // Saved Projections
    // ================================

    /// Projections owned by `user_id`, newest first, optionally favorites only
    async fn list_projections(
        &self,
        user_id: Uuid,
        favorites_only: bool,
    ) -> AppResult<Vec<SavedProjection>>;

    /// Projection by id
    async fn get_projection(&self, projection_id: Uuid) -> AppResult<Option<SavedProjection>>;

    /// Insert a projection for `user_id`
    async fn create_projection(
        &self,
        user_id: Uuid,
        input: &CreateProjectionInput,
    ) -> AppResult<SavedProjection>;

    /// Apply a partial update
    async fn update_projection(
        &self,
        projection_id: Uuid,
        input: &UpdateProjectionInput,
    ) -> AppResult<SavedProjection>;

    /// Set the favorite flag
    async fn set_projection_favorite(&self, projection_id: Uuid, is_favorite: bool)
        -> AppResult<()>;

    /// Hard delete
    async fn delete_projection(&self, projection_id: Uuid) -> AppResult<()>;
}
