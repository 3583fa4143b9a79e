// ABOUTME: SQLite database implementation of the DatabaseProvider trait
// ABOUTME: Owns the connection pool and delegates projection queries to ProjectionsManager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

//! `SQLite` database implementation

use std::str::FromStr;

use super::DatabaseProvider;
use crate::config::DatabaseConfig;
use crate::database::projections::ProjectionsManager;
use crate::errors::{AppResult, DatabaseError};
use crate::models::{CreateProjectionInput, SavedProjection, UpdateProjectionInput};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

/// `SQLite` database implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Underlying connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn projections(&self) -> ProjectionsManager {
        ProjectionsManager::new(self.pool.clone())
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let connection_string = config.url.to_connection_string();
        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("Invalid SQLite URL: {e}"),
            })?
            .create_if_missing(true);

        // Each in-memory connection is its own database, so keep exactly one
        let max_connections = if config.url.is_memory() { 1 } else { 5 };
        debug!(max_connections, "Opening SQLite pool");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(u32::from(config.url.is_memory()))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("Failed to open SQLite database: {e}"),
            })?;

        Ok(Self { pool })
    }

    async fn migrate(&self) -> AppResult<()> {
        self.projections().migrate().await
    }

    async fn list_projections(
        &self,
        user_id: Uuid,
        favorites_only: bool,
    ) -> AppResult<Vec<SavedProjection>> {
        self.projections()
            .list_for_user(user_id, favorites_only)
            .await
    }

    async fn get_projection(&self, projection_id: Uuid) -> AppResult<Option<SavedProjection>> {
        self.projections().get(projection_id).await
    }

    async fn create_projection(
        &self,
        user_id: Uuid,
        input: &CreateProjectionInput,
    ) -> AppResult<SavedProjection> {
        self.projections().create(user_id, input).await
    }

    async fn update_projection(
        &self,
        projection_id: Uuid,
        input: &UpdateProjectionInput,
    ) -> AppResult<SavedProjection> {
        self.projections().update(projection_id, input).await
    }

    async fn set_projection_favorite(
        &self,
        projection_id: Uuid,
        is_favorite: bool,
    ) -> AppResult<()> {
        self.projections()
            .set_favorite(projection_id, is_favorite)
            .await
    }

    async fn delete_projection(&self, projection_id: Uuid) -> AppResult<()> {
        self.projections().delete(projection_id).await
    }
}
