// ABOUTME: Database factory and provider abstraction for multi-database support
// ABOUTME: Provides unified interface for SQLite and PostgreSQL with runtime database selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

//! Database factory for creating database providers
//!
//! This module provides automatic database type detection and creation
//! based on connection strings.

use super::sqlite::SqliteDatabase;
use super::DatabaseProvider;
use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::errors::AppResult;
use crate::models::{CreateProjectionInput, SavedProjection, UpdateProjectionInput};
use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

#[cfg(feature = "postgresql")]
use super::postgres::PostgresDatabase;
#[cfg(not(feature = "postgresql"))]
use crate::errors::DatabaseError;

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// Embedded `SQLite` (file or in-memory)
    SQLite,
    /// `PostgreSQL` server
    PostgreSQL,
}

/// Database instance wrapper that delegates to the appropriate implementation
#[derive(Clone)]
pub enum Database {
    /// `SQLite` backend
    SQLite(SqliteDatabase),
    /// `PostgreSQL` backend
    #[cfg(feature = "postgresql")]
    PostgreSQL(PostgresDatabase),
}

impl Database {
    /// Get a descriptive string for the current database backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::SQLite(_) => "SQLite (Local Development)",
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(_) => "PostgreSQL (Cloud-Ready)",
        }
    }

    /// Get the database type enum
    #[must_use]
    pub const fn database_type(&self) -> DatabaseType {
        match self {
            Self::SQLite(_) => DatabaseType::SQLite,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(_) => DatabaseType::PostgreSQL,
        }
    }

    /// Connect to the configured database and, if `auto_migrate` is set,
    /// bootstrap the schema
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `PostgreSQL` feature is not enabled when a `PostgreSQL` URL is provided
    /// - Database connection fails
    /// - Schema bootstrap fails
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let db = <Self as DatabaseProvider>::new(config).await?;
        if config.auto_migrate {
            db.migrate().await?;
        }
        Ok(db)
    }

    /// In-memory `SQLite` database with the schema in place
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be opened or migration fails
    pub async fn in_memory() -> AppResult<Self> {
        Self::connect(&DatabaseConfig::default()).await
    }
}

/// Automatically detect database type from a parsed URL
///
/// # Errors
///
/// Returns an error if a `PostgreSQL` URL is provided but the `postgresql`
/// feature is not enabled
pub fn detect_database_type(url: &DatabaseUrl) -> AppResult<DatabaseType> {
    match url {
        DatabaseUrl::SQLite { .. } | DatabaseUrl::Memory => Ok(DatabaseType::SQLite),
        DatabaseUrl::PostgreSQL { .. } => {
            #[cfg(feature = "postgresql")]
            return Ok(DatabaseType::PostgreSQL);

            #[cfg(not(feature = "postgresql"))]
            return Err(DatabaseError::UnsupportedBackend {
                backend: "PostgreSQL connection string detected, but PostgreSQL support is not \
                          enabled. Enable the 'postgresql' feature flag"
                    .to_owned(),
            }
            .into());
        }
    }
}

// Implement DatabaseProvider for the enum by delegating to the appropriate implementation
#[async_trait]
impl DatabaseProvider for Database {
    async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let db_type = detect_database_type(&config.url)?;
        info!("Detected database type: {:?}", db_type);

        match db_type {
            DatabaseType::SQLite => {
                debug!("Initializing SQLite database");
                let db = SqliteDatabase::new(config).await?;
                info!("SQLite database initialized successfully");
                Ok(Self::SQLite(db))
            }
            #[cfg(feature = "postgresql")]
            DatabaseType::PostgreSQL => {
                debug!("Initializing PostgreSQL database");
                let db = PostgresDatabase::new(config).await?;
                info!("PostgreSQL database initialized successfully");
                Ok(Self::PostgreSQL(db))
            }
            #[cfg(not(feature = "postgresql"))]
            DatabaseType::PostgreSQL => Err(DatabaseError::UnsupportedBackend {
                backend: "postgresql".to_owned(),
            }
            .into()),
        }
    }

    async fn migrate(&self) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.migrate().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.migrate().await,
        }
    }

    async fn list_projections(
        &self,
        user_id: Uuid,
        favorites_only: bool,
    ) -> AppResult<Vec<SavedProjection>> {
        match self {
            Self::SQLite(db) => db.list_projections(user_id, favorites_only).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.list_projections(user_id, favorites_only).await,
        }
    }

    async fn get_projection(&self, projection_id: Uuid) -> AppResult<Option<SavedProjection>> {
        match self {
            Self::SQLite(db) => db.get_projection(projection_id).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_projection(projection_id).await,
        }
    }

    async fn create_projection(
        &self,
        user_id: Uuid,
        input: &CreateProjectionInput,
    ) -> AppResult<SavedProjection> {
        match self {
            Self::SQLite(db) => db.create_projection(user_id, input).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.create_projection(user_id, input).await,
        }
    }

    async fn update_projection(
        &self,
        projection_id: Uuid,
        input: &UpdateProjectionInput,
    ) -> AppResult<SavedProjection> {
        match self {
            Self::SQLite(db) => db.update_projection(projection_id, input).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.update_projection(projection_id, input).await,
        }
    }

    async fn set_projection_favorite(
        &self,
        projection_id: Uuid,
        is_favorite: bool,
    ) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.set_projection_favorite(projection_id, is_favorite).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.set_projection_favorite(projection_id, is_favorite).await,
        }
    }

    async fn delete_projection(&self, projection_id: Uuid) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.delete_projection(projection_id).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.delete_projection(projection_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_sqlite() {
        assert_eq!(
            detect_database_type(&DatabaseUrl::Memory).ok(),
            Some(DatabaseType::SQLite)
        );
    }

    #[cfg(not(feature = "postgresql"))]
    #[test]
    fn test_detect_postgres_without_feature() {
        let url = DatabaseUrl::PostgreSQL {
            connection_string: "postgres://localhost/twinforge".to_owned(),
        };
        assert!(detect_database_type(&url).is_err());
    }
}
