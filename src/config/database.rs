// ABOUTME: Database configuration types for SQLite and PostgreSQL connections
// ABOUTME: Parses DATABASE_URL and pool settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

use crate::constants::service::DEFAULT_DATABASE_URL;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Type-safe database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// `PostgreSQL` connection
    PostgreSQL {
        /// `PostgreSQL` connection string
        connection_string: String,
    },
    /// In-memory `SQLite`
    #[default]
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::config("DATABASE_URL must not be empty"));
        }
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.starts_with("postgresql://") || s.starts_with("postgres://") {
            Ok(Self::PostgreSQL {
                connection_string: s.to_owned(),
            })
        } else {
            // Bare paths are SQLite files
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::PostgreSQL { connection_string } => connection_string.clone(),
            Self::Memory => DEFAULT_DATABASE_URL.into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }

    /// Check if this is a `SQLite` database
    #[must_use]
    pub const fn is_sqlite(&self) -> bool {
        matches!(self, Self::SQLite { .. } | Self::Memory)
    }

    /// Check if this is a `PostgreSQL` database
    #[must_use]
    pub const fn is_postgresql(&self) -> bool {
        matches!(self, Self::PostgreSQL { .. })
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database connection and management configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (`SQLite` path or `PostgreSQL` connection string)
    pub url: DatabaseUrl,
    /// Create the projections schema on startup
    pub auto_migrate: bool,
    /// `PostgreSQL` connection pool configuration
    pub postgres_pool: PostgresPoolConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            auto_migrate: true,
            postgres_pool: PostgresPoolConfig::default(),
        }
    }
}

impl DatabaseConfig {
    /// Load database configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` or `AUTO_MIGRATE` is invalid
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL))?,
            auto_migrate: env_var_or("AUTO_MIGRATE", "true")
                .parse()
                .map_err(|e| AppError::config(format!("Invalid AUTO_MIGRATE value: {e}")))?,
            postgres_pool: PostgresPoolConfig::from_env(),
        })
    }

    /// Configuration pointing at an explicit URL, other settings from defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn for_url(url: &str) -> AppResult<Self> {
        Ok(Self {
            url: DatabaseUrl::parse_url(url)?,
            ..Self::default()
        })
    }
}

/// `PostgreSQL` connection pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresPoolConfig {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections in the pool
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,
}

impl Default for PostgresPoolConfig {
    fn default() -> Self {
        let is_ci = env::var("CI").is_ok();
        Self {
            max_connections: if is_ci { 3 } else { 10 },
            min_connections: if is_ci { 1 } else { 2 },
            acquire_timeout_secs: if is_ci { 20 } else { 30 },
        }
    }
}

impl PostgresPoolConfig {
    /// Load `PostgreSQL` pool configuration from environment (or defaults)
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_connections: env::var("POSTGRES_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            min_connections: env::var("POSTGRES_MIN_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_connections),
            acquire_timeout_secs: env::var("POSTGRES_ACQUIRE_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.acquire_timeout_secs),
        }
    }
}

/// Get environment variable or default value
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_url() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").ok(),
            Some(DatabaseUrl::Memory)
        );
    }

    #[test]
    fn test_parse_sqlite_file_url() {
        let url = DatabaseUrl::parse_url("sqlite:./data/projections.db").ok();
        assert_eq!(
            url,
            Some(DatabaseUrl::SQLite {
                path: PathBuf::from("./data/projections.db")
            })
        );
        assert!(url.is_some_and(|u| u.is_sqlite()));
    }

    #[test]
    fn test_parse_postgres_url() {
        let url = DatabaseUrl::parse_url("postgres://user:pw@localhost/twinforge").ok();
        assert!(url.as_ref().is_some_and(DatabaseUrl::is_postgresql));
        assert_eq!(
            url.map(|u| u.to_connection_string()).as_deref(),
            Some("postgres://user:pw@localhost/twinforge")
        );
    }

    #[test]
    fn test_parse_bare_path_is_sqlite() {
        let url = DatabaseUrl::parse_url("projections.db").ok();
        assert_eq!(
            url,
            Some(DatabaseUrl::SQLite {
                path: PathBuf::from("projections.db")
            })
        );
    }

    #[test]
    fn test_parse_empty_url_rejected() {
        assert!(DatabaseUrl::parse_url("  ").is_err());
    }
}
