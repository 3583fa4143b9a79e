// ABOUTME: Environment-driven application configuration
// ABOUTME: Aggregates database and logging settings into ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

use super::database::{env_var_or, DatabaseConfig};
use crate::errors::AppResult;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable has an invalid value
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseConfig::from_env()?,
            logging: LoggingConfig::from_env(),
        };
        Ok(config)
    }

    /// One-line summary safe to log (no connection credentials)
    #[must_use]
    pub fn summary(&self) -> String {
        let backend = if self.database.url.is_postgresql() {
            "postgresql"
        } else if self.database.url.is_memory() {
            "sqlite (memory)"
        } else {
            "sqlite"
        };
        format!(
            "environment={} database={backend} auto_migrate={} log_level={}",
            self.environment, self.database.auto_migrate, self.logging.level
        )
    }

    /// Log the configuration summary
    pub fn log_summary(&self) {
        info!(config = %self.summary(), "Configuration loaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
    }

    #[test]
    fn test_summary_hides_connection_string() {
        let config = ServerConfig {
            environment: Environment::Production,
            database: DatabaseConfig::for_url("postgres://user:secret@db/twinforge")
                .unwrap_or_default(),
            logging: LoggingConfig::default(),
        };
        let summary = config.summary();
        assert!(summary.contains("postgresql"));
        assert!(!summary.contains("secret"));
    }
}
