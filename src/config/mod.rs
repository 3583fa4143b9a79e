// ABOUTME: Configuration management module for environment-driven settings
// ABOUTME: Database URL and pool options, deployment environment, and logging options
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

//! Configuration module for TwinForge Fit
//!
//! All settings come from environment variables; there are no config files.
//!
//! - **Environment**: `ServerConfig` and the deployment `Environment`
//! - **Database**: `DATABASE_URL` parsing and `PostgreSQL` pool sizing

/// Environment and aggregated configuration
pub mod environment;

/// Database connection configuration
pub mod database;

pub use database::{DatabaseConfig, DatabaseUrl, PostgresPoolConfig};
pub use environment::{Environment, ServerConfig};
