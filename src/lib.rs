// ABOUTME: Main library entry point for the TwinForge Fit projection subsystem
// ABOUTME: Wires configuration, logging, persistence, caching, and projection services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

#![deny(unsafe_code)]

//! # TwinForge Fit
//!
//! Body morphology projections and saved-projection persistence.
//!
//! ## Architecture
//!
//! - **Intelligence**: the pure [`intelligence::ProjectionCalculator`] and range lookup
//! - **Database**: [`database::ProjectionRepository`] over `SQLite` or `PostgreSQL`
//! - **Cache**: optimistic per-user projection lists
//! - **Services**: preview and save orchestration
//! - **Config**: environment-driven settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use twinforge_fit::config::ServerConfig;
//! use twinforge_fit::database::ProjectionRepositoryImpl;
//! use twinforge_fit::database_plugins::factory::Database;
//! use twinforge_fit::errors::AppResult;
//! use twinforge_fit::intelligence::{ProjectionCalculator, StaticMorphologyRanges};
//! use twinforge_fit::models::{BodyState, Gender, ProjectionDuration, ProjectionParams};
//! use twinforge_fit::services::ProjectionService;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let db = Database::connect(&config.database).await?;
//!     let service = ProjectionService::new(
//!         ProjectionCalculator::new(StaticMorphologyRanges::with_defaults()),
//!         Arc::new(ProjectionRepositoryImpl::new(db)),
//!     );
//!
//!     let params = ProjectionParams::new(4, 4, ProjectionDuration::SixMonths);
//!     let result = service.preview(&BodyState::new(0.8, 0.2), Gender::Female, &params);
//!     println!("fat {} muscle {}", result.fat_proxy, result.muscle_proxy);
//!     Ok(())
//! }
//! ```

/// Optimistic client-side projection list cache
pub mod cache;

/// Environment-driven configuration
pub mod config;

/// Saved-projection storage: manager, repository trait, implementation
pub mod database;

/// Backend selection and the `DatabaseProvider` abstraction
pub mod database_plugins;

/// Unified error types
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Projection use cases
pub mod services;

/// Application constants
pub use twinforge_core::constants;

/// Shared data models
pub use twinforge_core::models;

/// Projection calculator and morphology ranges
pub use twinforge_intelligence as intelligence;
