// ABOUTME: Persistence layer for saved body projections
// ABOUTME: SQLite query manager plus the repository trait and its implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

//! # Database Management
//!
//! Saved projections live in a single `body_projections` table. The
//! [`repositories::ProjectionRepository`] trait is the only surface the rest
//! of the crate uses; backends are selected at runtime through
//! [`crate::database_plugins::factory::Database`].

/// `SQLite` queries for the `body_projections` table
pub mod projections;

/// Repository trait and implementation
pub mod repositories;

pub use crate::errors::DatabaseError;
pub use projections::ProjectionsManager;
pub use repositories::{ProjectionRepository, ProjectionRepositoryImpl};
