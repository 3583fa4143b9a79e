// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, database, repository and projection input helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `twinforge_fit`

use std::collections::BTreeMap;
use std::sync::{Arc, Once};

use twinforge_fit::{
    constants::shape_keys::{FAT_PROXY, MUSCLE_PROXY},
    database::ProjectionRepositoryImpl,
    database_plugins::factory::Database,
    intelligence::{ProjectionCalculator, StaticMorphologyRanges},
    models::{CreateProjectionInput, ProjectionDuration, ProjectionParams},
    services::ProjectionService,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh in-memory database with the projections schema
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::in_memory().await.unwrap()
}

/// Repository over a fresh in-memory database
pub async fn create_test_repository() -> ProjectionRepositoryImpl {
    ProjectionRepositoryImpl::new(create_test_database().await)
}

/// Service over a fresh in-memory database with default ranges
pub async fn create_test_service() -> ProjectionService<StaticMorphologyRanges> {
    ProjectionService::new(
        ProjectionCalculator::new(StaticMorphologyRanges::with_defaults()),
        Arc::new(create_test_repository().await),
    )
}

/// Minimal valid create input
pub fn sample_input(name: &str) -> CreateProjectionInput {
    let mut projected_morph_values = BTreeMap::new();
    projected_morph_values.insert(FAT_PROXY.to_owned(), 0.4);
    projected_morph_values.insert(MUSCLE_PROXY.to_owned(), 0.9);
    projected_morph_values.insert("narrowWaist".to_owned(), 0.25);

    CreateProjectionInput {
        name: name.to_owned(),
        description: Some("Six months of steady training".to_owned()),
        base_scan_id: None,
        params: ProjectionParams::new(4, 4, ProjectionDuration::SixMonths),
        projected_fat_proxy: 0.4,
        projected_muscle_proxy: 0.9,
        fat_change: -0.375,
        muscle_change: 0.175,
        projected_morph_values,
    }
}

/// Approximate float comparison
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
