// ABOUTME: Domain service layer orchestrating calculation, caching and persistence
// ABOUTME: Protocol-agnostic entry points reused by the CLI and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

//! Domain service layer
//!
//! Services combine the pure calculator with storage so that callers never
//! have to derive persisted fields themselves.

/// Projection preview, save, and list management
pub mod projections;

pub use projections::{ProjectionService, SaveProjectionRequest};
