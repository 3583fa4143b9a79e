// ABOUTME: Client-side caches layered over the projection repository
// ABOUTME: Optimistic per-user projection list with stage/commit/rollback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

/// Optimistic projection list cache
pub mod projections;

pub use projections::{
    toggle_favorite_optimistic, ProjectionChange, ProjectionListCache, StagedChange,
};
