// ABOUTME: Error types re-exported from twinforge-core for crate-local paths
// ABOUTME: Keeps `crate::errors::AppError` usable throughout the root crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

//! # Unified Error Handling System
//!
//! All error types live in `twinforge_core::errors`; this module re-exports
//! them so the persistence and service layers can use `crate::errors` paths.

pub use twinforge_core::errors::{
    AppError, AppResult, DatabaseError, DatabaseResult, ErrorCode, ErrorContext,
};
