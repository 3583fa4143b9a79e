// ABOUTME: Body projection engine for TwinForge Fit
// ABOUTME: Morphology range lookup and the closed-form projection calculator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

#![deny(unsafe_code)]

//! # TwinForge Intelligence
//!
//! Synchronous, side-effect free projection of body composition. The
//! calculator never touches storage; callers pass in the base state and get a
//! [`twinforge_core::models::ProjectionResult`] back.

/// Morphology range lookup
pub mod morphology;

/// Projection calculator and derived metrics
pub mod projection;

pub use morphology::{MorphologyRangeProvider, StaticMorphologyRanges};
pub use projection::ProjectionCalculator;

pub use twinforge_core::{constants, errors, models};
