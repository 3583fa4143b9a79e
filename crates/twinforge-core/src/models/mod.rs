// ABOUTME: Core data models for body morphology projections
// ABOUTME: Re-exports morphology inputs and projection output/persistence types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

//! # Data Models
//!
//! Value types shared between the calculator and the persistence layer.
//!
//! ## Design Principles
//!
//! - **Immutable inputs**: [`ProjectionParams`] and [`BodyState`] are plain values
//! - **Open shape maps**: only the fat and muscle proxies are modelled, every
//!   other shape key is carried through untouched
//! - **Serializable**: every model supports JSON via serde

mod morphology;
mod projection;

pub use morphology::{BodyState, Gender, MorphologyRange, ProjectionDuration, ProjectionParams};
pub use projection::{
    CreateProjectionInput, HealthRiskAssessment, ProjectionMetrics, ProjectionResult,
    SavedProjection, UpdateProjectionInput,
};
