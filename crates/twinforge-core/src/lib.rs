// ABOUTME: Core types and constants for the TwinForge Fit platform
// ABOUTME: Foundation crate with error handling, morphology models, and projection constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

#![deny(unsafe_code)]

//! # TwinForge Core
//!
//! Foundation crate providing shared types and constants for TwinForge Fit
//! body projections. It performs no I/O so the calculator and the storage
//! layer can both depend on it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Model coefficients, shape keys and warning strings organized by domain
//! - **models**: Body state, projection params, results and saved records

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`BodyState`, `ProjectionParams`, `SavedProjection`, etc.)
pub mod models;
