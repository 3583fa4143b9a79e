// ABOUTME: Application constants for the projection model and persistence layer
// ABOUTME: Shape keys, model coefficients, warning messages and storage names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

//! Constants module
//!
//! Grouped by domain so call sites read as `projection::FAT_NUTRITION_COEFF`.

/// Shape keys shared with the 3D body model
pub mod shape_keys {
    /// Shape key carrying the fat-mass proxy
    pub const FAT_PROXY: &str = "pearFigure";
    /// Shape key carrying the muscle-mass proxy
    pub const MUSCLE_PROXY: &str = "bodybuilderSize";
}

/// Coefficients of the closed-form projection model
pub mod projection {
    /// Lowest nominal nutrition/sport level
    pub const PARAM_MIN: i32 = 1;
    /// Highest nominal nutrition/sport level
    pub const PARAM_MAX: i32 = 5;

    /// Nutrition level with no effect on either proxy
    pub const NEUTRAL_NUTRITION: i32 = 3;
    /// Sport level with no effect on the fat proxy
    pub const NEUTRAL_SPORT_FAT: i32 = 1;
    /// Sport level with no effect on the muscle proxy
    pub const NEUTRAL_SPORT_MUSCLE: i32 = 3;

    /// Fat proxy change per nutrition level above neutral
    pub const FAT_NUTRITION_COEFF: f64 = -0.3;
    /// Fat proxy change per sport level above none
    pub const FAT_SPORT_COEFF: f64 = -0.15;
    /// Muscle proxy change per sport level above moderate
    pub const MUSCLE_SPORT_COEFF: f64 = 0.25;
    /// Muscle proxy change per nutrition level above neutral
    pub const MUSCLE_NUTRITION_COEFF: f64 = 0.1;

    /// Combined extremity ceiling for male bodies
    pub const MALE_EXTREMITY_THRESHOLD: f64 = 3.5;
    /// Combined extremity ceiling for female bodies
    pub const FEMALE_EXTREMITY_THRESHOLD: f64 = 3.0;

    /// Decimal places kept on projected proxies
    pub const OUTPUT_DECIMALS: i32 = 3;
}

/// Coefficients for the derived motivational metrics
pub mod metrics {
    /// Body-fat percentage at a fat proxy of zero
    pub const BASE_BODY_FAT_PERCENT: f64 = 15.0;
    /// Body-fat percentage points per fat proxy unit
    pub const BODY_FAT_PER_PROXY: f64 = 8.0;
    /// Waist centimetres per fat proxy unit
    pub const WAIST_CM_PER_PROXY: f64 = 8.0;
    /// Lean-mass kilograms per muscle proxy unit
    pub const LEAN_MASS_KG_PER_PROXY: f64 = 4.0;
    /// Metabolic percent per body-fat point lost
    pub const METABOLIC_PER_BODY_FAT: f64 = 2.0;
    /// Metabolic percent per lean kilogram gained
    pub const METABOLIC_PER_LEAN_KG: f64 = 1.5;

    /// Waist change below this is not reported
    pub const MIN_REPORTED_WAIST_CM: f64 = 0.5;
    /// Lean-mass change below this (absolute) is not reported
    pub const MIN_REPORTED_LEAN_KG: f64 = 0.5;
    /// Metabolic change below this (absolute) is not reported
    pub const MIN_REPORTED_METABOLIC: f64 = 1.0;
}

/// Warning strings attached to projection results
pub mod warnings {
    /// Range lookup returned nothing for a modelled key
    pub const MISSING_RANGES: &str = "missing morph ranges";
    /// Fat proxy clamped to its maximum
    pub const MAX_FAT: &str = "max fat proxy reached";
    /// Fat proxy clamped to its minimum
    pub const MIN_FAT: &str = "min fat proxy reached";
    /// Muscle proxy clamped to its maximum
    pub const MAX_MUSCLE: &str = "max muscle proxy reached";
    /// Muscle proxy clamped to its minimum
    pub const MIN_MUSCLE: &str = "min muscle proxy reached";
    /// Combined extremity exceeded the gender threshold
    pub const EXTREME_COMBINATION: &str = "extreme morphology combination, results adjusted";
}

/// Persistence names
pub mod storage {
    /// Entity name used in not-found errors
    pub const PROJECTION_ENTITY: &str = "body_projection";
    /// Legacy caloric balance written on every insert
    pub const DEFAULT_CALORIC_BALANCE: i32 = 0;
}

/// Service identity
pub mod service {
    /// Default service name for logs
    pub const SERVICE_NAME: &str = "twinforge-fit";
    /// Default database URL
    pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
}
