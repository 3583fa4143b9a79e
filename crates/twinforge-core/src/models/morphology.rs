// ABOUTME: Body morphology models shared by the projection calculator and persistence
// ABOUTME: Gender, MorphologyRange, BodyState, ProjectionDuration and ProjectionParams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::projection::{PARAM_MAX, PARAM_MIN};
use crate::constants::shape_keys::{FAT_PROXY, MUSCLE_PROXY};
use crate::errors::{AppError, AppResult};

/// Gender used to select morphology ranges and extremity thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male body model
    Male,
    /// Female body model
    Female,
}

impl Gender {
    /// Convert to wire/database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Parse from string (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns an error if the string is neither `male` nor `female`
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!(
                "Unknown gender '{other}', expected 'male' or 'female'"
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive bounds for one shape key, supplied by a morphology mapping
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MorphologyRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl MorphologyRange {
    /// Create a range, normalising so that `min <= max`
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Whether a value lies within the bounds
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Body composition snapshot
///
/// The two shape keys the projection model reasons about are first-class
/// fields. Every other shape key from the scan is carried opaquely in
/// `other` and survives a projection unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BodyState {
    /// Fat-mass proxy (`pearFigure` shape key)
    pub fat_proxy: f64,
    /// Muscle-mass proxy (`bodybuilderSize` shape key)
    pub muscle_proxy: f64,
    /// Remaining shape keys, passed through untouched
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub other: BTreeMap<String, f64>,
}

impl BodyState {
    /// Create a state with only the two modelled keys
    #[must_use]
    pub const fn new(fat_proxy: f64, muscle_proxy: f64) -> Self {
        Self {
            fat_proxy,
            muscle_proxy,
            other: BTreeMap::new(),
        }
    }

    /// Build from a raw shape-key map; missing modelled keys default to `0.0`
    #[must_use]
    pub fn from_shape_map(values: &BTreeMap<String, f64>) -> Self {
        let mut other = values.clone();
        let fat_proxy = other.remove(FAT_PROXY).unwrap_or(0.0);
        let muscle_proxy = other.remove(MUSCLE_PROXY).unwrap_or(0.0);
        Self {
            fat_proxy,
            muscle_proxy,
            other,
        }
    }

    /// Flatten back into a raw shape-key map
    #[must_use]
    pub fn to_shape_map(&self) -> BTreeMap<String, f64> {
        let mut values = self.other.clone();
        values.insert(FAT_PROXY.to_owned(), self.fat_proxy);
        values.insert(MUSCLE_PROXY.to_owned(), self.muscle_proxy);
        values
    }

    /// Same state with the two modelled keys replaced
    #[must_use]
    pub fn with_proxies(&self, fat_proxy: f64, muscle_proxy: f64) -> Self {
        Self {
            fat_proxy,
            muscle_proxy,
            other: self.other.clone(),
        }
    }
}

/// Projection horizon
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProjectionDuration {
    /// Three months ahead
    #[serde(rename = "3_months")]
    ThreeMonths,
    /// Six months ahead
    #[serde(rename = "6_months")]
    SixMonths,
    /// One year ahead
    #[serde(rename = "1_year")]
    OneYear,
    /// Three years ahead
    #[serde(rename = "3_years")]
    ThreeYears,
}

impl ProjectionDuration {
    /// All durations, shortest first
    pub const ALL: [Self; 4] = [
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::ThreeYears,
    ];

    /// Multiplier applied to the per-unit deltas
    #[must_use]
    pub const fn time_factor(self) -> f64 {
        match self {
            Self::ThreeMonths => 0.25,
            Self::SixMonths => 0.5,
            Self::OneYear => 1.0,
            Self::ThreeYears => 2.5,
        }
    }

    /// Month count stored in the legacy `time_period_months` column
    #[must_use]
    pub const fn months(self) -> i32 {
        match self {
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
            Self::OneYear => 12,
            Self::ThreeYears => 36,
        }
    }

    /// Database/wire key
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThreeMonths => "3_months",
            Self::SixMonths => "6_months",
            Self::OneYear => "1_year",
            Self::ThreeYears => "3_years",
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ThreeMonths => "3 months",
            Self::SixMonths => "6 months",
            Self::OneYear => "1 year",
            Self::ThreeYears => "3 years",
        }
    }

    /// Parse from the database/wire key
    ///
    /// # Errors
    ///
    /// Returns an error for any key other than the four known durations
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "3_months" => Ok(Self::ThreeMonths),
            "6_months" => Ok(Self::SixMonths),
            "1_year" => Ok(Self::OneYear),
            "3_years" => Ok(Self::ThreeYears),
            other => Err(AppError::invalid_input(format!(
                "Unknown projection duration '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ProjectionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-chosen projection inputs
///
/// Nutrition quality and sport intensity are nominally `1..=5`. The
/// calculator extrapolates whatever it is given; [`Self::validate`] is the
/// check applied at the persistence boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProjectionParams {
    /// Nutrition quality, 1 (very poor) to 5 (excellent)
    pub nutrition_quality: i32,
    /// Sport intensity, 1 (none) to 5 (very intense)
    pub sport_intensity: i32,
    /// Projection horizon
    pub duration: ProjectionDuration,
}

impl ProjectionParams {
    /// Create params without validation
    #[must_use]
    pub const fn new(nutrition_quality: i32, sport_intensity: i32, duration: ProjectionDuration) -> Self {
        Self {
            nutrition_quality,
            sport_intensity,
            duration,
        }
    }

    /// Check both levels are within `1..=5`
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        check_level("nutrition_quality", self.nutrition_quality)?;
        check_level("sport_intensity", self.sport_intensity)
    }

    /// Display label for the nutrition level
    #[must_use]
    pub const fn nutrition_label(&self) -> &'static str {
        match self.nutrition_quality {
            i32::MIN..=1 => "Very poor",
            2 => "Poor",
            3 => "Average",
            4 => "Good",
            _ => "Excellent",
        }
    }

    /// Display label for the sport level
    #[must_use]
    pub const fn sport_label(&self) -> &'static str {
        match self.sport_intensity {
            i32::MIN..=1 => "None",
            2 => "Light",
            3 => "Moderate",
            4 => "Intense",
            _ => "Very intense",
        }
    }
}

fn check_level(field: &str, value: i32) -> AppResult<()> {
    if (PARAM_MIN..=PARAM_MAX).contains(&value) {
        Ok(())
    } else {
        Err(AppError::out_of_range(format!(
            "{field} must be between {PARAM_MIN} and {PARAM_MAX}, got {value}"
        ))
        .with_details(serde_json::json!({ "field": field, "value": value })))
    }
}
