// ABOUTME: Projection result and saved-projection models
// ABOUTME: ProjectionResult, ProjectionMetrics, SavedProjection and create/update inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::morphology::{ProjectionDuration, ProjectionParams};

/// Outcome of a single projection calculation
///
/// When `is_valid` is false the proxies are the unmodified base values and
/// `warnings` explains why.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionResult {
    /// Projected fat proxy, rounded to 3 decimals
    pub fat_proxy: f64,
    /// Projected muscle proxy, rounded to 3 decimals
    pub muscle_proxy: f64,
    /// Whether the projection could be computed
    pub is_valid: bool,
    /// Human-readable warnings in emission order
    pub warnings: Vec<String>,
    /// Motivational estimates, present only for valid results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ProjectionMetrics>,
}

impl ProjectionResult {
    /// Result for a projection that could not be computed
    #[must_use]
    pub fn invalid(fat_proxy: f64, muscle_proxy: f64, warning: impl Into<String>) -> Self {
        Self {
            fat_proxy,
            muscle_proxy,
            is_valid: false,
            warnings: vec![warning.into()],
            metrics: None,
        }
    }

    /// Whether a specific warning was emitted
    #[must_use]
    pub fn has_warning(&self, warning: &str) -> bool {
        self.warnings.iter().any(|w| w == warning)
    }
}

/// Qualitative reading of the projected body-fat change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthRiskAssessment {
    /// Large reduction into a low body-fat band
    Excellent,
    /// Solid reduction into a healthy band
    VeryGood,
    /// Noticeable reduction
    Positive,
    /// Body fat rises noticeably
    Increased,
}

impl HealthRiskAssessment {
    /// Short description for display
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent: significant reduction in cardiovascular risk",
            Self::VeryGood => "Very good: marked improvement in metabolic health",
            Self::Positive => "Positive: improving health trend",
            Self::Increased => "Caution: rising body fat increases health risk",
        }
    }
}

/// Estimates derived from a projection for motivational display
///
/// These never feed back into the projected proxies.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectionMetrics {
    /// Estimated body-fat percentage at the end of the horizon
    pub estimated_body_fat_percent: f64,
    /// Estimated waist change in centimetres, when significant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_waist_reduction_cm: Option<f64>,
    /// Estimated lean-mass change in kilograms, when significant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_lean_mass_gain_kg: Option<f64>,
    /// Health-risk reading, when the body-fat change is meaningful
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_risk: Option<HealthRiskAssessment>,
    /// Estimated metabolic improvement in percent, when significant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metabolic_improvement_percent: Option<f64>,
}

/// Persisted projection record (`body_projections` row)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedProjection {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// User-chosen name
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Scan the projection was computed from
    pub base_scan_id: Option<Uuid>,
    /// Nutrition quality used
    pub nutrition_quality: i32,
    /// Sport intensity used
    pub sport_intensity: i32,
    /// Horizon used
    pub duration_key: ProjectionDuration,
    /// Projected fat proxy (`projected_pear_figure` column)
    pub projected_fat_proxy: f64,
    /// Projected muscle proxy (`projected_bodybuilder_size` column)
    pub projected_muscle_proxy: f64,
    /// Projected minus base fat proxy
    pub fat_change: f64,
    /// Projected minus base muscle proxy
    pub muscle_change: f64,
    /// Full projected shape-key map
    pub projected_morph_values: BTreeMap<String, f64>,
    /// Favorite flag
    pub is_favorite: bool,
    /// Legacy mirror of `sport_intensity`
    pub activity_level: i32,
    /// Legacy field, always `0`
    pub caloric_balance: i32,
    /// Legacy month count derived from `duration_key`
    pub time_period_months: i32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl SavedProjection {
    /// Params this projection was computed with
    #[must_use]
    pub const fn params(&self) -> ProjectionParams {
        ProjectionParams::new(self.nutrition_quality, self.sport_intensity, self.duration_key)
    }
}

/// Input for creating a saved projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectionInput {
    /// Name (required, non-empty)
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional scan reference
    pub base_scan_id: Option<Uuid>,
    /// Params the projection was computed with
    pub params: ProjectionParams,
    /// Projected fat proxy
    pub projected_fat_proxy: f64,
    /// Projected muscle proxy
    pub projected_muscle_proxy: f64,
    /// Projected minus base fat proxy
    pub fat_change: f64,
    /// Projected minus base muscle proxy
    pub muscle_change: f64,
    /// Full projected shape-key map
    #[serde(default)]
    pub projected_morph_values: BTreeMap<String, f64>,
}

/// Partial update for a saved projection; `None` leaves the column untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectionInput {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New params; updates the legacy month and activity columns too
    pub params: Option<ProjectionParams>,
    /// New projected fat proxy
    pub projected_fat_proxy: Option<f64>,
    /// New projected muscle proxy
    pub projected_muscle_proxy: Option<f64>,
    /// New fat change
    pub fat_change: Option<f64>,
    /// New muscle change
    pub muscle_change: Option<f64>,
    /// New projected shape-key map
    pub projected_morph_values: Option<BTreeMap<String, f64>>,
}

impl UpdateProjectionInput {
    /// Whether no field is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.params.is_none()
            && self.projected_fat_proxy.is_none()
            && self.projected_muscle_proxy.is_none()
            && self.fat_change.is_none()
            && self.muscle_change.is_none()
            && self.projected_morph_values.is_none()
    }
}
