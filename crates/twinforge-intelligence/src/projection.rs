// ABOUTME: Closed-form body composition projection from nutrition, sport and horizon
// ABOUTME: Clamps to morphology ranges, limits combined extremity and derives motivational metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

//! Body projection calculator
//!
//! Given a base [`BodyState`], a [`Gender`] and [`ProjectionParams`], the
//! calculator estimates where the fat and muscle proxies land at the end of
//! the chosen horizon:
//!
//! ```text
//! fat_delta    = ((nq - 3) * -0.3  + (si - 1) * -0.15) * time_factor
//! muscle_delta = ((si - 3) *  0.25 + (nq - 3) *  0.1)  * time_factor
//! ```
//!
//! Each result is clamped to the gender's range, the pair is scaled down when
//! `|fat| + |muscle|` exceeds the gender's extremity threshold, and both are
//! rounded to 3 decimals. Params outside `1..=5` are extrapolated, not
//! rejected.

use tracing::{debug, error, info};
use twinforge_core::constants::metrics::{
    BASE_BODY_FAT_PERCENT, BODY_FAT_PER_PROXY, LEAN_MASS_KG_PER_PROXY, METABOLIC_PER_BODY_FAT,
    METABOLIC_PER_LEAN_KG, MIN_REPORTED_LEAN_KG, MIN_REPORTED_METABOLIC, MIN_REPORTED_WAIST_CM,
    WAIST_CM_PER_PROXY,
};
use twinforge_core::constants::projection::{
    FAT_NUTRITION_COEFF, FAT_SPORT_COEFF, FEMALE_EXTREMITY_THRESHOLD, MALE_EXTREMITY_THRESHOLD,
    MUSCLE_NUTRITION_COEFF, MUSCLE_SPORT_COEFF, NEUTRAL_NUTRITION, NEUTRAL_SPORT_FAT,
    NEUTRAL_SPORT_MUSCLE, OUTPUT_DECIMALS,
};
use twinforge_core::constants::shape_keys::{FAT_PROXY, MUSCLE_PROXY};
use twinforge_core::constants::warnings;
use twinforge_core::models::{
    BodyState, Gender, HealthRiskAssessment, MorphologyRange, ProjectionMetrics,
    ProjectionParams, ProjectionResult,
};

use crate::morphology::MorphologyRangeProvider;

/// Time-scaled change to each proxy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionDeltas {
    /// Fat proxy change
    pub fat: f64,
    /// Muscle proxy change
    pub muscle: f64,
}

/// Projection calculator bound to a morphology range source
#[derive(Debug, Clone)]
pub struct ProjectionCalculator<R> {
    ranges: R,
}

impl<R: MorphologyRangeProvider> ProjectionCalculator<R> {
    /// Create a calculator that bounds results with `ranges`
    #[must_use]
    pub const fn new(ranges: R) -> Self {
        Self { ranges }
    }

    /// Range source in use
    #[must_use]
    pub const fn ranges(&self) -> &R {
        &self.ranges
    }

    /// Project the fat and muscle proxies of `base`
    #[must_use]
    pub fn calculate_projection(
        &self,
        base: &BodyState,
        gender: Gender,
        params: &ProjectionParams,
    ) -> ProjectionResult {
        debug!(
            gender = %gender,
            nutrition_quality = params.nutrition_quality,
            sport_intensity = params.sport_intensity,
            duration = %params.duration,
            base_fat = base.fat_proxy,
            base_muscle = base.muscle_proxy,
            "Calculating body projection"
        );

        let fat_range = self.ranges.morph_value_range(FAT_PROXY, gender);
        let muscle_range = self.ranges.morph_value_range(MUSCLE_PROXY, gender);
        let (Some(fat_range), Some(muscle_range)) = (fat_range, muscle_range) else {
            error!(
                gender = %gender,
                fat_range_missing = fat_range.is_none(),
                muscle_range_missing = muscle_range.is_none(),
                "Morphology ranges unavailable, returning base values"
            );
            return ProjectionResult::invalid(
                base.fat_proxy,
                base.muscle_proxy,
                warnings::MISSING_RANGES,
            );
        };

        let time_factor = params.duration.time_factor();
        let deltas = deltas(params, time_factor);
        let mut result_warnings = Vec::new();

        let mut fat = clamp_with_warning(
            base.fat_proxy + deltas.fat,
            fat_range,
            warnings::MIN_FAT,
            warnings::MAX_FAT,
            &mut result_warnings,
        );
        let mut muscle = clamp_with_warning(
            base.muscle_proxy + deltas.muscle,
            muscle_range,
            warnings::MIN_MUSCLE,
            warnings::MAX_MUSCLE,
            &mut result_warnings,
        );

        let threshold = extremity_threshold(gender);
        let combined = fat.abs() + muscle.abs();
        if combined > threshold {
            let scale = threshold / combined;
            fat *= scale;
            muscle *= scale;
            result_warnings.push(warnings::EXTREME_COMBINATION.to_owned());
        }

        let metrics = projection_metrics(base, fat, muscle);
        let result = ProjectionResult {
            fat_proxy: round_to(fat, OUTPUT_DECIMALS),
            muscle_proxy: round_to(muscle, OUTPUT_DECIMALS),
            is_valid: true,
            warnings: result_warnings,
            metrics: Some(metrics),
        };

        info!(
            base_fat = base.fat_proxy,
            base_muscle = base.muscle_proxy,
            projected_fat = result.fat_proxy,
            projected_muscle = result.muscle_proxy,
            fat_delta = deltas.fat,
            muscle_delta = deltas.muscle,
            time_factor,
            warning_count = result.warnings.len(),
            "Body projection calculated"
        );

        result
    }

    /// Project `base` and return the full projected shape map alongside the result
    ///
    /// Only the fat and muscle proxies change; every other key is carried over.
    #[must_use]
    pub fn project_body_state(
        &self,
        base: &BodyState,
        gender: Gender,
        params: &ProjectionParams,
    ) -> (ProjectionResult, BodyState) {
        let result = self.calculate_projection(base, gender, params);
        let projected = base.with_proxies(result.fat_proxy, result.muscle_proxy);
        (result, projected)
    }
}

/// Time-scaled deltas for `params`
#[must_use]
pub fn deltas(params: &ProjectionParams, time_factor: f64) -> ProjectionDeltas {
    let nutrition = f64::from(params.nutrition_quality);
    let sport = f64::from(params.sport_intensity);

    let fat_nutrition = (nutrition - f64::from(NEUTRAL_NUTRITION)) * FAT_NUTRITION_COEFF;
    let fat_sport = (sport - f64::from(NEUTRAL_SPORT_FAT)) * FAT_SPORT_COEFF;
    let muscle_sport = (sport - f64::from(NEUTRAL_SPORT_MUSCLE)) * MUSCLE_SPORT_COEFF;
    let muscle_nutrition = (nutrition - f64::from(NEUTRAL_NUTRITION)) * MUSCLE_NUTRITION_COEFF;

    ProjectionDeltas {
        fat: (fat_nutrition + fat_sport) * time_factor,
        muscle: (muscle_sport + muscle_nutrition) * time_factor,
    }
}

/// Combined extremity ceiling for `gender`
#[must_use]
pub const fn extremity_threshold(gender: Gender) -> f64 {
    match gender {
        Gender::Male => MALE_EXTREMITY_THRESHOLD,
        Gender::Female => FEMALE_EXTREMITY_THRESHOLD,
    }
}

fn clamp_with_warning(
    value: f64,
    range: MorphologyRange,
    min_warning: &str,
    max_warning: &str,
    warnings: &mut Vec<String>,
) -> f64 {
    if value > range.max {
        warnings.push(max_warning.to_owned());
        range.max
    } else if value < range.min {
        warnings.push(min_warning.to_owned());
        range.min
    } else {
        value
    }
}

fn body_fat_percent(fat_proxy: f64) -> f64 {
    fat_proxy.mul_add(BODY_FAT_PER_PROXY, BASE_BODY_FAT_PERCENT)
}

fn projection_metrics(base: &BodyState, fat: f64, muscle: f64) -> ProjectionMetrics {
    let base_bf = body_fat_percent(base.fat_proxy);
    let final_bf = body_fat_percent(fat);
    let bf_change = base_bf - final_bf;

    let waist_cm = (fat - base.fat_proxy).abs() * WAIST_CM_PER_PROXY;
    let lean_kg = (muscle - base.muscle_proxy) * LEAN_MASS_KG_PER_PROXY;
    let metabolic = bf_change.mul_add(METABOLIC_PER_BODY_FAT, lean_kg * METABOLIC_PER_LEAN_KG);

    ProjectionMetrics {
        estimated_body_fat_percent: round_to(final_bf, 1),
        estimated_waist_reduction_cm: (waist_cm > MIN_REPORTED_WAIST_CM)
            .then(|| round_to(waist_cm, 1)),
        estimated_lean_mass_gain_kg: (lean_kg.abs() > MIN_REPORTED_LEAN_KG)
            .then(|| round_to(lean_kg, 1)),
        health_risk: health_risk(final_bf, bf_change),
        metabolic_improvement_percent: (metabolic.abs() > MIN_REPORTED_METABOLIC)
            .then(|| metabolic.round()),
    }
}

fn health_risk(final_bf: f64, bf_change: f64) -> Option<HealthRiskAssessment> {
    if final_bf < 15.0 && bf_change > 3.0 {
        Some(HealthRiskAssessment::Excellent)
    } else if final_bf < 20.0 && bf_change > 2.0 {
        Some(HealthRiskAssessment::VeryGood)
    } else if bf_change > 1.0 {
        Some(HealthRiskAssessment::Positive)
    } else if bf_change < -2.0 {
        Some(HealthRiskAssessment::Increased)
    } else {
        None
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::StaticMorphologyRanges;
    use twinforge_core::models::ProjectionDuration;

    fn calculator() -> ProjectionCalculator<StaticMorphologyRanges> {
        ProjectionCalculator::new(StaticMorphologyRanges::with_defaults())
    }

    #[test]
    fn test_deltas_one_year() {
        let params = ProjectionParams::new(5, 5, ProjectionDuration::OneYear);
        let d = deltas(&params, 1.0);
        assert!((d.fat - (-1.2)).abs() < 1e-9);
        assert!((d.muscle - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_round_to() {
        assert!((round_to(0.123_456, 3) - 0.123).abs() < 1e-12);
        assert!((round_to(-2.718_28, 3) - (-2.718)).abs() < 1e-12);
    }

    #[test]
    fn test_health_risk_bands() {
        assert_eq!(health_risk(14.0, 4.0), Some(HealthRiskAssessment::Excellent));
        assert_eq!(health_risk(18.0, 2.5), Some(HealthRiskAssessment::VeryGood));
        assert_eq!(health_risk(25.0, 1.5), Some(HealthRiskAssessment::Positive));
        assert_eq!(health_risk(25.0, -2.5), Some(HealthRiskAssessment::Increased));
        assert_eq!(health_risk(25.0, 0.0), None);
    }

    #[test]
    fn test_metrics_for_fat_loss() {
        let base = BodyState::new(1.0, 0.0);
        let params = ProjectionParams::new(5, 5, ProjectionDuration::OneYear);
        let result = calculator().calculate_projection(&base, Gender::Male, &params);

        // fat 1.0 - 1.2 = -0.2; muscle 0.7
        assert!((result.fat_proxy - (-0.2)).abs() < 1e-9);
        assert!((result.muscle_proxy - 0.7).abs() < 1e-9);
        assert!(result.metrics.is_some());
        let metrics = result.metrics.unwrap_or_default();
        assert!((metrics.estimated_body_fat_percent - 13.4).abs() < 1e-9);
        assert_eq!(metrics.estimated_waist_reduction_cm, Some(9.6));
        assert_eq!(metrics.estimated_lean_mass_gain_kg, Some(2.8));
        assert_eq!(metrics.health_risk, Some(HealthRiskAssessment::Excellent));
        // bf change 9.6 * 2 + 2.8 * 1.5 = 23.4
        assert_eq!(metrics.metabolic_improvement_percent, Some(23.0));
    }

    #[test]
    fn test_project_body_state_preserves_other_keys() {
        let mut base = BodyState::new(0.5, 0.5);
        base.other.insert("narrowWaist".to_owned(), 0.3);
        let params = ProjectionParams::new(4, 4, ProjectionDuration::SixMonths);

        let (result, projected) = calculator().project_body_state(&base, Gender::Female, &params);
        assert!(result.is_valid);
        assert_eq!(projected.other, base.other);
        assert!((projected.fat_proxy - result.fat_proxy).abs() < f64::EPSILON);
        assert!((projected.muscle_proxy - result.muscle_proxy).abs() < f64::EPSILON);
    }
}
