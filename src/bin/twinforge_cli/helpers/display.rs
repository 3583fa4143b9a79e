// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors
// ABOUTME: Output formatting helpers for twinforge-cli
// ABOUTME: Provides consistent display functions for projection results and saved records

use twinforge_fit::models::{ProjectionParams, ProjectionResult, SavedProjection};

/// Display a computed projection with its metrics
pub fn display_projection_result(result: &ProjectionResult, params: &ProjectionParams) {
    println!("\nProjection over {}", params.duration.label());
    println!("{}", "=".repeat(50));
    println!("   Nutrition: {}", params.nutrition_label());
    println!("   Activity: {}", params.sport_label());
    println!("   Fat proxy: {:.3}", result.fat_proxy);
    println!("   Muscle proxy: {:.3}", result.muscle_proxy);
    println!("   Valid: {}", if result.is_valid { "yes" } else { "no" });

    if let Some(metrics) = &result.metrics {
        println!("\nMetrics:");
        println!(
            "   Estimated body fat: {:.1}%",
            metrics.estimated_body_fat_percent
        );
        if let Some(waist) = metrics.estimated_waist_reduction_cm {
            println!("   Waist reduction: {waist:.1} cm");
        }
        if let Some(lean) = metrics.estimated_lean_mass_gain_kg {
            println!("   Lean mass change: {lean:+.1} kg");
        }
        if let Some(risk) = metrics.health_risk {
            println!("   Health outlook: {}", risk.description());
        }
        if let Some(metabolic) = metrics.metabolic_improvement_percent {
            println!("   Metabolic change: {metabolic:+.0}%");
        }
    }

    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("   - {warning}");
        }
    }
}

/// Display a stored projection record
pub fn display_saved_projection(projection: &SavedProjection) {
    println!("\nProjection Saved");
    println!("{}", "=".repeat(50));
    println!("   ID: {}", projection.id);
    println!("   Name: {}", projection.name);
    if let Some(description) = &projection.description {
        println!("   Description: {description}");
    }
    println!("   Horizon: {}", projection.duration_key.label());
    println!(
        "   Fat proxy: {:.3} ({:+.3})",
        projection.projected_fat_proxy, projection.fat_change
    );
    println!(
        "   Muscle proxy: {:.3} ({:+.3})",
        projection.projected_muscle_proxy, projection.muscle_change
    );
    println!(
        "   Created: {}",
        projection.created_at.format("%Y-%m-%d %H:%M UTC")
    );
}

/// Display a list of saved projections, one per line
pub fn display_projection_list(projections: &[SavedProjection], favorites_only: bool) {
    let heading = if favorites_only {
        "Favorite Projections"
    } else {
        "Saved Projections"
    };
    println!("\n{heading} ({})", projections.len());
    println!("{}", "=".repeat(80));

    if projections.is_empty() {
        println!("   (none)");
        return;
    }

    for p in projections {
        println!(
            "{} {} | {} | {} | fat {:+.3} | muscle {:+.3} | {}",
            if p.is_favorite { "*" } else { " " },
            p.id,
            p.name,
            p.duration_key.label(),
            p.fat_change,
            p.muscle_change,
            p.created_at.format("%Y-%m-%d"),
        );
    }
}
