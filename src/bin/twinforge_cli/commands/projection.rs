// ABOUTME: Projection commands for twinforge-cli
// ABOUTME: Handles calculate, save, list, favorite and delete operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

use anyhow::Context;
use tracing::{info, warn};
use twinforge_fit::{
    intelligence::StaticMorphologyRanges,
    models::{ProjectionParams, ProjectionResult},
    services::{ProjectionService, SaveProjectionRequest},
};
use uuid::Uuid;

use crate::helpers::display::{
    display_projection_list, display_projection_result, display_saved_projection,
};
use crate::ProjectionArgs;

type Service = ProjectionService<StaticMorphologyRanges>;

/// Print a computed projection
pub fn show_calculation(
    result: &ProjectionResult,
    params: &ProjectionParams,
    json: bool,
) -> anyhow::Result<()> {
    if !result.is_valid {
        warn!(warnings = ?result.warnings, "Projection could not be computed");
    }
    if json {
        let out = serde_json::to_string_pretty(result)
            .context("Failed to serialize projection result")?;
        println!("{out}");
    } else {
        display_projection_result(result, params);
    }
    Ok(())
}

/// Compute and store a projection
pub async fn save(
    service: &Service,
    user_id: Uuid,
    name: String,
    description: Option<String>,
    base_scan_id: Option<Uuid>,
    projection: &ProjectionArgs,
) -> anyhow::Result<()> {
    info!(%user_id, name = %name, "Saving projection");
    let request = SaveProjectionRequest {
        name,
        description,
        base_scan_id,
        base: projection.base(),
        gender: projection.gender,
        params: projection.params(),
    };
    let saved = service.save(user_id, request).await?;
    display_saved_projection(&saved);
    Ok(())
}

/// List saved projections for a user
pub async fn list(
    service: &Service,
    user_id: Uuid,
    favorites_only: bool,
    json: bool,
) -> anyhow::Result<()> {
    let projections = if favorites_only {
        service.favorites(user_id).await?
    } else {
        service.list(user_id).await?
    };

    if json {
        let out = serde_json::to_string_pretty(&projections)
            .context("Failed to serialize projection list")?;
        println!("{out}");
    } else {
        display_projection_list(&projections, favorites_only);
    }
    Ok(())
}

/// Set or clear the favorite flag
pub async fn favorite(
    service: &Service,
    user_id: Uuid,
    projection_id: Uuid,
    is_favorite: bool,
) -> anyhow::Result<()> {
    service
        .set_favorite(user_id, projection_id, is_favorite)
        .await
        .with_context(|| format!("Failed to update favorite flag on {projection_id}"))?;
    println!(
        "Projection {projection_id} {}",
        if is_favorite {
            "marked as favorite"
        } else {
            "removed from favorites"
        }
    );
    Ok(())
}

/// Delete a saved projection
pub async fn delete(service: &Service, user_id: Uuid, projection_id: Uuid) -> anyhow::Result<()> {
    service
        .delete(user_id, projection_id)
        .await
        .with_context(|| format!("Failed to delete projection {projection_id}"))?;
    println!("Projection {projection_id} deleted");
    Ok(())
}
