// ABOUTME: Projection business logic tying the calculator to the repository
// ABOUTME: Preview without storage, save with derived fields, and optimistic list edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use twinforge_intelligence::{MorphologyRangeProvider, ProjectionCalculator};
use uuid::Uuid;

use crate::cache::{toggle_favorite_optimistic, ProjectionChange, ProjectionListCache};
use crate::database::ProjectionRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{
    BodyState, CreateProjectionInput, Gender, ProjectionParams, ProjectionResult,
    SavedProjection,
};

/// Everything needed to compute and store a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProjectionRequest {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Scan the base state came from
    pub base_scan_id: Option<Uuid>,
    /// Body state to project from
    pub base: BodyState,
    /// Body model gender
    pub gender: Gender,
    /// Projection inputs
    pub params: ProjectionParams,
}

/// Projection use cases over an injected repository
pub struct ProjectionService<R> {
    calculator: ProjectionCalculator<R>,
    repository: Arc<dyn ProjectionRepository>,
    cache: ProjectionListCache,
}

impl<R: MorphologyRangeProvider> ProjectionService<R> {
    /// Create a service with its own list cache
    #[must_use]
    pub fn new(calculator: ProjectionCalculator<R>, repository: Arc<dyn ProjectionRepository>) -> Self {
        Self {
            calculator,
            repository,
            cache: ProjectionListCache::new(),
        }
    }

    /// Share an existing list cache
    #[must_use]
    pub fn with_cache(mut self, cache: ProjectionListCache) -> Self {
        self.cache = cache;
        self
    }

    /// List cache used by this service
    #[must_use]
    pub const fn cache(&self) -> &ProjectionListCache {
        &self.cache
    }

    /// Compute a projection without storing it
    #[must_use]
    pub fn preview(
        &self,
        base: &BodyState,
        gender: Gender,
        params: &ProjectionParams,
    ) -> ProjectionResult {
        self.calculator.calculate_projection(base, gender, params)
    }

    /// Compute and persist a projection for `user_id`
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for params outside `1..=5`,
    /// `ResourceUnavailable` if the projection could not be computed, or any
    /// repository error
    pub async fn save(
        &self,
        user_id: Uuid,
        request: SaveProjectionRequest,
    ) -> AppResult<SavedProjection> {
        request.params.validate()?;

        let (result, projected) =
            self.calculator
                .project_body_state(&request.base, request.gender, &request.params);
        if !result.is_valid {
            warn!(%user_id, warnings = ?result.warnings, "Refusing to save invalid projection");
            return Err(AppError::unavailable(format!(
                "Projection could not be computed: {}",
                result.warnings.join(", ")
            ))
            .with_user_id(user_id));
        }

        let input = CreateProjectionInput {
            name: request.name,
            description: request.description,
            base_scan_id: request.base_scan_id,
            params: request.params,
            projected_fat_proxy: result.fat_proxy,
            projected_muscle_proxy: result.muscle_proxy,
            fat_change: result.fat_proxy - request.base.fat_proxy,
            muscle_change: result.muscle_proxy - request.base.muscle_proxy,
            projected_morph_values: projected.to_shape_map(),
        };

        let saved = self.repository.create_projection(user_id, input).await?;
        self.cache.invalidate(user_id).await;
        info!(%user_id, projection_id = %saved.id, "Projection saved");
        Ok(saved)
    }

    /// Load the user's projections and refresh the cached list
    ///
    /// # Errors
    ///
    /// Returns any repository error
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<SavedProjection>> {
        let projections = self.repository.get_user_projections(user_id).await?;
        self.cache.replace(user_id, projections.clone()).await;
        Ok(projections)
    }

    /// Load only the user's favorite projections
    ///
    /// # Errors
    ///
    /// Returns any repository error
    pub async fn favorites(&self, user_id: Uuid) -> AppResult<Vec<SavedProjection>> {
        self.repository.get_favorite_projections(user_id).await
    }

    /// Set the favorite flag, updating the cached list first
    ///
    /// # Errors
    ///
    /// Returns any repository error; the cached list is restored
    pub async fn set_favorite(
        &self,
        user_id: Uuid,
        projection_id: Uuid,
        is_favorite: bool,
    ) -> AppResult<()> {
        toggle_favorite_optimistic(
            &self.cache,
            self.repository.as_ref(),
            user_id,
            projection_id,
            is_favorite,
        )
        .await
    }

    /// Delete a projection, removing it from the cached list first
    ///
    /// # Errors
    ///
    /// Returns any repository error; the cached list is restored
    pub async fn delete(&self, user_id: Uuid, projection_id: Uuid) -> AppResult<()> {
        let staged = self
            .cache
            .stage(user_id, ProjectionChange::Remove { projection_id })
            .await;
        match self.repository.delete_projection(projection_id).await {
            Ok(()) => {
                self.cache.commit(staged);
                Ok(())
            }
            Err(e) => {
                self.cache.rollback(staged).await;
                Err(e)
            }
        }
    }
}
