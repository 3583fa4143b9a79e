// ABOUTME: Repository traits for saved-projection persistence
// ABOUTME: Async interface the service and cache layers depend on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

mod projection_repository;

pub use projection_repository::ProjectionRepositoryImpl;

use crate::errors::AppResult;
use crate::models::{CreateProjectionInput, SavedProjection, UpdateProjectionInput};
use async_trait::async_trait;
use uuid::Uuid;

/// Per-user storage of saved projections
///
/// Operations are single-statement and last-writer-wins. `update_projection`,
/// `toggle_favorite` and `delete_projection` fail with `ResourceNotFound`
/// when no row matches.
#[async_trait]
pub trait ProjectionRepository: Send + Sync {
    /// All projections owned by `user_id`, newest first
    async fn get_user_projections(&self, user_id: Uuid) -> AppResult<Vec<SavedProjection>>;

    /// Favorite projections owned by `user_id`, newest first
    async fn get_favorite_projections(&self, user_id: Uuid) -> AppResult<Vec<SavedProjection>>;

    /// Projection by id, if it exists
    async fn get_projection(&self, projection_id: Uuid) -> AppResult<Option<SavedProjection>>;

    /// Store a new projection and return the persisted record
    async fn create_projection(
        &self,
        user_id: Uuid,
        input: CreateProjectionInput,
    ) -> AppResult<SavedProjection>;

    /// Update only the provided fields and return the persisted record
    async fn update_projection(
        &self,
        projection_id: Uuid,
        input: UpdateProjectionInput,
    ) -> AppResult<SavedProjection>;

    /// Set the favorite flag
    async fn toggle_favorite(&self, projection_id: Uuid, is_favorite: bool) -> AppResult<()>;

    /// Hard delete
    async fn delete_projection(&self, projection_id: Uuid) -> AppResult<()>;
}
