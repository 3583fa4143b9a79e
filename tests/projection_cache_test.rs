// ABOUTME: Integration tests for the optimistic projection list cache
// ABOUTME: Verifies commit on storage success and rollback on storage failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

// Test files: allow missing_docs (rustc lint) and unwrap (valid in tests)
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use async_trait::async_trait;
use common::{create_test_repository, sample_input};
use twinforge_fit::{
    cache::{toggle_favorite_optimistic, ProjectionChange, ProjectionListCache},
    database::{ProjectionRepository, ProjectionRepositoryImpl},
    errors::{AppError, AppResult, ErrorCode},
    models::{CreateProjectionInput, SavedProjection, UpdateProjectionInput},
};
use uuid::Uuid;

/// Repository whose writes always fail
struct FailingRepository;

#[async_trait]
impl ProjectionRepository for FailingRepository {
    async fn get_user_projections(&self, _user_id: Uuid) -> AppResult<Vec<SavedProjection>> {
        Ok(Vec::new())
    }

    async fn get_favorite_projections(&self, _user_id: Uuid) -> AppResult<Vec<SavedProjection>> {
        Ok(Vec::new())
    }

    async fn get_projection(&self, _projection_id: Uuid) -> AppResult<Option<SavedProjection>> {
        Ok(None)
    }

    async fn create_projection(
        &self,
        _user_id: Uuid,
        _input: CreateProjectionInput,
    ) -> AppResult<SavedProjection> {
        Err(AppError::database("storage offline"))
    }

    async fn update_projection(
        &self,
        _projection_id: Uuid,
        _input: UpdateProjectionInput,
    ) -> AppResult<SavedProjection> {
        Err(AppError::database("storage offline"))
    }

    async fn toggle_favorite(&self, _projection_id: Uuid, _is_favorite: bool) -> AppResult<()> {
        Err(AppError::database("storage offline"))
    }

    async fn delete_projection(&self, _projection_id: Uuid) -> AppResult<()> {
        Err(AppError::database("storage offline"))
    }
}

/// Two stored projections for one user, cached in storage order
async fn seeded_cache() -> (
    ProjectionRepositoryImpl,
    ProjectionListCache,
    Uuid,
    Vec<SavedProjection>,
) {
    let repo = create_test_repository().await;
    let user_id = Uuid::new_v4();
    repo.create_projection(user_id, sample_input("one")).await.unwrap();
    repo.create_projection(user_id, sample_input("two")).await.unwrap();
    let list = repo.get_user_projections(user_id).await.unwrap();

    let cache = ProjectionListCache::new();
    cache.replace(user_id, list.clone()).await;
    (repo, cache, user_id, list)
}

#[tokio::test]
async fn test_successful_toggle_keeps_local_change() {
    let (repo, cache, user_id, list) = seeded_cache().await;
    let target = list[0].id;

    toggle_favorite_optimistic(&cache, &repo, user_id, target, true)
        .await
        .unwrap();

    let cached = cache.get(user_id).await.unwrap();
    assert!(cached.iter().find(|p| p.id == target).unwrap().is_favorite);
    assert!(!cached.iter().find(|p| p.id == list[1].id).unwrap().is_favorite);
    assert_eq!(cache.pending_changes(), 0);

    let stored = repo.get_projection(target).await.unwrap().unwrap();
    assert!(stored.is_favorite);
}

#[tokio::test]
async fn test_failed_toggle_restores_previous_list() {
    let (_repo, cache, user_id, list) = seeded_cache().await;

    let err = toggle_favorite_optimistic(&cache, &FailingRepository, user_id, list[0].id, true)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::DatabaseError);
    assert_eq!(cache.get(user_id).await.unwrap(), list);
    assert_eq!(cache.pending_changes(), 0);
}

#[tokio::test]
async fn test_toggle_on_missing_row_rolls_back() {
    let (repo, cache, user_id, list) = seeded_cache().await;

    let err = toggle_favorite_optimistic(&cache, &repo, user_id, Uuid::new_v4(), true)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(cache.get(user_id).await.unwrap(), list);
}

#[tokio::test]
async fn test_staged_change_is_visible_before_commit() {
    let (_repo, cache, user_id, list) = seeded_cache().await;
    let removed = list[0].id;

    let staged = cache
        .stage(user_id, ProjectionChange::Remove { projection_id: removed })
        .await;
    assert_eq!(cache.pending_changes(), 1);
    assert_eq!(staged.user_id(), user_id);

    let cached = cache.get(user_id).await.unwrap();
    assert_eq!(cached.len(), 1);
    assert!(cached.iter().all(|p| p.id != removed));

    cache.rollback(staged).await;
    assert_eq!(cache.get(user_id).await.unwrap(), list);
    assert_eq!(cache.pending_changes(), 0);
}

#[tokio::test]
async fn test_rename_commit_persists_locally() {
    let (_repo, cache, user_id, list) = seeded_cache().await;

    let staged = cache
        .stage(
            user_id,
            ProjectionChange::Rename {
                projection_id: list[1].id,
                name: "renamed".to_owned(),
            },
        )
        .await;
    cache.commit(staged);

    let cached = cache.get(user_id).await.unwrap();
    assert_eq!(cached[1].name, "renamed");
    assert_eq!(cached[0].name, list[0].name);
}

#[tokio::test]
async fn test_rollback_without_cached_list_leaves_cache_empty() {
    common::init_test_logging();
    let cache = ProjectionListCache::new();
    let user_id = Uuid::new_v4();

    let err = toggle_favorite_optimistic(&cache, &FailingRepository, user_id, Uuid::new_v4(), true)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::DatabaseError);
    assert!(cache.get(user_id).await.is_none());
}
