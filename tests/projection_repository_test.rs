// ABOUTME: Integration tests for saved-projection persistence on SQLite
// ABOUTME: Tests CRUD operations, favorites, ordering, partial updates, and per-user isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

// Test files: allow missing_docs (rustc lint) and unwrap (valid in tests)
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use std::collections::BTreeMap;

use common::{assert_close, create_test_repository, sample_input};
use twinforge_fit::{
    constants::shape_keys::FAT_PROXY,
    database::ProjectionRepository,
    errors::ErrorCode,
    models::{ProjectionDuration, ProjectionParams, UpdateProjectionInput},
};
use uuid::Uuid;

#[tokio::test]
async fn test_create_populates_derived_columns() {
    let repo = create_test_repository().await;
    let user_id = Uuid::new_v4();
    let scan_id = Uuid::new_v4();

    let mut input = sample_input("Summer cut");
    input.base_scan_id = Some(scan_id);
    let saved = repo.create_projection(user_id, input).await.unwrap();

    assert_eq!(saved.user_id, user_id);
    assert_eq!(saved.name, "Summer cut");
    assert_eq!(saved.base_scan_id, Some(scan_id));
    assert_eq!(saved.duration_key, ProjectionDuration::SixMonths);
    assert!(!saved.is_favorite);
    assert_eq!(saved.activity_level, saved.sport_intensity);
    assert_eq!(saved.caloric_balance, 0);
    assert_eq!(saved.time_period_months, 6);
    assert_close(saved.fat_change, -0.375);
    assert_close(saved.projected_morph_values["narrowWaist"], 0.25);
    assert_eq!(saved.created_at, saved.updated_at);

    let fetched = repo.get_projection(saved.id).await.unwrap().unwrap();
    assert_eq!(fetched, saved);
}

#[tokio::test]
async fn test_user_projections_are_newest_first() {
    let repo = create_test_repository().await;
    let user_id = Uuid::new_v4();

    let first = repo.create_projection(user_id, sample_input("first")).await.unwrap();
    let second = repo.create_projection(user_id, sample_input("second")).await.unwrap();
    let third = repo.create_projection(user_id, sample_input("third")).await.unwrap();

    let ids: Vec<Uuid> = repo
        .get_user_projections(user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn test_projections_are_isolated_per_user() {
    let repo = create_test_repository().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.create_projection(alice, sample_input("alice plan")).await.unwrap();
    repo.create_projection(bob, sample_input("bob plan")).await.unwrap();

    let alice_list = repo.get_user_projections(alice).await.unwrap();
    assert_eq!(alice_list.len(), 1);
    assert_eq!(alice_list[0].name, "alice plan");
    assert!(repo.get_user_projections(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_favorites_follow_toggle() {
    let repo = create_test_repository().await;
    let user_id = Uuid::new_v4();

    let kept = repo.create_projection(user_id, sample_input("kept")).await.unwrap();
    repo.create_projection(user_id, sample_input("other")).await.unwrap();
    assert!(repo.get_favorite_projections(user_id).await.unwrap().is_empty());

    repo.toggle_favorite(kept.id, true).await.unwrap();
    let favorites = repo.get_favorite_projections(user_id).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, kept.id);
    assert!(favorites[0].is_favorite);
    assert!(favorites[0].updated_at >= kept.updated_at);

    repo.toggle_favorite(kept.id, false).await.unwrap();
    assert!(repo.get_favorite_projections(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_leaves_other_projection_untouched() {
    let repo = create_test_repository().await;
    let user_id = Uuid::new_v4();

    let a = repo.create_projection(user_id, sample_input("a")).await.unwrap();
    let b = repo.create_projection(user_id, sample_input("b")).await.unwrap();
    let b = repo.get_projection(b.id).await.unwrap().unwrap();

    repo.toggle_favorite(a.id, true).await.unwrap();

    let list = repo.get_user_projections(user_id).await.unwrap();
    let b_after = list.iter().find(|p| p.id == b.id).unwrap();
    assert_eq!(*b_after, b);
    assert_eq!(b_after.updated_at, b.updated_at);
    assert!(!b_after.is_favorite);
    assert_eq!(repo.get_projection(b.id).await.unwrap().unwrap(), b);
    assert!(list.iter().find(|p| p.id == a.id).unwrap().is_favorite);
}

#[tokio::test]
async fn test_update_changes_only_provided_fields() {
    let repo = create_test_repository().await;
    let saved = repo
        .create_projection(Uuid::new_v4(), sample_input("draft"))
        .await
        .unwrap();

    let updated = repo
        .update_projection(
            saved.id,
            UpdateProjectionInput {
                name: Some("final".to_owned()),
                ..UpdateProjectionInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "final");
    assert_eq!(updated.description, saved.description);
    assert_eq!(updated.params(), saved.params());
    assert_close(updated.projected_fat_proxy, saved.projected_fat_proxy);
    assert_eq!(updated.projected_morph_values, saved.projected_morph_values);
    assert_eq!(updated.created_at, saved.created_at);
    assert!(updated.updated_at >= saved.updated_at);
}

#[tokio::test]
async fn test_update_params_rewrites_legacy_columns() {
    let repo = create_test_repository().await;
    let saved = repo
        .create_projection(Uuid::new_v4(), sample_input("plan"))
        .await
        .unwrap();

    let mut morph = BTreeMap::new();
    morph.insert(FAT_PROXY.to_owned(), -0.1);
    let updated = repo
        .update_projection(
            saved.id,
            UpdateProjectionInput {
                params: Some(ProjectionParams::new(5, 2, ProjectionDuration::ThreeYears)),
                projected_fat_proxy: Some(-0.1),
                projected_morph_values: Some(morph.clone()),
                ..UpdateProjectionInput::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.nutrition_quality, 5);
    assert_eq!(updated.sport_intensity, 2);
    assert_eq!(updated.activity_level, 2);
    assert_eq!(updated.duration_key, ProjectionDuration::ThreeYears);
    assert_eq!(updated.time_period_months, 36);
    assert_close(updated.projected_fat_proxy, -0.1);
    assert_eq!(updated.projected_morph_values, morph);
    assert_eq!(updated.name, "plan");
}

#[tokio::test]
async fn test_missing_projection_is_not_found() {
    let repo = create_test_repository().await;
    let missing = Uuid::new_v4();

    assert!(repo.get_projection(missing).await.unwrap().is_none());

    let err = repo
        .update_projection(
            missing,
            UpdateProjectionInput {
                name: Some("nope".to_owned()),
                ..UpdateProjectionInput::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = repo.toggle_favorite(missing, true).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = repo.delete_projection(missing).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_delete_removes_projection() {
    let repo = create_test_repository().await;
    let user_id = Uuid::new_v4();
    let saved = repo.create_projection(user_id, sample_input("gone")).await.unwrap();

    repo.delete_projection(saved.id).await.unwrap();

    assert!(repo.get_projection(saved.id).await.unwrap().is_none());
    assert!(repo.get_user_projections(user_id).await.unwrap().is_empty());
    assert_eq!(
        repo.delete_projection(saved.id).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let repo = create_test_repository().await;
    let user_id = Uuid::new_v4();

    let err = repo
        .create_projection(user_id, sample_input("   "))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    let mut input = sample_input("too much");
    input.params = ProjectionParams::new(6, 3, ProjectionDuration::OneYear);
    let err = repo.create_projection(user_id, input).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    assert!(repo.get_user_projections(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_rejects_blank_name() {
    let repo = create_test_repository().await;
    let saved = repo
        .create_projection(Uuid::new_v4(), sample_input("named"))
        .await
        .unwrap();

    let err = repo
        .update_projection(
            saved.id,
            UpdateProjectionInput {
                name: Some(String::new()),
                ..UpdateProjectionInput::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert_eq!(
        repo.get_projection(saved.id).await.unwrap().unwrap().name,
        "named"
    );
}
