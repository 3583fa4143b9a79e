// ABOUTME: Integration tests for the projection service
// ABOUTME: Covers preview, save with derived fields, listing, favorites and optimistic delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

// Test files: allow missing_docs (rustc lint) and unwrap (valid in tests)
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use common::{assert_close, create_test_repository, create_test_service};
use twinforge_fit::{
    constants::shape_keys::{FAT_PROXY, MUSCLE_PROXY},
    errors::ErrorCode,
    intelligence::{ProjectionCalculator, StaticMorphologyRanges},
    models::{BodyState, Gender, ProjectionDuration, ProjectionParams},
    services::{ProjectionService, SaveProjectionRequest},
};
use uuid::Uuid;

fn request(name: &str, params: ProjectionParams) -> SaveProjectionRequest {
    let mut values = BTreeMap::new();
    values.insert(FAT_PROXY.to_owned(), 1.0);
    values.insert(MUSCLE_PROXY.to_owned(), 0.0);
    values.insert("narrowWaist".to_owned(), 0.3);

    SaveProjectionRequest {
        name: name.to_owned(),
        description: None,
        base_scan_id: Some(Uuid::new_v4()),
        base: BodyState::from_shape_map(&values),
        gender: Gender::Male,
        params,
    }
}

#[tokio::test]
async fn test_save_stores_projected_values_and_changes() {
    let service = create_test_service().await;
    let user_id = Uuid::new_v4();
    let params = ProjectionParams::new(5, 5, ProjectionDuration::OneYear);

    let preview = service.preview(&BodyState::new(1.0, 0.0), Gender::Male, &params);
    let saved = service.save(user_id, request("Year plan", params)).await.unwrap();

    assert_close(saved.projected_fat_proxy, preview.fat_proxy);
    assert_close(saved.projected_muscle_proxy, preview.muscle_proxy);
    assert_close(saved.fat_change, preview.fat_proxy - 1.0);
    assert_close(saved.muscle_change, preview.muscle_proxy);
    assert_close(saved.projected_morph_values[FAT_PROXY], preview.fat_proxy);
    assert_close(saved.projected_morph_values["narrowWaist"], 0.3);
    assert_eq!(saved.time_period_months, 12);
    assert_eq!(saved.activity_level, 5);
}

#[tokio::test]
async fn test_save_rejects_out_of_range_params() {
    let service = create_test_service().await;
    let user_id = Uuid::new_v4();

    let err = service
        .save(
            user_id,
            request("bad", ProjectionParams::new(0, 3, ProjectionDuration::OneYear)),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert!(service.list(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_refuses_uncomputable_projection() {
    let service = ProjectionService::new(
        ProjectionCalculator::new(StaticMorphologyRanges::empty()),
        Arc::new(create_test_repository().await),
    );
    let user_id = Uuid::new_v4();

    let err = service
        .save(
            user_id,
            request("no ranges", ProjectionParams::new(4, 4, ProjectionDuration::SixMonths)),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceUnavailable);
    assert_eq!(err.context.user_id, Some(user_id));
}

#[tokio::test]
async fn test_list_refreshes_cache_and_save_invalidates_it() {
    let service = create_test_service().await;
    let user_id = Uuid::new_v4();
    let params = ProjectionParams::new(4, 3, ProjectionDuration::ThreeMonths);

    service.save(user_id, request("first", params)).await.unwrap();
    let listed = service.list(user_id).await.unwrap();
    assert_eq!(service.cache().get(user_id).await.unwrap(), listed);

    service.save(user_id, request("second", params)).await.unwrap();
    assert!(service.cache().get(user_id).await.is_none());

    let names: Vec<String> = service
        .list(user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["second".to_owned(), "first".to_owned()]);
}

#[tokio::test]
async fn test_set_favorite_updates_cache_and_storage() {
    let service = create_test_service().await;
    let user_id = Uuid::new_v4();
    let params = ProjectionParams::new(4, 4, ProjectionDuration::OneYear);

    let saved = service.save(user_id, request("fav", params)).await.unwrap();
    service.list(user_id).await.unwrap();

    service.set_favorite(user_id, saved.id, true).await.unwrap();
    assert!(service.cache().get(user_id).await.unwrap()[0].is_favorite);

    let favorites = service.favorites(user_id).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, saved.id);
}

#[tokio::test]
async fn test_delete_missing_projection_restores_cache() {
    let service = create_test_service().await;
    let user_id = Uuid::new_v4();
    let params = ProjectionParams::new(2, 2, ProjectionDuration::SixMonths);

    let saved = service.save(user_id, request("keep", params)).await.unwrap();
    let listed = service.list(user_id).await.unwrap();

    let err = service.delete(user_id, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(service.cache().get(user_id).await.unwrap(), listed);

    service.delete(user_id, saved.id).await.unwrap();
    assert!(service.cache().get(user_id).await.unwrap().is_empty());
    assert!(service.list(user_id).await.unwrap().is_empty());
    assert_eq!(service.cache().pending_changes(), 0);
}
