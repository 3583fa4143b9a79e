// ABOUTME: Optimistic in-memory snapshot of each user's saved-projection list
// ABOUTME: Local changes are staged before the repository call and rolled back on failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

//! Optimistic projection list
//!
//! The repository knows nothing about this cache. Callers stage a change,
//! which is applied to the cached list immediately, then issue the storage
//! call and either [`ProjectionListCache::commit`] or
//! [`ProjectionListCache::rollback`] depending on the outcome.
//! [`toggle_favorite_optimistic`] wires the three steps together.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::ProjectionRepository;
use crate::errors::AppResult;
use crate::models::SavedProjection;

/// A local edit to a cached projection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionChange {
    /// Set the favorite flag on one projection
    SetFavorite {
        /// Target projection
        projection_id: Uuid,
        /// New flag value
        is_favorite: bool,
    },
    /// Drop one projection from the list
    Remove {
        /// Target projection
        projection_id: Uuid,
    },
    /// Change the display name of one projection
    Rename {
        /// Target projection
        projection_id: Uuid,
        /// New name
        name: String,
    },
}

impl ProjectionChange {
    fn apply(&self, projections: &mut Vec<SavedProjection>) {
        match self {
            Self::SetFavorite {
                projection_id,
                is_favorite,
            } => {
                for p in projections.iter_mut().filter(|p| p.id == *projection_id) {
                    p.is_favorite = *is_favorite;
                }
            }
            Self::Remove { projection_id } => projections.retain(|p| p.id != *projection_id),
            Self::Rename {
                projection_id,
                name,
            } => {
                for p in projections.iter_mut().filter(|p| p.id == *projection_id) {
                    p.name.clone_from(name);
                }
            }
        }
    }
}

/// A change applied locally and awaiting confirmation
///
/// Hand it back to the cache with `commit` or `rollback`.
#[must_use = "a staged change must be committed or rolled back"]
#[derive(Debug)]
pub struct StagedChange {
    user_id: Uuid,
    change: ProjectionChange,
    previous: Option<Vec<SavedProjection>>,
}

impl StagedChange {
    /// User whose list was edited
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// The change that was applied
    #[must_use]
    pub const fn change(&self) -> &ProjectionChange {
        &self.change
    }
}

/// Per-user snapshot of saved projections
#[derive(Clone, Default)]
pub struct ProjectionListCache {
    entries: Arc<RwLock<HashMap<Uuid, Vec<SavedProjection>>>>,
    pending: Arc<AtomicUsize>,
}

impl ProjectionListCache {
    /// Empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the list for `user_id`, replacing any previous snapshot
    pub async fn replace(&self, user_id: Uuid, projections: Vec<SavedProjection>) {
        self.entries.write().await.insert(user_id, projections);
    }

    /// Cached list for `user_id`
    pub async fn get(&self, user_id: Uuid) -> Option<Vec<SavedProjection>> {
        self.entries.read().await.get(&user_id).cloned()
    }

    /// Drop the cached list for `user_id`
    pub async fn invalidate(&self, user_id: Uuid) {
        self.entries.write().await.remove(&user_id);
    }

    /// Number of staged changes not yet committed or rolled back
    #[must_use]
    pub fn pending_changes(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Apply `change` to the cached list and remember the prior snapshot
    ///
    /// When nothing is cached for `user_id` the change is recorded but has no
    /// local effect.
    pub async fn stage(&self, user_id: Uuid, change: ProjectionChange) -> StagedChange {
        let previous = {
            let mut entries = self.entries.write().await;
            entries.get_mut(&user_id).map(|list| {
                let snapshot = list.clone();
                change.apply(list);
                snapshot
            })
        };
        self.pending.fetch_add(1, Ordering::AcqRel);
        debug!(%user_id, ?change, cached = previous.is_some(), "Staged projection change");

        StagedChange {
            user_id,
            change,
            previous,
        }
    }

    /// Keep the staged change
    pub fn commit(&self, staged: StagedChange) {
        self.pending.fetch_sub(1, Ordering::AcqRel);
        debug!(user_id = %staged.user_id, change = ?staged.change, "Committed projection change");
    }

    /// Restore the snapshot taken when `staged` was created
    pub async fn rollback(&self, staged: StagedChange) {
        {
            let mut entries = self.entries.write().await;
            match staged.previous {
                Some(previous) => {
                    entries.insert(staged.user_id, previous);
                }
                None => {
                    entries.remove(&staged.user_id);
                }
            }
        }
        self.pending.fetch_sub(1, Ordering::AcqRel);
        warn!(user_id = %staged.user_id, change = ?staged.change, "Rolled back projection change");
    }
}

/// Flip the favorite flag locally, then persist it
///
/// On success the local change is kept. On failure the cached list is
/// restored and the storage error is returned.
///
/// # Errors
///
/// Returns whatever error the repository reported
pub async fn toggle_favorite_optimistic<R>(
    cache: &ProjectionListCache,
    repo: &R,
    user_id: Uuid,
    projection_id: Uuid,
    is_favorite: bool,
) -> AppResult<()>
where
    R: ProjectionRepository + ?Sized,
{
    let staged = cache
        .stage(
            user_id,
            ProjectionChange::SetFavorite {
                projection_id,
                is_favorite,
            },
        )
        .await;

    match repo.toggle_favorite(projection_id, is_favorite).await {
        Ok(()) => {
            cache.commit(staged);
            Ok(())
        }
        Err(e) => {
            cache.rollback(staged).await;
            Err(e)
        }
    }
}
