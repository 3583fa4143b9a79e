// ABOUTME: Morphology range lookup used to bound projected shape values
// ABOUTME: MorphologyRangeProvider trait with a static, JSON-loadable implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use twinforge_core::constants::shape_keys::{FAT_PROXY, MUSCLE_PROXY};
use twinforge_core::errors::{AppError, AppResult, ErrorCode};
use twinforge_core::models::{Gender, MorphologyRange};

/// Source of per-gender bounds for shape keys
///
/// Implementations are queried synchronously from inside the calculator and
/// must not block.
pub trait MorphologyRangeProvider: Send + Sync {
    /// Bounds for `shape_key` on a body of `gender`, or `None` when unmapped
    fn morph_value_range(&self, shape_key: &str, gender: Gender) -> Option<MorphologyRange>;
}

impl<T: MorphologyRangeProvider + ?Sized> MorphologyRangeProvider for Arc<T> {
    fn morph_value_range(&self, shape_key: &str, gender: Gender) -> Option<MorphologyRange> {
        (**self).morph_value_range(shape_key, gender)
    }
}

impl<T: MorphologyRangeProvider + ?Sized> MorphologyRangeProvider for &T {
    fn morph_value_range(&self, shape_key: &str, gender: Gender) -> Option<MorphologyRange> {
        (**self).morph_value_range(shape_key, gender)
    }
}

/// In-memory range table keyed by gender and shape key
#[derive(Debug, Clone, Default)]
pub struct StaticMorphologyRanges {
    ranges: HashMap<(Gender, String), MorphologyRange>,
}

#[derive(Deserialize)]
struct RangeTableFile {
    #[serde(default)]
    male: HashMap<String, MorphologyRange>,
    #[serde(default)]
    female: HashMap<String, MorphologyRange>,
}

impl StaticMorphologyRanges {
    /// Empty table; every lookup misses
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in bounds for the two modelled shape keys
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::empty()
            .with_range(Gender::Male, FAT_PROXY, MorphologyRange::new(-1.0, 2.0))
            .with_range(Gender::Male, MUSCLE_PROXY, MorphologyRange::new(-0.5, 2.5))
            .with_range(Gender::Female, FAT_PROXY, MorphologyRange::new(-1.0, 2.0))
            .with_range(Gender::Female, MUSCLE_PROXY, MorphologyRange::new(-0.5, 1.5))
    }

    /// Add or replace one range
    #[must_use]
    pub fn with_range(mut self, gender: Gender, shape_key: &str, range: MorphologyRange) -> Self {
        self.insert(gender, shape_key, range);
        self
    }

    /// Add or replace one range in place
    pub fn insert(&mut self, gender: Gender, shape_key: &str, range: MorphologyRange) {
        self.ranges.insert((gender, shape_key.to_owned()), range);
    }

    /// Remove a range; subsequent lookups for it return `None`
    pub fn remove(&mut self, gender: Gender, shape_key: &str) -> Option<MorphologyRange> {
        self.ranges.remove(&(gender, shape_key.to_owned()))
    }

    /// Number of mapped (gender, key) pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether no range is mapped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Load a table from JSON of the form
    /// `{"male": {"pearFigure": {"min": -1.0, "max": 2.0}}, "female": {...}}`
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the JSON does not parse, or
    /// `ValueOutOfRange` if any range has `min > max`
    pub fn from_json(json: &str) -> AppResult<Self> {
        let file: RangeTableFile = serde_json::from_str(json).map_err(|e| {
            AppError::new(
                ErrorCode::InvalidFormat,
                format!("Invalid morphology range table: {e}"),
            )
        })?;

        let mut table = Self::empty();
        for (gender, entries) in [(Gender::Male, file.male), (Gender::Female, file.female)] {
            for (shape_key, range) in entries {
                if range.min > range.max {
                    return Err(AppError::out_of_range(format!(
                        "Range for {shape_key} ({gender}) has min {} greater than max {}",
                        range.min, range.max
                    )));
                }
                table.ranges.insert((gender, shape_key), range);
            }
        }
        Ok(table)
    }
}

impl MorphologyRangeProvider for StaticMorphologyRanges {
    fn morph_value_range(&self, shape_key: &str, gender: Gender) -> Option<MorphologyRange> {
        self.ranges.get(&(gender, shape_key.to_owned())).copied()
    }
}
