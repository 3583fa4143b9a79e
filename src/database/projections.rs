// ABOUTME: Database operations for saved body projections on SQLite
// ABOUTME: Per-user CRUD and favorite toggle over the body_projections table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::constants::storage::{DEFAULT_CALORIC_BALANCE, PROJECTION_ENTITY};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::{
    CreateProjectionInput, ProjectionDuration, ProjectionParams, SavedProjection,
    UpdateProjectionInput,
};

/// Columns selected for every `SavedProjection` read
pub const PROJECTION_COLUMNS: &str = "id, user_id, name, description, base_scan_id, \
    nutrition_quality, sport_intensity, duration_key, projected_pear_figure, \
    projected_bodybuilder_size, fat_change, muscle_change, projected_morph_values, \
    is_favorite, activity_level, caloric_balance, time_period_months, created_at, updated_at";

/// Timestamp format stored in TEXT columns; fixed width so it sorts lexically
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Reject create input with an empty name or params outside `1..=5`
///
/// # Errors
///
/// Returns `MissingRequiredField` or `ValueOutOfRange`
pub fn validate_create_input(input: &CreateProjectionInput) -> AppResult<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::missing_field("name"));
    }
    input.params.validate()
}

/// Reject update input that would blank the name or carries invalid params
///
/// # Errors
///
/// Returns `MissingRequiredField` or `ValueOutOfRange`
pub fn validate_update_input(input: &UpdateProjectionInput) -> AppResult<()> {
    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::missing_field("name"));
    }
    input
        .params
        .as_ref()
        .map_or(Ok(()), ProjectionParams::validate)
}

/// Encode a shape map for the JSON column
///
/// # Errors
///
/// Returns a serialization error if encoding fails
pub fn encode_morph_values(values: &BTreeMap<String, f64>) -> AppResult<String> {
    serde_json::to_string(values).map_err(|e| DatabaseError::from(e).into())
}

fn projection_not_found(projection_id: Uuid) -> AppError {
    DatabaseError::NotFound {
        entity_type: PROJECTION_ENTITY,
        entity_id: projection_id.to_string(),
    }
    .into()
}

/// Saved projection database operations on `SQLite`
pub struct ProjectionsManager {
    pool: SqlitePool,
}

impl ProjectionsManager {
    /// Create a new projections manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `body_projections` table and its listing index
    ///
    /// # Errors
    ///
    /// Returns an error if either statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS body_projections (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                base_scan_id TEXT,
                nutrition_quality INTEGER NOT NULL,
                sport_intensity INTEGER NOT NULL,
                duration_key TEXT NOT NULL,
                projected_pear_figure REAL NOT NULL,
                projected_bodybuilder_size REAL NOT NULL,
                fat_change REAL NOT NULL,
                muscle_change REAL NOT NULL,
                projected_morph_values TEXT NOT NULL DEFAULT '{}',
                is_favorite INTEGER NOT NULL DEFAULT 0,
                activity_level INTEGER NOT NULL,
                caloric_balance INTEGER NOT NULL DEFAULT 0,
                time_period_months INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::MigrationError {
            context: format!("Failed to create body_projections table: {e}"),
        })?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_body_projections_user_created
            ON body_projections(user_id, created_at DESC)
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::MigrationError {
            context: format!("Failed to create body_projections index: {e}"),
        })?;

        Ok(())
    }

    /// All projections for a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        favorites_only: bool,
    ) -> AppResult<Vec<SavedProjection>> {
        let filter = if favorites_only {
            "AND is_favorite = 1"
        } else {
            ""
        };
        let query = format!(
            "SELECT {PROJECTION_COLUMNS} FROM body_projections \
             WHERE user_id = $1 {filter} \
             ORDER BY created_at DESC, rowid DESC"
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list projections: {e}")))?;

        rows.iter().map(row_to_projection).collect()
    }

    /// Fetch one projection by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get(&self, projection_id: Uuid) -> AppResult<Option<SavedProjection>> {
        let query = format!("SELECT {PROJECTION_COLUMNS} FROM body_projections WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(projection_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get projection: {e}")))?;

        row.as_ref().map(row_to_projection).transpose()
    }

    /// Insert a new projection owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the insert fails
    pub async fn create(
        &self,
        user_id: Uuid,
        input: &CreateProjectionInput,
    ) -> AppResult<SavedProjection> {
        validate_create_input(input)?;

        let id = Uuid::new_v4();
        let now = Utc::now();
        let now_str = format_timestamp(now);
        let morph_json = encode_morph_values(&input.projected_morph_values)?;
        let params = input.params;

        sqlx::query(
            r"
            INSERT INTO body_projections (
                id, user_id, name, description, base_scan_id,
                nutrition_quality, sport_intensity, duration_key,
                projected_pear_figure, projected_bodybuilder_size,
                fat_change, muscle_change, projected_morph_values,
                is_favorite, activity_level, caloric_balance, time_period_months,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 0, $14, $15, $16, $17, $18)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.base_scan_id.as_ref().map(ToString::to_string))
        .bind(params.nutrition_quality)
        .bind(params.sport_intensity)
        .bind(params.duration.as_str())
        .bind(input.projected_fat_proxy)
        .bind(input.projected_muscle_proxy)
        .bind(input.fat_change)
        .bind(input.muscle_change)
        .bind(&morph_json)
        .bind(params.sport_intensity)
        .bind(DEFAULT_CALORIC_BALANCE)
        .bind(params.duration.months())
        .bind(&now_str)
        .bind(&now_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create projection: {e}")))?;

        // Read back so the returned record matches storage precision
        self.get(id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Projection {id} missing after insert")))
    }

    /// Apply the fields present in `input`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no row has `projection_id`, or a
    /// validation/database error
    pub async fn update(
        &self,
        projection_id: Uuid,
        input: &UpdateProjectionInput,
    ) -> AppResult<SavedProjection> {
        validate_update_input(input)?;

        let now_str = format_timestamp(Utc::now());
        let morph_json = input
            .projected_morph_values
            .as_ref()
            .map(encode_morph_values)
            .transpose()?;
        let params = input.params;

        let result = sqlx::query(
            r"
            UPDATE body_projections SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                nutrition_quality = COALESCE($4, nutrition_quality),
                sport_intensity = COALESCE($5, sport_intensity),
                duration_key = COALESCE($6, duration_key),
                activity_level = COALESCE($7, activity_level),
                time_period_months = COALESCE($8, time_period_months),
                projected_pear_figure = COALESCE($9, projected_pear_figure),
                projected_bodybuilder_size = COALESCE($10, projected_bodybuilder_size),
                fat_change = COALESCE($11, fat_change),
                muscle_change = COALESCE($12, muscle_change),
                projected_morph_values = COALESCE($13, projected_morph_values),
                updated_at = $14
            WHERE id = $1
            ",
        )
        .bind(projection_id.to_string())
        .bind(&input.name)
        .bind(&input.description)
        .bind(params.map(|p| p.nutrition_quality))
        .bind(params.map(|p| p.sport_intensity))
        .bind(params.map(|p| p.duration.as_str()))
        .bind(params.map(|p| p.sport_intensity))
        .bind(params.map(|p| p.duration.months()))
        .bind(input.projected_fat_proxy)
        .bind(input.projected_muscle_proxy)
        .bind(input.fat_change)
        .bind(input.muscle_change)
        .bind(morph_json)
        .bind(&now_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update projection: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(projection_not_found(projection_id));
        }

        self.get(projection_id)
            .await?
            .ok_or_else(|| projection_not_found(projection_id))
    }

    /// Set the favorite flag
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no row has `projection_id`
    pub async fn set_favorite(&self, projection_id: Uuid, is_favorite: bool) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE body_projections SET is_favorite = $1, updated_at = $2
            WHERE id = $3
            ",
        )
        .bind(is_favorite)
        .bind(format_timestamp(Utc::now()))
        .bind(projection_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update favorite flag: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(projection_not_found(projection_id));
        }
        Ok(())
    }

    /// Hard delete
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no row has `projection_id`
    pub async fn delete(&self, projection_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM body_projections WHERE id = $1")
            .bind(projection_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete projection: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(projection_not_found(projection_id));
        }
        Ok(())
    }
}

fn parse_uuid(field: &'static str, value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        DatabaseError::InvalidData {
            field,
            reason: format!("Invalid UUID: {e}"),
        }
        .into()
    })
}

fn parse_timestamp(field: &'static str, value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            DatabaseError::InvalidData {
                field,
                reason: format!("Invalid datetime: {e}"),
            }
            .into()
        })
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> AppResult<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| DatabaseError::from(e).into())
}

/// Convert a database row to a `SavedProjection`
fn row_to_projection(row: &SqliteRow) -> AppResult<SavedProjection> {
    let id: String = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let base_scan_id: Option<String> = column(row, "base_scan_id")?;
    let duration_key: String = column(row, "duration_key")?;
    let morph_json: String = column(row, "projected_morph_values")?;
    let created_at: String = column(row, "created_at")?;
    let updated_at: String = column(row, "updated_at")?;

    let projected_morph_values: BTreeMap<String, f64> =
        serde_json::from_str(&morph_json).map_err(DatabaseError::from)?;

    Ok(SavedProjection {
        id: parse_uuid("id", &id)?,
        user_id: parse_uuid("user_id", &user_id)?,
        name: column(row, "name")?,
        description: column(row, "description")?,
        base_scan_id: base_scan_id
            .as_deref()
            .map(|s| parse_uuid("base_scan_id", s))
            .transpose()?,
        nutrition_quality: column(row, "nutrition_quality")?,
        sport_intensity: column(row, "sport_intensity")?,
        duration_key: ProjectionDuration::parse(&duration_key)?,
        projected_fat_proxy: column(row, "projected_pear_figure")?,
        projected_muscle_proxy: column(row, "projected_bodybuilder_size")?,
        fat_change: column(row, "fat_change")?,
        muscle_change: column(row, "muscle_change")?,
        projected_morph_values,
        is_favorite: column(row, "is_favorite")?,
        activity_level: column(row, "activity_level")?,
        caloric_balance: column(row, "caloric_balance")?,
        time_period_months: column(row, "time_period_months")?,
        created_at: parse_timestamp("created_at", &created_at)?,
        updated_at: parse_timestamp("updated_at", &updated_at)?,
    })
}
