// ABOUTME: PostgreSQL database implementation of the DatabaseProvider trait
// ABOUTME: Native UUID, TIMESTAMPTZ and JSONB columns with RETURNING-based updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors

//! `PostgreSQL` database implementation

use std::collections::BTreeMap;
use std::time::Duration;

use super::DatabaseProvider;
use crate::config::DatabaseConfig;
use crate::constants::storage::{DEFAULT_CALORIC_BALANCE, PROJECTION_ENTITY};
use crate::database::projections::{
    validate_create_input, validate_update_input, PROJECTION_COLUMNS,
};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::{
    CreateProjectionInput, ProjectionDuration, SavedProjection, UpdateProjectionInput,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

/// `PostgreSQL` database implementation
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    /// Underlying connection pool
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn projection_not_found(projection_id: Uuid) -> AppError {
    DatabaseError::NotFound {
        entity_type: PROJECTION_ENTITY,
        entity_id: projection_id.to_string(),
    }
    .into()
}

#[async_trait]
impl DatabaseProvider for PostgresDatabase {
    async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let pool_config = &config.postgres_pool;
        debug!(
            max_connections = pool_config.max_connections,
            min_connections = pool_config.min_connections,
            acquire_timeout_secs = pool_config.acquire_timeout_secs,
            "Opening PostgreSQL pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(pool_config.max_connections)
            .min_connections(pool_config.min_connections)
            .acquire_timeout(Duration::from_secs(pool_config.acquire_timeout_secs))
            .connect(&config.url.to_connection_string())
            .await
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("Failed to connect to PostgreSQL: {e}"),
            })?;

        Ok(Self { pool })
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS body_projections (
                id UUID PRIMARY KEY,
                user_id UUID NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                base_scan_id UUID,
                nutrition_quality INTEGER NOT NULL,
                sport_intensity INTEGER NOT NULL,
                duration_key TEXT NOT NULL,
                projected_pear_figure DOUBLE PRECISION NOT NULL,
                projected_bodybuilder_size DOUBLE PRECISION NOT NULL,
                fat_change DOUBLE PRECISION NOT NULL,
                muscle_change DOUBLE PRECISION NOT NULL,
                projected_morph_values JSONB NOT NULL DEFAULT '{}'::jsonb,
                is_favorite BOOLEAN NOT NULL DEFAULT FALSE,
                activity_level INTEGER NOT NULL,
                caloric_balance INTEGER NOT NULL DEFAULT 0,
                time_period_months INTEGER NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
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

    async fn list_projections(
        &self,
        user_id: Uuid,
        favorites_only: bool,
    ) -> AppResult<Vec<SavedProjection>> {
        let filter = if favorites_only {
            "AND is_favorite = TRUE"
        } else {
            ""
        };
        let query = format!(
            "SELECT {PROJECTION_COLUMNS} FROM body_projections \
             WHERE user_id = $1 {filter} \
             ORDER BY created_at DESC, id DESC"
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list projections: {e}")))?;

        rows.iter().map(row_to_projection).collect()
    }

    async fn get_projection(&self, projection_id: Uuid) -> AppResult<Option<SavedProjection>> {
        let query = format!("SELECT {PROJECTION_COLUMNS} FROM body_projections WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(projection_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get projection: {e}")))?;

        row.as_ref().map(row_to_projection).transpose()
    }

    async fn create_projection(
        &self,
        user_id: Uuid,
        input: &CreateProjectionInput,
    ) -> AppResult<SavedProjection> {
        validate_create_input(input)?;

        let now = Utc::now();
        let params = input.params;
        let query = format!(
            "INSERT INTO body_projections (
                id, user_id, name, description, base_scan_id,
                nutrition_quality, sport_intensity, duration_key,
                projected_pear_figure, projected_bodybuilder_size,
                fat_change, muscle_change, projected_morph_values,
                is_favorite, activity_level, caloric_balance, time_period_months,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, FALSE, $14, $15, $16, $17, $17)
            RETURNING {PROJECTION_COLUMNS}"
        );

        let row = sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.base_scan_id)
            .bind(params.nutrition_quality)
            .bind(params.sport_intensity)
            .bind(params.duration.as_str())
            .bind(input.projected_fat_proxy)
            .bind(input.projected_muscle_proxy)
            .bind(input.fat_change)
            .bind(input.muscle_change)
            .bind(Json(&input.projected_morph_values))
            .bind(params.sport_intensity)
            .bind(DEFAULT_CALORIC_BALANCE)
            .bind(params.duration.months())
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create projection: {e}")))?;

        row_to_projection(&row)
    }

    async fn update_projection(
        &self,
        projection_id: Uuid,
        input: &UpdateProjectionInput,
    ) -> AppResult<SavedProjection> {
        validate_update_input(input)?;

        let params = input.params;
        let query = format!(
            "UPDATE body_projections SET
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
            RETURNING {PROJECTION_COLUMNS}"
        );

        let row = sqlx::query(&query)
            .bind(projection_id)
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
            .bind(input.projected_morph_values.as_ref().map(Json))
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update projection: {e}")))?;

        row.as_ref()
            .map(row_to_projection)
            .transpose()?
            .ok_or_else(|| projection_not_found(projection_id))
    }

    async fn set_projection_favorite(
        &self,
        projection_id: Uuid,
        is_favorite: bool,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE body_projections SET is_favorite = $1, updated_at = $2
            WHERE id = $3
            ",
        )
        .bind(is_favorite)
        .bind(Utc::now())
        .bind(projection_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update favorite flag: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(projection_not_found(projection_id));
        }
        Ok(())
    }

    async fn delete_projection(&self, projection_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM body_projections WHERE id = $1")
            .bind(projection_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete projection: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(projection_not_found(projection_id));
        }
        Ok(())
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> AppResult<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DatabaseError::from(e).into())
}

/// Convert a database row to a `SavedProjection`
fn row_to_projection(row: &PgRow) -> AppResult<SavedProjection> {
    let duration_key: String = column(row, "duration_key")?;
    let Json(projected_morph_values): Json<BTreeMap<String, f64>> =
        column(row, "projected_morph_values")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    Ok(SavedProjection {
        id: column(row, "id")?,
        user_id: column(row, "user_id")?,
        name: column(row, "name")?,
        description: column(row, "description")?,
        base_scan_id: column(row, "base_scan_id")?,
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
        created_at,
        updated_at,
    })
}
