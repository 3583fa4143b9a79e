// ABOUTME: TwinForge CLI - command-line access to body projections
// ABOUTME: Previews projections and manages saved projections for a user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TwinForge Fit Contributors
//!
//! Usage:
//! ```bash
//! # Preview a one-year projection for a female body model
//! twinforge-cli calculate --fat 0.8 --muscle 0.2 --gender female \
//!     --nutrition 4 --sport 4 --duration 1_year
//!
//! # Same preview as JSON
//! twinforge-cli calculate --fat 0.8 --muscle 0.2 --gender female \
//!     --nutrition 4 --sport 4 --duration 1_year --json
//!
//! # Save it for a user
//! twinforge-cli save --user 6f0c... --name "Summer plan" --fat 0.8 --muscle 0.2 \
//!     --gender female --nutrition 4 --sport 4 --duration 1_year
//!
//! # List a user's projections (favorites only with --favorites)
//! twinforge-cli list --user 6f0c...
//!
//! # Mark a projection as favorite, then delete it
//! twinforge-cli favorite --user 6f0c... --id 1a2b... --value true
//! twinforge-cli delete --user 6f0c... --id 1a2b...
//! ```

mod commands;
mod helpers;

use std::env;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use twinforge_fit::{
    config::{DatabaseUrl, ServerConfig},
    database::ProjectionRepositoryImpl,
    database_plugins::factory::Database,
    intelligence::{ProjectionCalculator, StaticMorphologyRanges},
    models::{BodyState, Gender, ProjectionDuration, ProjectionParams},
    services::ProjectionService,
};
use uuid::Uuid;

const DEFAULT_CLI_DATABASE_URL: &str = "sqlite:./twinforge.db";

#[derive(Parser)]
#[command(
    name = "twinforge-cli",
    about = "TwinForge Fit projection CLI",
    long_about = "Compute body morphology projections and manage saved projections."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// JSON file with morphology ranges (defaults to built-in ranges)
    #[arg(long, global = true)]
    ranges: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Base body state and lifestyle inputs shared by `calculate` and `save`
#[derive(clap::Args)]
struct ProjectionArgs {
    /// Current fat proxy value
    #[arg(long, allow_hyphen_values = true)]
    fat: f64,

    /// Current muscle proxy value
    #[arg(long, allow_hyphen_values = true)]
    muscle: f64,

    /// Body model gender (male or female)
    #[arg(long, value_parser = parse_gender)]
    gender: Gender,

    /// Nutrition quality, 1 (poor) to 5 (excellent)
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
    nutrition: i32,

    /// Sport intensity, 1 (sedentary) to 5 (intense)
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
    sport: i32,

    /// Horizon: 3_months, 6_months, 1_year or 3_years
    #[arg(long, value_parser = parse_duration)]
    duration: ProjectionDuration,
}

impl ProjectionArgs {
    const fn base(&self) -> BodyState {
        BodyState::new(self.fat, self.muscle)
    }

    const fn params(&self) -> ProjectionParams {
        ProjectionParams::new(self.nutrition, self.sport, self.duration)
    }
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute a projection without saving it
    Calculate {
        #[command(flatten)]
        projection: ProjectionArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute and save a projection for a user
    Save {
        /// Owning user ID
        #[arg(long)]
        user: Uuid,

        /// Projection name
        #[arg(long)]
        name: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,

        /// Scan the base state came from
        #[arg(long)]
        scan: Option<Uuid>,

        #[command(flatten)]
        projection: ProjectionArgs,
    },

    /// List a user's saved projections, newest first
    List {
        /// Owning user ID
        #[arg(long)]
        user: Uuid,

        /// Only favorites
        #[arg(long)]
        favorites: bool,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set or clear the favorite flag
    Favorite {
        /// Projection ID
        #[arg(long)]
        id: Uuid,

        /// New flag value
        #[arg(long, action = clap::ArgAction::Set)]
        value: bool,

        /// Owning user ID
        #[arg(long)]
        user: Uuid,
    },

    /// Delete a saved projection
    Delete {
        /// Projection ID
        #[arg(long)]
        id: Uuid,

        /// Owning user ID
        #[arg(long)]
        user: Uuid,
    },
}

fn parse_gender(s: &str) -> Result<Gender, String> {
    Gender::parse(s).map_err(|e| e.to_string())
}

fn parse_duration(s: &str) -> Result<ProjectionDuration, String> {
    ProjectionDuration::parse(s).map_err(|e| e.to_string())
}

fn load_ranges(path: Option<&str>) -> anyhow::Result<StaticMorphologyRanges> {
    let Some(path) = path else {
        return Ok(StaticMorphologyRanges::with_defaults());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read morphology ranges from {path}"))?;
    StaticMorphologyRanges::from_json(&json)
        .with_context(|| format!("Invalid morphology ranges in {path}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::from_env().context("Failed to load configuration")?;
    if cli.verbose {
        config.logging = config.logging.verbose();
    }
    config.logging.init()?;

    info!("TwinForge Fit CLI");

    let calculator = ProjectionCalculator::new(load_ranges(cli.ranges.as_deref())?);

    // Pure calculation needs no database
    if let Command::Calculate { projection, json } = &cli.command {
        let result =
            calculator.calculate_projection(&projection.base(), projection.gender, &projection.params());
        return commands::projection::show_calculation(&result, &projection.params(), *json);
    }

    let database_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_CLI_DATABASE_URL.to_owned());
    config.database.url = DatabaseUrl::parse_url(&database_url)?;
    config.log_summary();

    info!("Connecting to database: {}", config.database.url);
    let database = Database::connect(&config.database).await?;
    info!("Using {}", database.backend_info());

    let service = ProjectionService::new(
        calculator,
        Arc::new(ProjectionRepositoryImpl::new(database)),
    );

    match cli.command {
        Command::Calculate { .. } => {}
        Command::Save {
            user,
            name,
            description,
            scan,
            projection,
        } => {
            commands::projection::save(&service, user, name, description, scan, &projection)
                .await?;
        }
        Command::List {
            user,
            favorites,
            json,
        } => {
            commands::projection::list(&service, user, favorites, json).await?;
        }
        Command::Favorite { id, value, user } => {
            commands::projection::favorite(&service, user, id, value).await?;
        }
        Command::Delete { id, user } => {
            commands::projection::delete(&service, user, id).await?;
        }
    }

    Ok(())
}
