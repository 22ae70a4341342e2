// ABOUTME: Server binary for the fridge recipe recommendation API
// ABOUTME: Loads configuration, opens the database, builds resources and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fridge Recipes Server Binary
//!
//! Starts the HTTP API. Environment variables configure everything; the
//! command line can override the port and database URL.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use fridge_recipes::config::ServerConfig;
use fridge_recipes::constants::endpoints;
use fridge_recipes::database::Database;
use fridge_recipes::logging;
use fridge_recipes::server::{serve, AppResources};
use tracing::{error, info};

/// Command-line overrides for the environment configuration
#[derive(Parser)]
#[command(name = "fridge-recipes-server")]
#[command(about = "Fridge Recipes - three recipes from what is already in your fridge")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }

    logging::init_from_env()?;
    info!("Starting Fridge Recipes server");

    let database = Database::new(&config.database.url).await?;
    info!(url = %config.database.url, "Database initialized");

    let port = config.http.port;
    let resources = Arc::new(AppResources::from_config(config, &database)?);

    info!("=== Available API Endpoints ===");
    info!("  Health:          GET  {}", endpoints::HEALTH_CHECK);
    info!("  Recommend:       POST {}/recommendations", endpoints::API_BASE);
    info!("  Recommendation:  GET  {}/recommendations/:id", endpoints::API_BASE);
    info!("  Image:           GET  {}/images/generate?title=", endpoints::API_BASE);
    info!("  Image batch:     POST {}/images/batch", endpoints::API_BASE);
    info!("  Stats:           GET  {}/stats", endpoints::API_BASE);

    if let Err(e) = serve(resources, port).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}
