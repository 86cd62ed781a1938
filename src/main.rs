// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! The main `openapi-bridge(1)` command.

#![warn(missing_docs)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use clap::Parser;
use openapi_bridge::{DirectoryResources, OpenApiDocs};
use openapi_gen::{parse_document, TagQueryFilter};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

mod commands;
mod config;
mod petstore;
mod utils;

use commands::{Cli, Commands, Serve};
use config::Config;
use petstore::PetStore;
use utils::format_build_info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", format_build_info());
        return Ok(());
    }

    match &cli.command {
        Some(Commands::Serve(cfg)) => serve(cfg).await,
        None => {
            eprintln!("No command provided. Use --help for usage information.");
            Ok(())
        }
    }
}

async fn serve(cfg: &Serve) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".to_string().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Config {
        bind_address,
        title,
        description,
        context_id,
        resource_dir,
        cors_origin,
    } = Config::new(cfg).context("Failed to load configuration")?;

    let mut info = json!({"title": title, "version": env!("CARGO_PKG_VERSION")});
    if let Some(description) = description {
        info["description"] = json!(description);
    }
    let base = parse_document(json!({ "info": info })).context("Invalid base document")?;

    let cors = CorsLayer::new()
        .allow_origin(
            cors_origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin {cors_origin}"))?,
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    tracing::info!(resource_dir = %resource_dir.display(), "Looking up generator configuration");
    let mut builder = OpenApiDocs::builder()
        .with_open_api(base)
        .with_resources(petstore::resources())
        .with_resource_loader(Arc::new(DirectoryResources::new(resource_dir)))
        .with_filter(Arc::new(TagQueryFilter));
    if let Some(context_id) = context_id {
        builder = builder.with_context_id(context_id);
    }
    let docs = builder
        .build()
        .context("Failed to build OpenAPI documentation endpoints")?;

    let router = petstore::routes(Arc::new(PetStore::seeded()))
        .merge(docs.router())
        .layer(cors);
    let tcp_listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind to {bind_address}"))?;
    let local_addr = tcp_listener
        .local_addr()
        .context("Failed to get local address")?;

    tracing::info!("Pet store is ready and listening on http://{}", local_addr);
    tracing::info!("OpenAPI document available at http://{}/openapi.json", local_addr);
    tracing::info!(%cors_origin, "Cross-origin requests allowed");

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await
        .context("Server error")?;

    tracing::info!("Pet store shutting down");
    Ok(())
}
