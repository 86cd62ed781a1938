// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "openapi-bridge", about, long_about = None)]
pub struct Cli {
    /// Print version information
    #[arg(long, short = 'V')]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the example pet store together with its OpenAPI documents.
    Serve(Serve),
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Serve {
    /// Address to listen on
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind_address: Option<String>,

    /// Title of the generated document
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Description of the generated document
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Context id keeping this generator's state apart from others in the process
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// Directory searched for `openapi-configuration.yaml` or `.json`
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_dir: Option<PathBuf>,

    /// Origin allowed to make cross-origin requests, e.g. `https://petstore.swagger.io`
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_origin: Option<String>,
}
