// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use std::path::{Path, PathBuf};

use anyhow::Context;
use etcetera::BaseStrategy;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configuration file location.
pub const CONFIG_FILE_ENV: &str = "OPENAPI_BRIDGE_CONFIG_FILE";

/// Prefix of environment variables overriding configuration keys.
pub const ENV_PREFIX: &str = "OPENAPI_BRIDGE_";

/// Get the default resource directory path based on the OS
pub fn get_resource_dir() -> Result<PathBuf, anyhow::Error> {
    let dir_strategy = etcetera::choose_base_strategy().context("Unable to get home directory")?;
    Ok(dir_strategy.config_dir().join("openapi-bridge"))
}

fn default_resource_dir() -> PathBuf {
    get_resource_dir().unwrap_or_else(|_| {
        eprintln!(
            "WARN: Unable to determine default resource directory, \
             using `resources` in the current working directory"
        );
        PathBuf::from("./resources")
    })
}

fn default_bind_address() -> String {
    "127.0.0.1:12080".to_string()
}

fn default_cors_origin() -> String {
    "https://petstore.swagger.io".to_string()
}

fn default_title() -> String {
    "Swagger Petstore".to_string()
}

/// Configuration for the example server
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Title of the generated document
    #[serde(default = "default_title")]
    pub title: String,

    /// Description of the generated document
    #[serde(default)]
    pub description: Option<String>,

    /// Context id of the documentation endpoints
    #[serde(default)]
    pub context_id: Option<String>,

    /// Directory searched for generator configuration files
    #[serde(default = "default_resource_dir")]
    pub resource_dir: PathBuf,

    /// Origin allowed to fetch documents and call the pet store from a browser
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Config {
    /// Returns a new [`Config`] instance by merging the configuration from the specified
    /// `cli_config` (generally a Clap `Parser`) with the configuration file and environment
    /// variables. By default, the configuration file is located at
    /// `$XDG_CONFIG_HOME/openapi-bridge/config.toml`. This can be overridden by setting the
    /// `OPENAPI_BRIDGE_CONFIG_FILE` environment variable.
    ///
    /// The order of precedence for configuration sources is as follows:
    /// 1. Values from `cli_config`
    /// 2. Environment variables prefixed with `OPENAPI_BRIDGE_`
    /// 3. Configuration file
    pub fn new<T: Serialize>(cli_config: &T) -> Result<Self, anyhow::Error> {
        let config_file_path = match std::env::var_os(CONFIG_FILE_ENV) {
            Some(path) => PathBuf::from(path),
            None => etcetera::choose_base_strategy()
                .context("Unable to get home directory")?
                .config_dir()
                .join("openapi-bridge")
                .join("config.toml"),
        };
        Self::new_from_path(cli_config, config_file_path)
    }

    /// Same as [`Config::new`], but allows specifying a custom path for the configuration file.
    pub fn new_from_path<T: Serialize>(
        cli_config: &T,
        config_file_path: impl AsRef<Path>,
    ) -> Result<Self, anyhow::Error> {
        figment::Figment::new()
            .admerge(Toml::file(config_file_path))
            .admerge(Env::prefixed(ENV_PREFIX).ignore(&["config_file"]))
            .admerge(Serialized::defaults(cli_config))
            .extract()
            .context("Unable to merge configs")
    }
}
