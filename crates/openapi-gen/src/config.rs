// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Generator configuration and configuration files.

use std::fmt;
use std::sync::Arc;

use oas3::spec::Spec;
use serde::Deserialize;
use serde_json::Value;

use crate::document::parse_document;
use crate::filter::SpecFilter;

/// Programmatic configuration of the generator.
///
/// Values set here take precedence over a configuration file found through
/// the container context. Unset values are filled from that file.
#[derive(Clone, Default)]
pub struct GeneratorConfiguration {
    /// Base document that discovered paths and components are merged into
    pub open_api: Option<Spec>,
    /// Whether JSON output is indented. Defaults to true when unset.
    pub pretty_print: Option<bool>,
    /// Filter applied to every generated document
    pub filter: Option<Arc<dyn SpecFilter>>,
}

impl fmt::Debug for GeneratorConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfiguration")
            .field("open_api", &self.open_api)
            .field("pretty_print", &self.pretty_print)
            .field("filter", &self.filter.as_ref().map(|filter| filter.name()))
            .finish()
    }
}

impl GeneratorConfiguration {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base document.
    pub fn with_open_api(mut self, open_api: Spec) -> Self {
        self.open_api = Some(open_api);
        self
    }

    /// Set whether JSON output is indented.
    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = Some(pretty_print);
        self
    }

    /// Set the document filter.
    pub fn with_filter(mut self, filter: Arc<dyn SpecFilter>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Effective pretty-print setting.
    pub fn is_pretty_print(&self) -> bool {
        self.pretty_print.unwrap_or(true)
    }

    /// Fill unset values from a configuration file.
    pub(crate) fn merged_with(mut self, file: ConfigurationFile) -> Self {
        if self.open_api.is_none() {
            self.open_api = file.open_api;
        }
        if self.pretty_print.is_none() {
            self.pretty_print = file.pretty_print;
        }
        self
    }
}

/// Contents of an `openapi-configuration.{yaml,json}` resource.
#[derive(Debug, Default)]
pub(crate) struct ConfigurationFile {
    pub pretty_print: Option<bool>,
    pub open_api: Option<Spec>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfigurationFile {
    #[serde(default)]
    pretty_print: Option<bool>,
    #[serde(default, rename = "openAPI")]
    open_api: Option<Value>,
}

impl ConfigurationFile {
    /// Parse a configuration file, choosing the format from its extension.
    ///
    /// Anything not ending in `.json` is read as YAML.
    pub(crate) fn parse(location: &str, contents: &str) -> Result<Self, String> {
        let raw: RawConfigurationFile = if location.to_ascii_lowercase().ends_with(".json") {
            serde_json::from_str(contents).map_err(|e| e.to_string())?
        } else {
            serde_yaml::from_str(contents).map_err(|e| e.to_string())?
        };
        let open_api = raw
            .open_api
            .map(parse_document)
            .transpose()
            .map_err(|e| e.to_string())?;
        Ok(Self {
            pretty_print: raw.pretty_print,
            open_api,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_pretty_print_defaults_to_true() {
        assert!(GeneratorConfiguration::new().is_pretty_print());
        assert!(!GeneratorConfiguration::new()
            .with_pretty_print(false)
            .is_pretty_print());
    }

    #[test]
    fn test_file_fills_only_unset_values() {
        let file = ConfigurationFile::parse(
            "openapi-configuration.yaml",
            "prettyPrint: false\nopenAPI:\n  info:\n    title: From File\n    version: '1'\n",
        )
        .unwrap();

        let programmatic = GeneratorConfiguration::new()
            .with_open_api(
                parse_document(json!({"info": {"title": "Programmatic", "version": "2"}}))
                    .unwrap(),
            )
            .merged_with(file);

        assert_eq!(programmatic.open_api.unwrap().info.title, "Programmatic");
        assert_eq!(programmatic.pretty_print, Some(false));
    }

    #[test]
    fn test_json_file_parsed_by_extension() {
        let file = ConfigurationFile::parse(
            "config/openapi-configuration.JSON",
            r#"{"prettyPrint": true, "openAPI": {"info": {"title": "Json", "version": "1"}}}"#,
        )
        .unwrap();
        assert_eq!(file.pretty_print, Some(true));
        assert_eq!(file.open_api.unwrap().info.title, "Json");
    }

    #[test]
    fn test_malformed_file_reports_error() {
        assert!(ConfigurationFile::parse("openapi-configuration.json", "{not json").is_err());
    }
}
