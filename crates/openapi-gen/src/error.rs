// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use thiserror::Error;

/// Error raised while producing a document.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A configuration resource exists but could not be read or parsed.
    #[error("invalid OpenAPI configuration at `{location}`: {reason}")]
    InvalidConfiguration {
        /// Resource path of the configuration
        location: String,
        /// What went wrong
        reason: String,
    },

    /// A base document is not a valid OpenAPI object.
    #[error("invalid OpenAPI document: {0}")]
    InvalidDocument(String),

    /// A resource described something that is not valid OpenAPI.
    #[error("invalid description of resource `{resource}`: {reason}")]
    InvalidDescription {
        /// Base path of the resource
        resource: String,
        /// What went wrong
        reason: String,
    },

    /// The context attribute is bound to a value of another type.
    #[error("attribute `{name}` is bound to something other than an OpenAPI context")]
    ForeignAttribute {
        /// Attribute name
        name: String,
    },

    /// The document could not be serialized as JSON.
    #[error("failed to serialize OpenAPI document as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document could not be serialized as YAML.
    #[error("failed to serialize OpenAPI document as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
