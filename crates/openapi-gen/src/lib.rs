// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! OpenAPI document generation for introspectable HTTP resources.
//!
//! Resources describe themselves through [`ApiResource`]; the set of resources
//! is handed over as an [`Application`]. Documents use the [`oas3`] model.
//! The per-request entry point is [`OpenApiResource::get_openapi`], which runs
//! inside a [`container_context::ContainerContext`] reached through a
//! [`container_context::HandlerConfig`].
//!
//! # Example
//!
//! ```ignore
//! use openapi_gen::{parse_document, GeneratorConfiguration, OpenApiResource};
//! use serde_json::json;
//!
//! let base = parse_document(json!({"info": {"title": "Example API", "version": "1.0.0"}}))?;
//! let generator = OpenApiResource::new(GeneratorConfiguration::new().with_open_api(base));
//!
//! let response =
//!     generator.get_openapi(&headers, &handler_config, &application, &uri_info, "json")?;
//! assert_eq!(response.content_type, "application/json");
//! ```

#![warn(missing_docs)]

mod config;
mod context;
mod document;
mod error;
mod filter;
mod handler;
mod reader;
mod resource;

#[cfg(test)]
mod testing;

pub use config::GeneratorConfiguration;
pub use context::{
    OpenApiContext, CONFIG_LOCATION_KEY, CONTEXT_ATTRIBUTE_PREFIX, CONTEXT_ID_HANDLER_PREFIX,
    DEFAULT_CONFIG_LOCATIONS, OPENAPI_CONTEXT_ID_KEY, PRETTY_PRINT_KEY,
};
pub use document::{operation, parse_document, OPENAPI_VERSION};
pub use error::GeneratorError;
pub use filter::{FilterParams, SpecFilter, TagQueryFilter};
pub use handler::{DocumentResponse, OpenApiResource, UriInfo, APPLICATION_JSON, APPLICATION_YAML};
pub use oas3::spec::{Components, Info, Operation, PathItem, Server, Spec, Tag};
pub use reader::Reader;
pub use resource::{ApiResource, Application, OperationDescription, ResourceDescription};
