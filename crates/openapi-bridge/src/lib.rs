// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Serves generated OpenAPI documents from an axum application.
//!
//! The generator in [`openapi_gen`] expects to run inside a web container.
//! This crate gives it one that is just large enough: each request gets a
//! [`ContextAdaptor`] exposing the request's context path, the bridge's
//! resources and a [`ContainerState`] shared by every request. Any other
//! container capability fails with
//! [`ContextError::Unsupported`](container_context::ContextError::Unsupported).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use openapi_bridge::OpenApiDocs;
//! use openapi_gen::{ApiResource, OperationDescription, ResourceDescription};
//! use serde_json::json;
//!
//! struct Health;
//!
//! impl ApiResource for Health {
//!     fn describe(&self) -> ResourceDescription {
//!         ResourceDescription::new("/health").with_operation(OperationDescription::get(
//!             "",
//!             json!({"operationId": "health"}),
//!         ))
//!     }
//! }
//!
//! let docs = OpenApiDocs::builder()
//!     .with_resources([Arc::new(Health) as Arc<dyn ApiResource>])
//!     .build()?;
//! let app: axum::Router = axum::Router::new().nest("/api", docs.router());
//! # let _ = app;
//! # Ok::<(), openapi_bridge::BridgeError>(())
//! ```

#![warn(missing_docs)]

mod application;
mod builder;
mod config;
mod context;
mod docs;
mod error;
mod request;
mod resources;
mod routes;
mod store;

pub use application::ApplicationAdaptor;
pub use builder::OpenApiDocsBuilder;
pub use config::{ConfigAdaptor, HANDLER_NAME};
pub use context::{server_version, ContextAdaptor, SERVER_PRODUCT};
pub use docs::OpenApiDocs;
pub use error::BridgeError;
pub use request::RequestView;
pub use resources::{DirectoryResources, EmbeddedResources, NoResources, ResourceLoader};
pub use routes::{DocsError, PRODUCES};
pub use store::ContainerState;
