// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Container context contract.
//!
//! Hosted components (such as a documentation generator) are written against
//! the [`ContainerContext`] and [`HandlerConfig`] traits rather than against a
//! concrete server. A host that cannot provide a member of the contract must
//! report it through [`ContextError::Unsupported`] instead of inventing a value.
//!
//! # Example
//!
//! ```ignore
//! use container_context::{ContainerContext, HandlerConfig};
//!
//! fn context_id(config: &dyn HandlerConfig) -> String {
//!     config
//!         .init_parameter("openapi.context.id")
//!         .unwrap_or_else(|| format!("default.{}", config.handler_name()))
//! }
//! ```

#![warn(missing_docs)]

mod context;
mod error;
mod types;

pub use context::{ContainerContext, HandlerConfig, ResourceStream};
pub use error::{ContextError, ContextResult};
pub use types::{
    AttributeValue, Component, Dispatcher, PageConfigDescriptor, Registration,
    SessionCookieConfig, SessionTrackingMode, CONTRACT_MAJOR_VERSION, CONTRACT_MINOR_VERSION,
    DEFAULT_CHARACTER_ENCODING,
};
