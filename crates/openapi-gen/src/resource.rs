// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Introspection interface implemented by documented resources.
//!
//! Resources describe operations, tags and components as OpenAPI JSON
//! fragments. The [`Reader`](crate::Reader) validates them against the
//! `oas3` model when it builds a document.

use std::collections::BTreeMap;
use std::sync::Arc;

use http::Method;
use serde_json::{json, Value};

/// A resource that can describe the operations it serves.
pub trait ApiResource: Send + Sync {
    /// Describe the resource's operations and components.
    fn describe(&self) -> ResourceDescription;
}

/// The set of resources making up an application.
pub trait Application: Send + Sync {
    /// Resource instances to document.
    fn singletons(&self) -> Vec<Arc<dyn ApiResource>>;
}

/// One operation declared by a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescription {
    /// HTTP method
    pub method: Method,
    /// Path relative to the resource's base path
    pub path: String,
    /// OpenAPI operation object
    pub operation: Value,
    /// Hidden operations are served but not documented
    pub hidden: bool,
}

impl OperationDescription {
    /// Describe an operation.
    pub fn new(method: Method, path: impl Into<String>, operation: Value) -> Self {
        Self {
            method,
            path: path.into(),
            operation,
            hidden: false,
        }
    }

    /// Shorthand for a `GET` operation.
    pub fn get(path: impl Into<String>, operation: Value) -> Self {
        Self::new(Method::GET, path, operation)
    }

    /// Shorthand for a `POST` operation.
    pub fn post(path: impl Into<String>, operation: Value) -> Self {
        Self::new(Method::POST, path, operation)
    }

    /// Shorthand for a `PUT` operation.
    pub fn put(path: impl Into<String>, operation: Value) -> Self {
        Self::new(Method::PUT, path, operation)
    }

    /// Shorthand for a `DELETE` operation.
    pub fn delete(path: impl Into<String>, operation: Value) -> Self {
        Self::new(Method::DELETE, path, operation)
    }

    /// Exclude the operation from generated documents.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Everything a resource contributes to a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceDescription {
    /// Base path all operation paths are relative to
    pub path: String,
    /// OpenAPI tag objects; their names are applied to every operation
    pub tags: Vec<Value>,
    /// Declared operations
    pub operations: Vec<OperationDescription>,
    /// Component schemas keyed by name
    pub schemas: BTreeMap<String, Value>,
    /// Security schemes keyed by name
    pub security_schemes: BTreeMap<String, Value>,
}

impl ResourceDescription {
    /// Describe a resource mounted at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Add a resource-level tag.
    pub fn with_tag(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.tags
            .push(json!({"name": name.into(), "description": description.into()}));
        self
    }

    /// Add an operation.
    pub fn with_operation(mut self, operation: OperationDescription) -> Self {
        self.operations.push(operation);
        self
    }

    /// Add a component schema.
    pub fn with_schema(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.schemas.insert(name.into(), schema);
        self
    }

    /// Add a security scheme.
    pub fn with_security_scheme(mut self, name: impl Into<String>, scheme: Value) -> Self {
        self.security_schemes.insert(name.into(), scheme);
        self
    }
}
