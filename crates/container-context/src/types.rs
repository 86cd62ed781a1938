// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Value types that appear in the container context contract.

use std::any::Any;
use std::sync::Arc;

/// Major version of the contract implemented by this crate.
pub const CONTRACT_MAJOR_VERSION: u32 = 3;

/// Minor version of the contract implemented by this crate.
pub const CONTRACT_MINOR_VERSION: u32 = 0;

/// Character encoding reported for requests and responses.
pub const DEFAULT_CHARACTER_ENCODING: &str = "UTF-8";

/// An opaque attribute value stored in a container context.
///
/// Readers downcast to the concrete type they expect.
pub type AttributeValue = Arc<dyn Any + Send + Sync>;

/// An opaque handler, filter or listener instance handed to the container.
pub type Component = Arc<dyn Any + Send + Sync>;

/// A request handler or filter registered with the container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    /// Registration name
    pub name: String,
    /// Type name of the registered component, if known
    pub class_name: Option<String>,
    /// URL patterns the registration is mapped to
    pub mappings: Vec<String>,
}

/// How a container tracks sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionTrackingMode {
    /// Session identifier carried in a cookie
    Cookie,
    /// Session identifier carried in the URL
    Url,
    /// Session bound to the TLS session
    Ssl,
}

/// Configuration of the cookie used for session tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookieConfig {
    /// Cookie name
    pub name: Option<String>,
    /// Cookie path
    pub path: Option<String>,
    /// Whether the cookie is marked HttpOnly
    pub http_only: bool,
    /// Whether the cookie is marked Secure
    pub secure: bool,
}

/// Page-template configuration declared by a deployment descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageConfigDescriptor {
    /// Tag libraries known to the container
    pub taglibs: Vec<String>,
    /// URL patterns handled as page templates
    pub url_patterns: Vec<String>,
}

/// A handle able to forward or include a request to another resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatcher {
    /// Path or handler name the dispatcher targets
    pub target: String,
}
