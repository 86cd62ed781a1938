// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Read-only view of the request being served.

use axum::extract::{NestedPath, OriginalUri};
use http::request::Parts;
use http::Uri;

/// The parts of an inbound request the container context exposes.
///
/// A view is built for one request and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestView {
    context_path: String,
    uri: Uri,
}

impl RequestView {
    /// Create a view for a request to `uri` served below `context_path`.
    ///
    /// A trailing slash is removed from the context path, so a root mount
    /// is represented by the empty string.
    pub fn new(context_path: &str, uri: Uri) -> Self {
        Self {
            context_path: context_path.trim_end_matches('/').to_string(),
            uri,
        }
    }

    /// Build a view from request parts routed by axum.
    ///
    /// The context path is the prefix the bridge's router was nested under,
    /// and the URI is the one the client sent before any prefix was stripped.
    pub fn from_parts(parts: &Parts) -> Self {
        let context_path = parts
            .extensions
            .get::<NestedPath>()
            .map(|nested| nested.as_str())
            .unwrap_or_default();
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| original.0.clone())
            .unwrap_or_else(|| parts.uri.clone());
        Self::new(context_path, uri)
    }

    /// Prefix the application is mounted under. Empty at the root.
    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    /// Full request URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Request path.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Raw query string, if any.
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }
}
