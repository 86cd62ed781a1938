// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Request-dependent filtering of generated documents.

use std::collections::BTreeMap;

use http::{HeaderMap, Method};

use oas3::spec::{Operation, Spec};

use crate::document;
use crate::handler::UriInfo;

/// Query parameters and headers of the request a document is generated for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    /// Query parameters, keyed by name
    pub query: BTreeMap<String, Vec<String>>,
    /// Header values, keyed by lowercase name
    pub headers: BTreeMap<String, Vec<String>>,
}

impl FilterParams {
    /// Collect parameters from the current request.
    ///
    /// Header values that are not valid UTF-8 are skipped.
    pub fn from_request(headers: &HeaderMap, uri_info: &UriInfo) -> Self {
        let mut params = Self::default();
        for (name, value) in &uri_info.query {
            params.query.entry(name.clone()).or_default().push(value.clone());
        }
        for (name, value) in headers {
            if let Ok(value) = value.to_str() {
                params
                    .headers
                    .entry(name.as_str().to_string())
                    .or_default()
                    .push(value.to_string());
            }
        }
        params
    }

    /// All values of a query parameter.
    pub fn query_values(&self, name: &str) -> &[String] {
        self.query.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Removes operations from a generated document.
pub trait SpecFilter: Send + Sync {
    /// Whether `operation` on `path` and `method` stays in the document.
    fn keep_operation(
        &self,
        path: &str,
        method: &Method,
        operation: &Operation,
        params: &FilterParams,
    ) -> bool;

    /// Filter name for logging/debugging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

/// Apply `filter` to every operation, dropping paths left without operations.
pub(crate) fn apply(document: &mut Spec, filter: &dyn SpecFilter, params: &FilterParams) {
    let Some(paths) = document.paths.as_mut() else {
        return;
    };
    for (path, item) in paths.iter_mut() {
        document::retain_operations(item, |method, operation| {
            filter.keep_operation(path, method, operation, params)
        });
    }
    let before = paths.len();
    paths.retain(|_, item| document::has_operations(item));
    tracing::debug!(
        filter = filter.name(),
        removed_paths = before - paths.len(),
        "Applied document filter"
    );
}

/// Keeps only operations tagged with one of the `tags` query parameter values.
///
/// Without a `tags` parameter the document is left untouched. Several tags may
/// be given as repeated parameters or comma separated.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagQueryFilter;

impl SpecFilter for TagQueryFilter {
    fn keep_operation(
        &self,
        _path: &str,
        _method: &Method,
        operation: &Operation,
        params: &FilterParams,
    ) -> bool {
        let wanted: Vec<&str> = params
            .query_values("tags")
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect();
        wanted.is_empty() || operation.tags.iter().any(|tag| wanted.contains(&tag.as_str()))
    }

    fn name(&self) -> &'static str {
        "tag_query"
    }
}
