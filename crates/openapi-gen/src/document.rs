// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Helpers over the `oas3` document model.

use http::Method;
use oas3::spec::{Operation, PathItem, Spec};
use serde_json::{Map, Value};

use crate::error::GeneratorError;

/// OpenAPI version written into documents that do not declare one.
pub const OPENAPI_VERSION: &str = "3.0.1";

/// Parse a JSON (or YAML-converted) value into a document.
///
/// `openapi` defaults to [`OPENAPI_VERSION`]; a missing `info` object, or a
/// missing `title` or `version` inside it, defaults to an empty string.
pub fn parse_document(value: Value) -> Result<Spec, GeneratorError> {
    let Value::Object(mut object) = value else {
        return Err(GeneratorError::InvalidDocument(
            "expected a JSON object".to_string(),
        ));
    };
    object
        .entry("openapi")
        .or_insert_with(|| Value::from(OPENAPI_VERSION));
    if let Value::Object(info) = object
        .entry("info")
        .or_insert_with(|| Value::Object(Map::new()))
    {
        info.entry("title").or_insert_with(|| Value::from(""));
        info.entry("version").or_insert_with(|| Value::from(""));
    }
    serde_json::from_value(Value::Object(object))
        .map_err(|e| GeneratorError::InvalidDocument(e.to_string()))
}

/// Operation declared for `path` and `method`, if any.
pub fn operation<'a>(document: &'a Spec, path: &str, method: &Method) -> Option<&'a Operation> {
    let item = document.paths.as_ref()?.get(path)?;
    operations(item)
        .into_iter()
        .find_map(|(m, operation)| (m == *method).then_some(operation))
}

/// Slot holding the operation for `method`.
///
/// Methods OpenAPI has no field for, such as `CONNECT`, have no slot.
pub(crate) fn slot<'a>(
    item: &'a mut PathItem,
    method: &Method,
) -> Option<&'a mut Option<Operation>> {
    let slot = match method.as_str() {
        "GET" => &mut item.get,
        "PUT" => &mut item.put,
        "POST" => &mut item.post,
        "DELETE" => &mut item.delete,
        "OPTIONS" => &mut item.options,
        "HEAD" => &mut item.head,
        "PATCH" => &mut item.patch,
        "TRACE" => &mut item.trace,
        _ => return None,
    };
    Some(slot)
}

/// Declared operations in OpenAPI field order.
pub(crate) fn operations(item: &PathItem) -> Vec<(Method, &Operation)> {
    [
        (Method::GET, &item.get),
        (Method::PUT, &item.put),
        (Method::POST, &item.post),
        (Method::DELETE, &item.delete),
        (Method::OPTIONS, &item.options),
        (Method::HEAD, &item.head),
        (Method::PATCH, &item.patch),
        (Method::TRACE, &item.trace),
    ]
    .into_iter()
    .filter_map(|(method, operation)| operation.as_ref().map(|operation| (method, operation)))
    .collect()
}

/// Drop every operation for which `keep` returns false.
pub(crate) fn retain_operations<F>(item: &mut PathItem, mut keep: F)
where
    F: FnMut(&Method, &Operation) -> bool,
{
    for method in [
        Method::GET,
        Method::PUT,
        Method::POST,
        Method::DELETE,
        Method::OPTIONS,
        Method::HEAD,
        Method::PATCH,
        Method::TRACE,
    ] {
        if let Some(slot) = slot(item, &method) {
            if slot.as_ref().is_some_and(|operation| !keep(&method, operation)) {
                *slot = None;
            }
        }
    }
}

/// Whether the path item declares at least one operation.
pub(crate) fn has_operations(item: &PathItem) -> bool {
    !operations(item).is_empty()
}
