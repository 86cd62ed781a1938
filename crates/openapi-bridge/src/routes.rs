// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! HTTP surface of the documentation endpoints.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use openapi_gen::{GeneratorError, APPLICATION_JSON, APPLICATION_YAML};
use thiserror::Error;

use crate::docs::OpenApiDocs;
use crate::request::RequestView;

/// Media types the endpoints can produce.
pub const PRODUCES: [&str; 2] = [APPLICATION_JSON, APPLICATION_YAML];

/// Failure while serving a document.
#[derive(Debug, Error)]
pub enum DocsError {
    /// The `Accept` header admits none of [`PRODUCES`].
    #[error("none of the acceptable media types can be produced")]
    NotAcceptable,
    /// The generator failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    /// The blocking task running the generator panicked or was cancelled.
    #[error("document generation did not complete: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl IntoResponse for DocsError {
    fn into_response(self) -> Response {
        match self {
            DocsError::NotAcceptable => (
                StatusCode::NOT_ACCEPTABLE,
                format!("Supported media types: {}", PRODUCES.join(", ")),
            )
                .into_response(),
            DocsError::Generator(_) | DocsError::Worker(_) => {
                tracing::error!(error = %self, "Failed to generate OpenAPI document");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate OpenAPI document",
                )
                    .into_response()
            }
        }
    }
}

impl OpenApiDocs {
    /// Routes serving `GET /openapi.json` and `GET /openapi.yaml`.
    ///
    /// The router can be merged at the root or nested below a prefix; a
    /// nesting prefix becomes the context path seen by the generator.
    pub fn router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        Router::new()
            .route("/openapi.json", get(json_document))
            .route("/openapi.yaml", get(yaml_document))
            .with_state(self.clone())
    }
}

async fn json_document(
    State(docs): State<OpenApiDocs>,
    request: Request,
) -> Result<Response, DocsError> {
    serve(docs, request, "json").await
}

async fn yaml_document(
    State(docs): State<OpenApiDocs>,
    request: Request,
) -> Result<Response, DocsError> {
    serve(docs, request, "yaml").await
}

async fn serve(
    docs: OpenApiDocs,
    request: Request,
    doc_type: &'static str,
) -> Result<Response, DocsError> {
    let (parts, _body) = request.into_parts();
    if !accepts_any(&parts.headers, &PRODUCES) {
        return Err(DocsError::NotAcceptable);
    }

    let view = RequestView::from_parts(&parts);
    let headers = parts.headers;
    let span = tracing::Span::current();
    // Configuration files are read through blocking I/O.
    let document = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        let document = docs.handle(&view, &headers, doc_type)?;
        tracing::debug!(
            context_path = %view.context_path(),
            content_type = document.content_type,
            "Serving OpenAPI document"
        );
        Ok::<_, GeneratorError>(document)
    })
    .await??;

    Ok((
        document.status,
        [(header::CONTENT_TYPE, document.content_type)],
        document.body,
    )
        .into_response())
}

/// Whether the `Accept` header admits at least one of `produces`.
///
/// A missing header accepts everything. Media ranges with `q=0` are ignored.
fn accepts_any(headers: &HeaderMap, produces: &[&str]) -> bool {
    let ranges: Vec<String> = headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(media_range)
        .collect();
    if ranges.is_empty() {
        return headers.get(header::ACCEPT).is_none();
    }

    ranges.iter().any(|range| {
        produces.iter().any(|produced| {
            let kind = produced.split('/').next().unwrap_or_default();
            range == "*/*" || range == produced || *range == format!("{kind}/*")
        })
    })
}

/// Lower-cased media range of one `Accept` element, `None` when it is empty
/// or explicitly refused with `q=0`.
fn media_range(element: &str) -> Option<String> {
    let mut pieces = element.split(';').map(str::trim);
    let range = pieces.next().filter(|r| !r.is_empty())?.to_ascii_lowercase();
    let refused = pieces.any(|param| {
        param
            .split_once('=')
            .filter(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
            .and_then(|(_, q)| q.trim().parse::<f32>().ok())
            .is_some_and(|q| q <= 0.0)
    });
    (!refused).then_some(range)
}
