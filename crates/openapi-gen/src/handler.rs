// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Per-request entry point of the generator.

use container_context::HandlerConfig;
use http::{HeaderMap, StatusCode, Uri};
use oas3::spec::Spec;

use crate::config::GeneratorConfiguration;
use crate::context::OpenApiContext;
use crate::error::GeneratorError;
use crate::filter::{self, FilterParams};
use crate::reader::Reader;
use crate::resource::Application;

/// Media type of JSON documents.
pub const APPLICATION_JSON: &str = "application/json";

/// Media type of YAML documents.
pub const APPLICATION_YAML: &str = "application/yaml";

/// Path and decoded query parameters of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriInfo {
    /// Request path
    pub path: String,
    /// Decoded query parameters, in request order
    pub query: Vec<(String, String)>,
}

impl UriInfo {
    /// Extract path and query from a request URI.
    pub fn from_uri(uri: &Uri) -> Self {
        let query = uri
            .query()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            path: uri.path().to_string(),
            query,
        }
    }
}

/// A generated document ready to be sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResponse {
    /// Response status
    pub status: StatusCode,
    /// Media type of `body`
    pub content_type: &'static str,
    /// Serialized document
    pub body: String,
}

/// Serves OpenAPI documents for an application.
#[derive(Debug, Clone, Default)]
pub struct OpenApiResource {
    configuration: GeneratorConfiguration,
}

impl OpenApiResource {
    /// Create a generator with programmatic configuration.
    pub fn new(configuration: GeneratorConfiguration) -> Self {
        Self { configuration }
    }

    /// Programmatic configuration.
    pub fn configuration(&self) -> &GeneratorConfiguration {
        &self.configuration
    }

    /// Produce the document for one request.
    ///
    /// `doc_type` selects the format: `yaml` (any case) gives YAML, anything
    /// else gives JSON. The document is rebuilt from `application` on every call.
    #[tracing::instrument(skip_all, fields(doc_type = %doc_type, path = %uri_info.path))]
    pub fn get_openapi(
        &self,
        headers: &HeaderMap,
        config: &dyn HandlerConfig,
        application: &dyn Application,
        uri_info: &UriInfo,
        doc_type: &str,
    ) -> Result<DocumentResponse, GeneratorError> {
        let context = OpenApiContext::resolve(config, &self.configuration)?;
        let configuration = context.configuration();

        let mut document = Reader::new(config.container_context())
            .read(configuration.open_api.as_ref(), application)?;

        if let Some(spec_filter) = &configuration.filter {
            let params = FilterParams::from_request(headers, uri_info);
            filter::apply(&mut document, spec_filter.as_ref(), &params);
        }

        let response = render(&document, doc_type, configuration.is_pretty_print())?;
        tracing::debug!(
            context_id = %context.id(),
            paths = document.paths.as_ref().map_or(0, |paths| paths.len()),
            content_type = response.content_type,
            "Generated OpenAPI document"
        );
        Ok(response)
    }
}

fn render(
    document: &Spec,
    doc_type: &str,
    pretty: bool,
) -> Result<DocumentResponse, GeneratorError> {
    let (content_type, body) = if doc_type.eq_ignore_ascii_case("yaml") {
        (APPLICATION_YAML, serde_yaml::to_string(document)?)
    } else if pretty {
        (APPLICATION_JSON, serde_json::to_string_pretty(document)?)
    } else {
        (APPLICATION_JSON, serde_json::to_string(document)?)
    };
    Ok(DocumentResponse {
        status: StatusCode::OK,
        content_type,
        body,
    })
}
