// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Per-request entry point for document generation.

use std::sync::Arc;

use http::HeaderMap;
use openapi_gen::{DocumentResponse, GeneratorError, OpenApiResource, UriInfo};

use crate::application::ApplicationAdaptor;
use crate::builder::OpenApiDocsBuilder;
use crate::config::ConfigAdaptor;
use crate::context::ContextAdaptor;
use crate::request::RequestView;
use crate::resources::ResourceLoader;
use crate::store::ContainerState;

/// OpenAPI documentation endpoints for a fixed set of resources.
///
/// Cloning is cheap and every clone shares the same container state.
#[derive(Clone)]
pub struct OpenApiDocs {
    inner: Arc<Inner>,
}

struct Inner {
    state: ContainerState,
    resources: Arc<dyn ResourceLoader>,
    application: ApplicationAdaptor,
    generator: OpenApiResource,
}

impl std::fmt::Debug for OpenApiDocs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenApiDocs")
            .field("state", &self.inner.state)
            .field("application", &self.inner.application)
            .field("generator", &self.inner.generator)
            .finish()
    }
}

impl OpenApiDocs {
    /// Start configuring a new set of endpoints.
    pub fn builder() -> OpenApiDocsBuilder {
        OpenApiDocsBuilder::new()
    }

    pub(crate) fn new(
        state: ContainerState,
        resources: Arc<dyn ResourceLoader>,
        application: ApplicationAdaptor,
        generator: OpenApiResource,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state,
                resources,
                application,
                generator,
            }),
        }
    }

    /// Generate the document for one request.
    ///
    /// A fresh context is bound to `request` for the duration of the call.
    /// Generator failures are returned as they are.
    pub fn handle(
        &self,
        request: &RequestView,
        headers: &HeaderMap,
        doc_type: &str,
    ) -> Result<DocumentResponse, GeneratorError> {
        let inner = &*self.inner;
        let context = ContextAdaptor::new(request, &inner.state, inner.resources.as_ref());
        let config = ConfigAdaptor::new(context);
        let uri_info = UriInfo::from_uri(request.uri());

        inner
            .generator
            .get_openapi(headers, &config, &inner.application, &uri_info, doc_type)
    }

    /// Container state shared by every request.
    pub fn state(&self) -> &ContainerState {
        &self.inner.state
    }
}
