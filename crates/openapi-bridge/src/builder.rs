// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use std::fmt;
use std::sync::Arc;

use openapi_gen::{
    ApiResource, GeneratorConfiguration, OpenApiResource, Spec, SpecFilter,
    OPENAPI_CONTEXT_ID_KEY,
};

use crate::application::ApplicationAdaptor;
use crate::docs::OpenApiDocs;
use crate::error::BridgeError;
use crate::resources::{NoResources, ResourceLoader};
use crate::store::ContainerState;

/// Builder for [`OpenApiDocs`].
///
/// Resources are required; everything else is optional.
#[derive(Default)]
pub struct OpenApiDocsBuilder {
    context_id: Option<String>,
    open_api: Option<Spec>,
    resources: Option<Vec<Arc<dyn ApiResource>>>,
    resource_loader: Option<Arc<dyn ResourceLoader>>,
    pretty_print: Option<bool>,
    filter: Option<Arc<dyn SpecFilter>>,
    init_parameters: Vec<(String, String)>,
}

impl fmt::Debug for OpenApiDocsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenApiDocsBuilder")
            .field("context_id", &self.context_id)
            .field("open_api", &self.open_api.is_some())
            .field("resources", &self.resources.as_ref().map(Vec::len))
            .field("pretty_print", &self.pretty_print)
            .field("filter", &self.filter.as_ref().map(|f| f.name()))
            .field("init_parameters", &self.init_parameters)
            .finish()
    }
}

impl OpenApiDocsBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Group these endpoints under `context_id`. Endpoints built with
    /// different ids keep independent generator state.
    pub fn with_context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    /// Base document the generator adds discovered paths and components to.
    pub fn with_open_api(mut self, open_api: Spec) -> Self {
        self.open_api = Some(open_api);
        self
    }

    /// Resources to document. The collection is copied.
    pub fn with_resources<I>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn ApiResource>>,
    {
        self.resources = Some(resources.into_iter().collect());
        self
    }

    /// Where configuration files and other resources are looked up.
    pub fn with_resource_loader(mut self, loader: Arc<dyn ResourceLoader>) -> Self {
        self.resource_loader = Some(loader);
        self
    }

    /// Force pretty or compact JSON output.
    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = Some(pretty_print);
        self
    }

    /// Filter applied to every generated document.
    pub fn with_filter(mut self, filter: Arc<dyn SpecFilter>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Seed an initialization parameter, e.g. the configuration file location.
    /// The first value given for a name is kept.
    pub fn with_init_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.init_parameters.push((name.into(), value.into()));
        self
    }

    /// Context id, if set.
    pub fn context_id(&self) -> Option<&str> {
        self.context_id.as_deref()
    }

    /// Base document, if set.
    pub fn open_api(&self) -> Option<&Spec> {
        self.open_api.as_ref()
    }

    /// Resources, if set.
    pub fn resources(&self) -> Option<&[Arc<dyn ApiResource>]> {
        self.resources.as_deref()
    }

    /// Build the endpoints.
    ///
    /// Fails with [`BridgeError::MissingResources`] when no resources were
    /// set, or the set was empty.
    pub fn build(self) -> Result<OpenApiDocs, BridgeError> {
        let application = match self.resources {
            Some(resources) if !resources.is_empty() => ApplicationAdaptor::new(resources),
            _ => return Err(BridgeError::MissingResources),
        };

        let state = ContainerState::new();
        if let Some(context_id) = &self.context_id {
            state.set_init_parameter(OPENAPI_CONTEXT_ID_KEY, context_id);
        }
        for (name, value) in &self.init_parameters {
            if !state.set_init_parameter(name, value) {
                tracing::warn!(%name, "Init parameter given more than once, ignoring later value");
            }
        }

        let mut configuration = GeneratorConfiguration::new();
        if let Some(open_api) = self.open_api {
            configuration = configuration.with_open_api(open_api);
        }
        if let Some(pretty_print) = self.pretty_print {
            configuration = configuration.with_pretty_print(pretty_print);
        }
        if let Some(filter) = self.filter {
            configuration = configuration.with_filter(filter);
        }

        tracing::info!(
            context_id = ?self.context_id,
            resources = application.len(),
            "Built OpenAPI documentation endpoints"
        );

        Ok(OpenApiDocs::new(
            state,
            self.resource_loader.unwrap_or_else(|| Arc::new(NoResources)),
            application,
            OpenApiResource::new(configuration),
        ))
    }
}

#[cfg(test)]
mod tests {
    use openapi_gen::ResourceDescription;

    use super::*;

    struct Pets;

    impl ApiResource for Pets {
        fn describe(&self) -> ResourceDescription {
            ResourceDescription::new("/pet")
        }
    }

    #[test]
    fn test_build_without_resources_fails() {
        let err = OpenApiDocsBuilder::new().build().unwrap_err();
        assert_eq!(err, BridgeError::MissingResources);

        let err = OpenApiDocsBuilder::new()
            .with_resources(Vec::new())
            .build()
            .unwrap_err();
        assert_eq!(err, BridgeError::MissingResources);
    }

    #[test]
    fn test_context_id_seeds_init_parameter() {
        let docs = OpenApiDocsBuilder::new()
            .with_context_id("petstore")
            .with_init_parameter(OPENAPI_CONTEXT_ID_KEY, "ignored")
            .with_init_parameter("openApi.configuration.location", "conf/openapi.yaml")
            .with_resources([Arc::new(Pets) as Arc<dyn ApiResource>])
            .build()
            .unwrap();

        assert_eq!(
            docs.state().init_parameter(OPENAPI_CONTEXT_ID_KEY).as_deref(),
            Some("petstore")
        );
        assert_eq!(
            docs.state()
                .init_parameter("openApi.configuration.location")
                .as_deref(),
            Some("conf/openapi.yaml")
        );
    }

    #[test]
    fn test_accessors_report_settings() {
        let builder = OpenApiDocsBuilder::new()
            .with_context_id("petstore")
            .with_open_api(openapi_gen::parse_document(serde_json::json!({})).unwrap())
            .with_resources([Arc::new(Pets) as Arc<dyn ApiResource>]);

        assert_eq!(builder.context_id(), Some("petstore"));
        assert!(builder.open_api().is_some());
        assert_eq!(builder.resources().map(<[_]>::len), Some(1));
    }
}
