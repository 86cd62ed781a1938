// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Resolution of the generator context for a handler.
//!
//! A context is identified by an id taken from the handler's init parameters.
//! Its configuration is resolved once and kept as a container attribute, so
//! every request served by the same container sees the same context. The
//! generated document is not part of the context and is rebuilt per request.

use std::io::Read;
use std::sync::Arc;

use container_context::{AttributeValue, ContainerContext, HandlerConfig};

use crate::config::{ConfigurationFile, GeneratorConfiguration};
use crate::error::GeneratorError;

/// Init parameter naming the context id.
pub const OPENAPI_CONTEXT_ID_KEY: &str = "openapi.context.id";

/// Prefix of the context id used when none is configured. The handler name is appended.
pub const CONTEXT_ID_HANDLER_PREFIX: &str = "openapi.context.id.servlet.";

/// Init parameter naming a configuration resource.
pub const CONFIG_LOCATION_KEY: &str = "openApi.configuration.location";

/// Init parameter overriding the pretty-print setting.
pub const PRETTY_PRINT_KEY: &str = "openApi.configuration.prettyPrint";

/// Prefix of the attribute a resolved context is stored under.
pub const CONTEXT_ATTRIBUTE_PREFIX: &str = "openapi.context.";

/// Configuration resources tried when no location is configured.
pub const DEFAULT_CONFIG_LOCATIONS: [&str; 2] =
    ["openapi-configuration.yaml", "openapi-configuration.json"];

/// A resolved generator context.
#[derive(Debug, Clone)]
pub struct OpenApiContext {
    id: String,
    configuration: GeneratorConfiguration,
}

impl OpenApiContext {
    /// Context id for a handler.
    pub fn context_id(config: &dyn HandlerConfig) -> String {
        config
            .init_parameter(OPENAPI_CONTEXT_ID_KEY)
            .unwrap_or_else(|| format!("{CONTEXT_ID_HANDLER_PREFIX}{}", config.handler_name()))
    }

    /// Attribute name a context with `id` is stored under.
    pub fn attribute_name(id: &str) -> String {
        format!("{CONTEXT_ATTRIBUTE_PREFIX}{id}")
    }

    /// Find the handler's context in the container, resolving and storing it
    /// on first use.
    pub fn resolve(
        config: &dyn HandlerConfig,
        base: &GeneratorConfiguration,
    ) -> Result<Arc<Self>, GeneratorError> {
        let id = Self::context_id(config);
        let container = config.container_context();
        let attribute = Self::attribute_name(&id);

        if let Some(existing) = container
            .attribute(&attribute)
            .and_then(|value| value.downcast::<OpenApiContext>().ok())
        {
            return Ok(existing);
        }

        let context: AttributeValue = Arc::new(Self::build(id, config, base)?);
        container
            .attribute_or_insert(&attribute, context)
            .downcast::<OpenApiContext>()
            .map_err(|_| GeneratorError::ForeignAttribute { name: attribute })
    }

    fn build(
        id: String,
        config: &dyn HandlerConfig,
        base: &GeneratorConfiguration,
    ) -> Result<Self, GeneratorError> {
        let container = config.container_context();
        let mut configuration = base.clone();

        let explicit_location = config.init_parameter(CONFIG_LOCATION_KEY);
        let locations: Vec<String> = match &explicit_location {
            Some(location) => vec![location.clone()],
            None => DEFAULT_CONFIG_LOCATIONS.iter().map(|l| l.to_string()).collect(),
        };

        match load_configuration_file(container, &locations)? {
            Some((location, file)) => {
                container.log(&format!(
                    "OpenAPI context {id}: loaded configuration from {location}"
                ));
                configuration = configuration.merged_with(file);
            }
            None => {
                if let Some(location) = explicit_location {
                    container.log(&format!(
                        "OpenAPI context {id}: configuration {location} not found, using defaults"
                    ));
                }
            }
        }

        if let Some(pretty) = config.init_parameter(PRETTY_PRINT_KEY) {
            configuration.pretty_print = Some(pretty.trim().eq_ignore_ascii_case("true"));
        }

        tracing::debug!(context_id = %id, ?configuration, "Resolved OpenAPI context");
        Ok(Self { id, configuration })
    }

    /// Context id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Effective configuration.
    pub fn configuration(&self) -> &GeneratorConfiguration {
        &self.configuration
    }
}

/// Load the first configuration resource that exists.
fn load_configuration_file(
    container: &dyn ContainerContext,
    locations: &[String],
) -> Result<Option<(String, ConfigurationFile)>, GeneratorError> {
    for location in locations {
        let Some(mut stream) = container.resource_as_stream(location) else {
            continue;
        };

        let mut contents = String::new();
        stream
            .read_to_string(&mut contents)
            .map_err(|e| GeneratorError::InvalidConfiguration {
                location: location.clone(),
                reason: e.to_string(),
            })?;

        let file = ConfigurationFile::parse(location, &contents).map_err(|reason| {
            GeneratorError::InvalidConfiguration {
                location: location.clone(),
                reason,
            }
        })?;
        return Ok(Some((location.clone(), file)));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::testing::{FakeConfig, FakeContainer};

    #[test]
    fn test_concurrent_resolution_yields_one_context() {
        let container = FakeContainer::with_context_path("");
        let config = FakeConfig::new("docs", &container);
        let base = GeneratorConfiguration::new();

        let resolved: Vec<Arc<OpenApiContext>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| OpenApiContext::resolve(&config, &base).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let stored = container
            .attribute(&OpenApiContext::attribute_name("openapi.context.id.servlet.docs"))
            .and_then(|value| value.downcast::<OpenApiContext>().ok())
            .unwrap();
        assert!(resolved.iter().all(|context| Arc::ptr_eq(context, &stored)));
    }

    #[test]
    fn test_foreign_attribute_is_reported() {
        let container = FakeContainer::with_context_path("");
        let config = FakeConfig::new("docs", &container);
        let attribute = OpenApiContext::attribute_name("openapi.context.id.servlet.docs");
        container.set_attribute(&attribute, Some(Arc::new("not a context")));

        let err = OpenApiContext::resolve(&config, &GeneratorConfiguration::new()).unwrap_err();
        assert!(matches!(err, GeneratorError::ForeignAttribute { ref name } if *name == attribute));
    }
}
