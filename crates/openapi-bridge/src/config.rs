// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Handler configuration presented to the generator.

use container_context::{ContainerContext, HandlerConfig};

use crate::context::ContextAdaptor;

/// Name the documentation handler reports to the generator.
pub const HANDLER_NAME: &str = "OpenApiDocs";

/// [`HandlerConfig`] wrapping the context of one request.
///
/// Initialization parameters are read from the same store the context uses,
/// so handler and container parameters are one namespace.
pub struct ConfigAdaptor<'a> {
    context: ContextAdaptor<'a>,
}

impl<'a> ConfigAdaptor<'a> {
    /// Wrap a request's context.
    pub fn new(context: ContextAdaptor<'a>) -> Self {
        Self { context }
    }
}

impl HandlerConfig for ConfigAdaptor<'_> {
    fn handler_name(&self) -> &str {
        HANDLER_NAME
    }

    fn container_context(&self) -> &dyn ContainerContext {
        &self.context
    }

    fn init_parameter(&self, name: &str) -> Option<String> {
        self.context.init_parameter(name)
    }

    fn init_parameter_names(&self) -> Vec<String> {
        self.context.init_parameter_names()
    }
}
