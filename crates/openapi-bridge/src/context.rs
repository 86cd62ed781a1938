// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Container context backed by a single request and the bridge's shared state.

use std::collections::HashSet;

use container_context::{
    AttributeValue, Component, ContainerContext, ContextError, ContextResult, Dispatcher,
    PageConfigDescriptor, Registration, ResourceStream, SessionCookieConfig, SessionTrackingMode,
    CONTRACT_MAJOR_VERSION, CONTRACT_MINOR_VERSION, DEFAULT_CHARACTER_ENCODING,
};
use url::Url;

use crate::request::RequestView;
use crate::resources::ResourceLoader;
use crate::store::ContainerState;

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Product name reported by [`ContextAdaptor::server_info`].
pub const SERVER_PRODUCT: &str = "axum";

/// Resolved version of [`SERVER_PRODUCT`] in the build's lock file.
pub fn server_version() -> &'static str {
    built_info::DEPENDENCIES
        .iter()
        .find_map(|(name, version)| (*name == SERVER_PRODUCT).then_some(*version))
        .unwrap_or("unknown")
}

/// A [`ContainerContext`] for one request.
///
/// The context path comes from the bound request. Resources come from the
/// bridge's loader. Initialization parameters and attributes live in the
/// [`ContainerState`] shared with every other adaptor of the same bridge,
/// so writes made through one adaptor are visible through all of them.
///
/// Members outside that surface report [`ContextError::Unsupported`].
pub struct ContextAdaptor<'a> {
    request: &'a RequestView,
    state: &'a ContainerState,
    resources: &'a dyn ResourceLoader,
}

impl<'a> ContextAdaptor<'a> {
    /// Bind a context to a request.
    pub fn new(
        request: &'a RequestView,
        state: &'a ContainerState,
        resources: &'a dyn ResourceLoader,
    ) -> Self {
        Self {
            request,
            state,
            resources,
        }
    }
}

impl ContainerContext for ContextAdaptor<'_> {
    fn context_path(&self) -> String {
        self.request.context_path().to_string()
    }

    fn context_for(&self, _uripath: &str) -> Option<&dyn ContainerContext> {
        None
    }

    fn major_version(&self) -> u32 {
        CONTRACT_MAJOR_VERSION
    }

    fn minor_version(&self) -> u32 {
        CONTRACT_MINOR_VERSION
    }

    fn effective_major_version(&self) -> u32 {
        CONTRACT_MAJOR_VERSION
    }

    fn effective_minor_version(&self) -> u32 {
        CONTRACT_MINOR_VERSION
    }

    fn resource(&self, path: &str) -> Option<Url> {
        self.resources.resource_url(path)
    }

    fn resource_as_stream(&self, path: &str) -> Option<ResourceStream> {
        self.resources.open(path)
    }

    fn log(&self, message: &str) {
        tracing::info!(context_path = %self.request.context_path(), "{message}");
    }

    fn log_error(&self, message: &str, cause: &(dyn std::error::Error + 'static)) {
        tracing::error!(
            context_path = %self.request.context_path(),
            error = %cause,
            "{message}"
        );
    }

    fn server_info(&self) -> String {
        format!("{SERVER_PRODUCT}/{}", server_version())
    }

    fn init_parameter(&self, name: &str) -> Option<String> {
        self.state.init_parameter(name)
    }

    fn init_parameter_names(&self) -> Vec<String> {
        self.state.init_parameter_names()
    }

    fn set_init_parameter(&self, name: &str, value: &str) -> bool {
        self.state.set_init_parameter(name, value)
    }

    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.state.attribute(name)
    }

    fn attribute_names(&self) -> Vec<String> {
        self.state.attribute_names()
    }

    // `None` removes the attribute, so callers can clear a binding without a
    // separate call.
    fn set_attribute(&self, name: &str, value: Option<AttributeValue>) {
        self.state.set_attribute(name, value)
    }

    fn remove_attribute(&self, name: &str) {
        self.state.remove_attribute(name)
    }

    fn attribute_or_insert(&self, name: &str, value: AttributeValue) -> AttributeValue {
        self.state.attribute_or_insert(name, value)
    }

    fn context_name(&self) -> Option<String> {
        None
    }

    fn request_character_encoding(&self) -> String {
        DEFAULT_CHARACTER_ENCODING.to_string()
    }

    fn response_character_encoding(&self) -> String {
        DEFAULT_CHARACTER_ENCODING.to_string()
    }

    // Everything below is outside what a request can back. Each member fails
    // with the same error on every call.

    fn mime_type(&self, _file: &str) -> ContextResult<Option<String>> {
        Err(ContextError::unsupported("mime_type"))
    }

    fn resource_paths(&self, _path: &str) -> ContextResult<HashSet<String>> {
        Err(ContextError::unsupported("resource_paths"))
    }

    fn real_path(&self, _path: &str) -> ContextResult<Option<String>> {
        Err(ContextError::unsupported("real_path"))
    }

    fn request_dispatcher(&self, _path: &str) -> ContextResult<Dispatcher> {
        Err(ContextError::unsupported("request_dispatcher"))
    }

    fn named_dispatcher(&self, _name: &str) -> ContextResult<Dispatcher> {
        Err(ContextError::unsupported("named_dispatcher"))
    }

    fn add_handler_class(&self, _name: &str, _class_name: &str) -> ContextResult<Registration> {
        Err(ContextError::unsupported("add_handler_class"))
    }

    fn add_handler(&self, _name: &str, _handler: Component) -> ContextResult<Registration> {
        Err(ContextError::unsupported("add_handler"))
    }

    fn add_handler_file(&self, _name: &str, _file: &str) -> ContextResult<Registration> {
        Err(ContextError::unsupported("add_handler_file"))
    }

    fn create_handler(&self, _class_name: &str) -> ContextResult<Component> {
        Err(ContextError::unsupported("create_handler"))
    }

    fn handler_registration(&self, _name: &str) -> ContextResult<Option<Registration>> {
        Err(ContextError::unsupported("handler_registration"))
    }

    fn handler_registrations(&self) -> ContextResult<Vec<Registration>> {
        Err(ContextError::unsupported("handler_registrations"))
    }

    fn add_filter_class(&self, _name: &str, _class_name: &str) -> ContextResult<Registration> {
        Err(ContextError::unsupported("add_filter_class"))
    }

    fn add_filter(&self, _name: &str, _filter: Component) -> ContextResult<Registration> {
        Err(ContextError::unsupported("add_filter"))
    }

    fn create_filter(&self, _class_name: &str) -> ContextResult<Component> {
        Err(ContextError::unsupported("create_filter"))
    }

    fn filter_registration(&self, _name: &str) -> ContextResult<Option<Registration>> {
        Err(ContextError::unsupported("filter_registration"))
    }

    fn filter_registrations(&self) -> ContextResult<Vec<Registration>> {
        Err(ContextError::unsupported("filter_registrations"))
    }

    fn session_cookie_config(&self) -> ContextResult<SessionCookieConfig> {
        Err(ContextError::unsupported("session_cookie_config"))
    }

    fn set_session_tracking_modes(
        &self,
        _modes: HashSet<SessionTrackingMode>,
    ) -> ContextResult<()> {
        Err(ContextError::unsupported("set_session_tracking_modes"))
    }

    fn default_session_tracking_modes(&self) -> ContextResult<HashSet<SessionTrackingMode>> {
        Err(ContextError::unsupported("default_session_tracking_modes"))
    }

    fn effective_session_tracking_modes(&self) -> ContextResult<HashSet<SessionTrackingMode>> {
        Err(ContextError::unsupported("effective_session_tracking_modes"))
    }

    fn add_listener_class(&self, _class_name: &str) -> ContextResult<()> {
        Err(ContextError::unsupported("add_listener_class"))
    }

    fn add_listener(&self, _listener: Component) -> ContextResult<()> {
        Err(ContextError::unsupported("add_listener"))
    }

    fn create_listener(&self, _class_name: &str) -> ContextResult<Component> {
        Err(ContextError::unsupported("create_listener"))
    }

    fn page_config_descriptor(&self) -> ContextResult<PageConfigDescriptor> {
        Err(ContextError::unsupported("page_config_descriptor"))
    }

    fn declare_roles(&self, _roles: &[&str]) -> ContextResult<()> {
        Err(ContextError::unsupported("declare_roles"))
    }

    fn virtual_server_name(&self) -> ContextResult<String> {
        Err(ContextError::unsupported("virtual_server_name"))
    }

    fn session_timeout(&self) -> ContextResult<u32> {
        Err(ContextError::unsupported("session_timeout"))
    }

    fn set_session_timeout(&self, _minutes: u32) -> ContextResult<()> {
        Err(ContextError::unsupported("set_session_timeout"))
    }

    fn set_request_character_encoding(&self, _encoding: &str) -> ContextResult<()> {
        Err(ContextError::unsupported("set_request_character_encoding"))
    }

    fn set_response_character_encoding(&self, _encoding: &str) -> ContextResult<()> {
        Err(ContextError::unsupported("set_response_character_encoding"))
    }
}
