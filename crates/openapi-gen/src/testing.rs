// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! In-memory container used by the generator's unit tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use container_context::{
    AttributeValue, Component, ContainerContext, ContextError, ContextResult, Dispatcher,
    HandlerConfig, PageConfigDescriptor, Registration, ResourceStream, SessionCookieConfig,
    SessionTrackingMode,
};
use url::Url;

use crate::resource::{ApiResource, Application};

#[derive(Default)]
pub(crate) struct FakeContainer {
    context_path: Mutex<String>,
    init_parameters: Mutex<BTreeMap<String, String>>,
    attributes: Mutex<HashMap<String, AttributeValue>>,
    resources: Mutex<HashMap<String, String>>,
    log: Mutex<Vec<String>>,
}

impl FakeContainer {
    pub(crate) fn with_context_path(path: &str) -> Self {
        let container = Self::default();
        container.set_context_path(path);
        container
    }

    pub(crate) fn set_context_path(&self, path: &str) {
        *self.context_path.lock().unwrap() = path.to_string();
    }

    pub(crate) fn add_resource(&self, path: &str, contents: &str) {
        self.resources
            .lock()
            .unwrap()
            .insert(path.to_string(), contents.to_string());
    }

    pub(crate) fn logged(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl ContainerContext for FakeContainer {
    fn context_path(&self) -> String {
        self.context_path.lock().unwrap().clone()
    }

    fn context_for(&self, _uripath: &str) -> Option<&dyn ContainerContext> {
        None
    }

    fn major_version(&self) -> u32 {
        3
    }

    fn minor_version(&self) -> u32 {
        0
    }

    fn effective_major_version(&self) -> u32 {
        3
    }

    fn effective_minor_version(&self) -> u32 {
        0
    }

    fn resource(&self, path: &str) -> Option<Url> {
        self.resources
            .lock()
            .unwrap()
            .contains_key(path)
            .then(|| Url::parse(&format!("memory:///{path}")).unwrap())
    }

    fn resource_as_stream(&self, path: &str) -> Option<ResourceStream> {
        self.resources
            .lock()
            .unwrap()
            .get(path)
            .map(|contents| Box::new(Cursor::new(contents.clone().into_bytes())) as ResourceStream)
    }

    fn log(&self, message: &str) {
        self.log.lock().unwrap().push(message.to_string());
    }

    fn log_error(&self, message: &str, cause: &(dyn std::error::Error + 'static)) {
        self.log.lock().unwrap().push(format!("{message}: {cause}"));
    }

    fn server_info(&self) -> String {
        "fake/1.0".to_string()
    }

    fn init_parameter(&self, name: &str) -> Option<String> {
        self.init_parameters.lock().unwrap().get(name).cloned()
    }

    fn init_parameter_names(&self) -> Vec<String> {
        self.init_parameters.lock().unwrap().keys().cloned().collect()
    }

    fn set_init_parameter(&self, name: &str, value: &str) -> bool {
        let mut params = self.init_parameters.lock().unwrap();
        if params.contains_key(name) {
            return false;
        }
        params.insert(name.to_string(), value.to_string());
        true
    }

    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.attributes.lock().unwrap().get(name).cloned()
    }

    fn attribute_names(&self) -> Vec<String> {
        self.attributes.lock().unwrap().keys().cloned().collect()
    }

    fn attribute_or_insert(&self, name: &str, value: AttributeValue) -> AttributeValue {
        self.attributes
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_insert(value)
            .clone()
    }

    fn set_attribute(&self, name: &str, value: Option<AttributeValue>) {
        let mut attributes = self.attributes.lock().unwrap();
        match value {
            Some(value) => {
                attributes.insert(name.to_string(), value);
            }
            None => {
                attributes.remove(name);
            }
        }
    }

    fn remove_attribute(&self, name: &str) {
        self.attributes.lock().unwrap().remove(name);
    }

    fn context_name(&self) -> Option<String> {
        None
    }

    fn request_character_encoding(&self) -> String {
        "UTF-8".to_string()
    }

    fn response_character_encoding(&self) -> String {
        "UTF-8".to_string()
    }

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

pub(crate) struct FakeConfig<'a> {
    name: String,
    container: &'a FakeContainer,
}

impl<'a> FakeConfig<'a> {
    pub(crate) fn new(name: &str, container: &'a FakeContainer) -> Self {
        Self {
            name: name.to_string(),
            container,
        }
    }
}

impl HandlerConfig for FakeConfig<'_> {
    fn handler_name(&self) -> &str {
        &self.name
    }

    fn container_context(&self) -> &dyn ContainerContext {
        self.container
    }

    fn init_parameter(&self, name: &str) -> Option<String> {
        self.container.init_parameter(name)
    }

    fn init_parameter_names(&self) -> Vec<String> {
        self.container.init_parameter_names()
    }
}

pub(crate) struct FakeApplication {
    resources: Vec<Arc<dyn ApiResource>>,
}

impl FakeApplication {
    pub(crate) fn new(resources: Vec<Arc<dyn ApiResource>>) -> Self {
        Self { resources }
    }
}

impl Application for FakeApplication {
    fn singletons(&self) -> Vec<Arc<dyn ApiResource>> {
        self.resources.clone()
    }
}
