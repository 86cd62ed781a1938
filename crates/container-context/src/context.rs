// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! The [`ContainerContext`] and [`HandlerConfig`] traits.

use std::collections::HashSet;
use std::io::Read;

use url::Url;

use crate::error::ContextResult;
use crate::types::{
    AttributeValue, Component, Dispatcher, PageConfigDescriptor, Registration,
    SessionCookieConfig, SessionTrackingMode,
};

/// A readable stream over a container resource.
pub type ResourceStream = Box<dyn Read + Send>;

/// The capabilities a web container offers to the components it hosts.
///
/// The trait has no default method bodies. Implementors state for every member
/// whether it is backed by real data or reports
/// [`ContextError::Unsupported`](crate::ContextError::Unsupported), so the
/// unsupported surface of a host is always explicit.
pub trait ContainerContext: Send + Sync {
    /// Path prefix under which the hosting application is mounted.
    ///
    /// Empty when mounted at the root.
    fn context_path(&self) -> String;

    /// Context for another application mounted at `uripath`, if cross-context
    /// access is allowed.
    fn context_for(&self, uripath: &str) -> Option<&dyn ContainerContext>;

    /// Major version of the contract this container implements.
    fn major_version(&self) -> u32;

    /// Minor version of the contract this container implements.
    fn minor_version(&self) -> u32;

    /// Major version of the contract the hosted application was built against.
    fn effective_major_version(&self) -> u32;

    /// Minor version of the contract the hosted application was built against.
    fn effective_minor_version(&self) -> u32;

    /// Locate a resource. Returns `None` when it does not exist.
    fn resource(&self, path: &str) -> Option<Url>;

    /// Open a resource for reading. Returns `None` when it does not exist.
    fn resource_as_stream(&self, path: &str) -> Option<ResourceStream>;

    /// Write a message to the container log.
    fn log(&self, message: &str);

    /// Write a message and its cause to the container log.
    fn log_error(&self, message: &str, cause: &(dyn std::error::Error + 'static));

    /// Product name and version of the hosting server.
    fn server_info(&self) -> String;

    /// Value of a context initialization parameter.
    fn init_parameter(&self, name: &str) -> Option<String>;

    /// Names of all context initialization parameters.
    fn init_parameter_names(&self) -> Vec<String>;

    /// Set an initialization parameter.
    ///
    /// Returns false, leaving the existing value untouched, when a parameter
    /// with this name is already present.
    fn set_init_parameter(&self, name: &str, value: &str) -> bool;

    /// Attribute bound to `name`, if any.
    fn attribute(&self, name: &str) -> Option<AttributeValue>;

    /// Names of all bound attributes.
    fn attribute_names(&self) -> Vec<String>;

    /// Bind an attribute. Passing `None` removes the binding.
    fn set_attribute(&self, name: &str, value: Option<AttributeValue>);

    /// Remove an attribute binding. Removing an unbound name is a no-op.
    fn remove_attribute(&self, name: &str);

    /// Bind `value` unless `name` is already bound, and return the bound value.
    ///
    /// Check and bind happen as one step: concurrent callers all get the
    /// value of whichever call bound first.
    fn attribute_or_insert(&self, name: &str, value: AttributeValue) -> AttributeValue;

    /// Display name of the hosted application.
    fn context_name(&self) -> Option<String>;

    /// Encoding applied to request bodies that do not declare one.
    fn request_character_encoding(&self) -> String;

    /// Encoding applied to response bodies that do not declare one.
    fn response_character_encoding(&self) -> String;

    /// MIME type of a file, by name.
    fn mime_type(&self, file: &str) -> ContextResult<Option<String>>;

    /// Resource paths directly below `path`.
    fn resource_paths(&self, path: &str) -> ContextResult<HashSet<String>>;

    /// Filesystem path backing a virtual path.
    fn real_path(&self, path: &str) -> ContextResult<Option<String>>;

    /// Dispatcher targeting a path.
    fn request_dispatcher(&self, path: &str) -> ContextResult<Dispatcher>;

    /// Dispatcher targeting a named handler.
    fn named_dispatcher(&self, name: &str) -> ContextResult<Dispatcher>;

    /// Register a request handler by type name.
    fn add_handler_class(&self, name: &str, class_name: &str) -> ContextResult<Registration>;

    /// Register a request handler instance.
    fn add_handler(&self, name: &str, handler: Component) -> ContextResult<Registration>;

    /// Register a page template as a request handler.
    fn add_handler_file(&self, name: &str, file: &str) -> ContextResult<Registration>;

    /// Instantiate a request handler of the given type.
    fn create_handler(&self, class_name: &str) -> ContextResult<Component>;

    /// Registration of a named request handler.
    fn handler_registration(&self, name: &str) -> ContextResult<Option<Registration>>;

    /// All request handler registrations.
    fn handler_registrations(&self) -> ContextResult<Vec<Registration>>;

    /// Register a filter by type name.
    fn add_filter_class(&self, name: &str, class_name: &str) -> ContextResult<Registration>;

    /// Register a filter instance.
    fn add_filter(&self, name: &str, filter: Component) -> ContextResult<Registration>;

    /// Instantiate a filter of the given type.
    fn create_filter(&self, class_name: &str) -> ContextResult<Component>;

    /// Registration of a named filter.
    fn filter_registration(&self, name: &str) -> ContextResult<Option<Registration>>;

    /// All filter registrations.
    fn filter_registrations(&self) -> ContextResult<Vec<Registration>>;

    /// Cookie configuration used for session tracking.
    fn session_cookie_config(&self) -> ContextResult<SessionCookieConfig>;

    /// Restrict the session tracking modes the container may use.
    fn set_session_tracking_modes(&self, modes: HashSet<SessionTrackingMode>)
        -> ContextResult<()>;

    /// Session tracking modes supported by default.
    fn default_session_tracking_modes(&self) -> ContextResult<HashSet<SessionTrackingMode>>;

    /// Session tracking modes currently in effect.
    fn effective_session_tracking_modes(&self) -> ContextResult<HashSet<SessionTrackingMode>>;

    /// Register a lifecycle listener by type name.
    fn add_listener_class(&self, class_name: &str) -> ContextResult<()>;

    /// Register a lifecycle listener instance.
    fn add_listener(&self, listener: Component) -> ContextResult<()>;

    /// Instantiate a lifecycle listener of the given type.
    fn create_listener(&self, class_name: &str) -> ContextResult<Component>;

    /// Page-template configuration from the deployment descriptor.
    fn page_config_descriptor(&self) -> ContextResult<PageConfigDescriptor>;

    /// Declare security role names.
    fn declare_roles(&self, roles: &[&str]) -> ContextResult<()>;

    /// Name of the virtual host the application is deployed on.
    fn virtual_server_name(&self) -> ContextResult<String>;

    /// Session timeout in minutes.
    fn session_timeout(&self) -> ContextResult<u32>;

    /// Change the session timeout in minutes.
    fn set_session_timeout(&self, minutes: u32) -> ContextResult<()>;

    /// Change the default request character encoding.
    fn set_request_character_encoding(&self, encoding: &str) -> ContextResult<()>;

    /// Change the default response character encoding.
    fn set_response_character_encoding(&self, encoding: &str) -> ContextResult<()>;
}

/// Per-handler configuration handed to a hosted component at initialization.
pub trait HandlerConfig: Send + Sync {
    /// Name the handler is registered under.
    fn handler_name(&self) -> &str;

    /// The container context the handler runs in.
    fn container_context(&self) -> &dyn ContainerContext;

    /// Value of a handler initialization parameter.
    fn init_parameter(&self, name: &str) -> Option<String>;

    /// Names of all handler initialization parameters.
    fn init_parameter_names(&self) -> Vec<String>;
}
