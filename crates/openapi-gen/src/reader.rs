// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Builds documents from the resources of an application.

use container_context::ContainerContext;
use oas3::spec::{Components, Operation, PathItem, Server, Spec, Tag};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::document::{self, parse_document};
use crate::error::GeneratorError;
use crate::resource::{Application, ResourceDescription};

/// Reads resource descriptions into an OpenAPI document.
pub struct Reader<'a> {
    container: &'a dyn ContainerContext,
}

impl<'a> Reader<'a> {
    /// Create a reader running inside `container`.
    pub fn new(container: &'a dyn ContainerContext) -> Self {
        Self { container }
    }

    /// Build a document from `base` and every resource of `application`.
    ///
    /// When the result declares no server, one pointing at the container's
    /// context path is added.
    pub fn read(
        &self,
        base: Option<&Spec>,
        application: &dyn Application,
    ) -> Result<Spec, GeneratorError> {
        let mut document = match base {
            Some(base) => base.clone(),
            None => parse_document(Value::Object(Map::new()))?,
        };
        for resource in application.singletons() {
            self.read_resource(&mut document, resource.describe())?;
        }

        if document.servers.is_empty() {
            let context_path = self.container.context_path();
            let url = if context_path.is_empty() {
                "/".to_string()
            } else {
                context_path
            };
            let server: Server = decode("servers", json!({ "url": url }))?;
            document.servers.push(server);
        }
        Ok(document)
    }

    fn read_resource(
        &self,
        document: &mut Spec,
        description: ResourceDescription,
    ) -> Result<(), GeneratorError> {
        let resource = description.path.as_str();

        let mut resource_tags = Vec::with_capacity(description.tags.len());
        for tag in description.tags {
            let tag: Tag = decode(resource, tag)?;
            resource_tags.push(tag.name.clone());
            if !document.tags.iter().any(|t| t.name == tag.name) {
                document.tags.push(tag);
            }
        }

        for op in description.operations {
            if op.hidden {
                tracing::trace!(path = %op.path, method = %op.method, "Skipping hidden operation");
                continue;
            }

            let path = join_paths(resource, &op.path);
            let mut operation: Operation = decode(resource, op.operation)?;
            let mut tags = resource_tags.clone();
            for tag in operation.tags.drain(..) {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
            operation.tags = tags;

            let paths = document.paths.get_or_insert_with(Default::default);
            let mut item = paths.get(&path).cloned().unwrap_or_else(PathItem::default);
            let Some(slot) = document::slot(&mut item, &op.method) else {
                tracing::warn!(%path, method = %op.method, "Method cannot be documented");
                self.container.log(&format!(
                    "operation {} {path} has no OpenAPI field, skipping",
                    op.method
                ));
                continue;
            };
            if slot.replace(operation).is_some() {
                tracing::warn!(%path, method = %op.method, "Duplicate operation replaced");
                self.container.log(&format!(
                    "duplicate operation {} {path}, keeping the last definition",
                    op.method
                ));
            }
            paths.insert(path, item);
        }

        if !description.schemas.is_empty() || !description.security_schemes.is_empty() {
            let components: Components = decode(
                resource,
                json!({
                    "schemas": description.schemas,
                    "securitySchemes": description.security_schemes,
                }),
            )?;
            match document.components.as_mut() {
                Some(existing) => {
                    existing.schemas.extend(components.schemas);
                    existing.security_schemes.extend(components.security_schemes);
                }
                None => document.components = Some(components),
            }
        }
        Ok(())
    }
}

/// Validate a described fragment against the document model.
fn decode<T: DeserializeOwned>(resource: &str, value: Value) -> Result<T, GeneratorError> {
    serde_json::from_value(value).map_err(|e| GeneratorError::InvalidDescription {
        resource: resource.to_string(),
        reason: e.to_string(),
    })
}

/// Join a resource path and an operation path into one normalized path.
///
/// The result has a single leading slash, no trailing slash and no empty
/// segments. Joining two empty paths gives `/`.
pub(crate) fn join_paths(base: &str, sub: &str) -> String {
    let segments: Vec<&str> = base
        .split('/')
        .chain(sub.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::Method;
    use serde_json::json;

    use super::*;
    use crate::document::operation;
    use crate::resource::{ApiResource, OperationDescription};
    use crate::testing::{FakeApplication, FakeContainer};

    struct PetResource;

    impl ApiResource for PetResource {
        fn describe(&self) -> ResourceDescription {
            let pet = json!({"$ref": "#/components/schemas/Pet"});
            ResourceDescription::new("/pet")
                .with_tag("pet", "Everything about your pets")
                .with_operation(OperationDescription::get(
                    "/{petId}",
                    json!({
                        "operationId": "getPetById",
                        "responses": {
                            "200": {
                                "description": "Pet found",
                                "content": {"application/json": {"schema": pet}}
                            }
                        }
                    }),
                ))
                .with_operation(OperationDescription::post(
                    "",
                    json!({"operationId": "addPet", "tags": ["admin"]}),
                ))
                .with_operation(OperationDescription::get("/internal", json!({})).hidden())
                .with_schema("Pet", json!({"type": "object"}))
        }
    }

    struct ShadowPetResource;

    impl ApiResource for ShadowPetResource {
        fn describe(&self) -> ResourceDescription {
            ResourceDescription::new("pet/").with_operation(OperationDescription::post(
                "/",
                json!({"operationId": "shadowAddPet"}),
            ))
        }
    }

    struct TunnelResource;

    impl ApiResource for TunnelResource {
        fn describe(&self) -> ResourceDescription {
            ResourceDescription::new("/tunnel").with_operation(OperationDescription::new(
                Method::CONNECT,
                "",
                json!({"operationId": "openTunnel"}),
            ))
        }
    }

    struct BrokenResource;

    impl ApiResource for BrokenResource {
        fn describe(&self) -> ResourceDescription {
            ResourceDescription::new("/broken")
                .with_operation(OperationDescription::get("", json!({"tags": "not-a-list"})))
        }
    }

    fn base(title: &str) -> Spec {
        parse_document(json!({"info": {"title": title, "version": "1.0.0"}})).unwrap()
    }

    #[test]
    fn test_join_paths_normalizes_slashes() {
        assert_eq!(join_paths("/pet", "/{petId}"), "/pet/{petId}");
        assert_eq!(join_paths("pet/", ""), "/pet");
        assert_eq!(join_paths("//store//", "order/"), "/store/order");
        assert_eq!(join_paths("", ""), "/");
    }

    #[test]
    fn test_read_merges_resources_into_base() {
        let container = FakeContainer::with_context_path("");
        let app = FakeApplication::new(vec![Arc::new(PetResource)]);

        let doc = Reader::new(&container).read(Some(&base("Pet Store")), &app).unwrap();

        assert_eq!(doc.info.title, "Pet Store");
        let get = operation(&doc, "/pet/{petId}", &Method::GET).unwrap();
        assert_eq!(get.operation_id.as_deref(), Some("getPetById"));
        assert_eq!(get.tags, vec!["pet"]);
        let post = operation(&doc, "/pet", &Method::POST).unwrap();
        assert_eq!(post.tags, vec!["pet", "admin"]);
        assert!(doc.components.unwrap().schemas.contains_key("Pet"));
        assert_eq!(doc.tags.len(), 1);
    }

    #[test]
    fn test_hidden_operations_are_not_documented() {
        let container = FakeContainer::with_context_path("");
        let app = FakeApplication::new(vec![Arc::new(PetResource)]);

        let doc = Reader::new(&container).read(None, &app).unwrap();
        assert!(!doc.paths.unwrap().contains_key("/pet/internal"));
    }

    #[test]
    fn test_default_server_uses_context_path() {
        let app = FakeApplication::new(vec![Arc::new(PetResource)]);

        let root = FakeContainer::with_context_path("");
        assert_eq!(Reader::new(&root).read(None, &app).unwrap().servers[0].url, "/");

        let nested = FakeContainer::with_context_path("/api");
        assert_eq!(Reader::new(&nested).read(None, &app).unwrap().servers[0].url, "/api");

        let with_server = parse_document(json!({"servers": [{"url": "https://example.com"}]}))
            .unwrap();
        let doc = Reader::new(&nested).read(Some(&with_server), &app).unwrap();
        assert_eq!(doc.servers.len(), 1);
        assert_eq!(doc.servers[0].url, "https://example.com");
    }

    #[test]
    fn test_duplicate_operation_keeps_last_and_logs() {
        let container = FakeContainer::with_context_path("");
        let app = FakeApplication::new(vec![
            Arc::new(PetResource) as Arc<dyn ApiResource>,
            Arc::new(ShadowPetResource),
        ]);

        let doc = Reader::new(&container).read(None, &app).unwrap();

        let post = operation(&doc, "/pet", &Method::POST).unwrap();
        assert_eq!(post.operation_id.as_deref(), Some("shadowAddPet"));
        assert!(container
            .logged()
            .iter()
            .any(|line| line.contains("duplicate operation POST /pet")));
    }

    #[test]
    fn test_method_without_openapi_field_leaves_no_path() {
        let container = FakeContainer::with_context_path("");
        let app = FakeApplication::new(vec![
            Arc::new(PetResource) as Arc<dyn ApiResource>,
            Arc::new(TunnelResource),
        ]);

        let doc = Reader::new(&container).read(None, &app).unwrap();

        let paths = doc.paths.as_ref().unwrap();
        assert!(!paths.contains_key("/tunnel"));
        assert!(paths.contains_key("/pet"));
        let rendered = serde_json::to_value(&doc).unwrap();
        assert!(rendered["paths"].get("/tunnel").is_none());
        assert!(container
            .logged()
            .iter()
            .any(|line| line.contains("operation CONNECT /tunnel has no OpenAPI field")));
    }

    #[test]
    fn test_invalid_description_names_the_resource() {
        let container = FakeContainer::with_context_path("");
        let app = FakeApplication::new(vec![Arc::new(BrokenResource)]);

        let err = Reader::new(&container).read(None, &app).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::InvalidDescription { ref resource, .. } if resource == "/broken"
        ));
    }
}
