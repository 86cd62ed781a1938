// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! In-memory pet store served next to its OpenAPI documents.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use openapi_gen::{ApiResource, OperationDescription, ResourceDescription};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub pet_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub status: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Default)]
pub struct PetStore {
    pets: RwLock<BTreeMap<i64, Pet>>,
    orders: RwLock<BTreeMap<i64, Order>>,
    users: RwLock<BTreeMap<String, User>>,
}

impl PetStore {
    /// A store seeded with a few pets.
    pub fn seeded() -> Self {
        let pets = [
            (1, "Cat 1", "available"),
            (2, "Dog 1", "available"),
            (3, "Lion 1", "sold"),
        ]
        .into_iter()
        .map(|(id, name, status)| {
            (
                id,
                Pet {
                    id,
                    name: name.to_string(),
                    status: Some(status.to_string()),
                    tags: Vec::new(),
                },
            )
        })
        .collect();

        Self {
            pets: RwLock::new(pets),
            ..Default::default()
        }
    }
}

/// Routes for every resource returned by [`resources`].
pub fn routes(store: Arc<PetStore>) -> Router {
    Router::new()
        .route("/pet", get(find_pets).post(add_pet).put(update_pet))
        .route("/pet/{petId}", get(get_pet).delete(delete_pet))
        .route("/store/inventory", get(inventory))
        .route("/store/order", axum::routing::post(place_order))
        .route("/store/order/{orderId}", get(get_order).delete(delete_order))
        .route("/user", axum::routing::post(create_user))
        .route("/user/logout", get(logout))
        .route("/user/{username}", get(get_user).delete(delete_user))
        .with_state(store)
}

/// Descriptions of the pet store resources.
pub fn resources() -> Vec<Arc<dyn ApiResource>> {
    vec![
        Arc::new(PetResource),
        Arc::new(StoreResource),
        Arc::new(UserResource),
    ]
}

/// A response carrying `schema` as JSON.
fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": schema}}
    })
}

/// A required JSON request body.
fn json_body(schema: Value) -> Value {
    json!({
        "required": true,
        "content": {"application/json": {"schema": schema}}
    })
}

fn path_parameter(name: &str, schema: Value) -> Value {
    json!({"name": name, "in": "path", "required": true, "schema": schema})
}

struct PetResource;

impl ApiResource for PetResource {
    fn describe(&self) -> ResourceDescription {
        let pet = json!({"$ref": "#/components/schemas/Pet"});
        let mut pet_id = path_parameter("petId", json!({"type": "integer", "format": "int64"}));
        pet_id["description"] = json!("ID of the pet");

        ResourceDescription::new("/pet")
            .with_tag("pet", "Everything about your Pets")
            .with_schema(
                "Pet",
                json!({
                    "type": "object",
                    "required": ["id", "name"],
                    "properties": {
                        "id": {"type": "integer", "format": "int64"},
                        "name": {"type": "string", "example": "doggie"},
                        "status": {"type": "string", "enum": ["available", "pending", "sold"]},
                        "tags": {"type": "array", "items": {"type": "string"}}
                    }
                }),
            )
            .with_operation(OperationDescription::get(
                "",
                json!({
                    "summary": "Finds pets by status",
                    "operationId": "findPetsByStatus",
                    "parameters": [{
                        "name": "status",
                        "in": "query",
                        "description": "Status value to filter by",
                        "schema": {"type": "string"}
                    }],
                    "responses": {
                        "200": json_response(
                            "Matching pets",
                            json!({"type": "array", "items": pet}),
                        )
                    }
                }),
            ))
            .with_operation(OperationDescription::post(
                "",
                json!({
                    "summary": "Add pet to store",
                    "description": "Add a new pet to the store",
                    "operationId": "addPet",
                    "requestBody": json_body(pet.clone()),
                    "responses": {"200": json_response("Pet added", pet.clone())}
                }),
            ))
            .with_operation(OperationDescription::put(
                "",
                json!({
                    "summary": "Update an existing pet",
                    "operationId": "updatePet",
                    "requestBody": json_body(pet.clone()),
                    "responses": {
                        "200": json_response("Pet updated", pet.clone()),
                        "404": {"description": "Pet not found"}
                    }
                }),
            ))
            .with_operation(OperationDescription::get(
                "/{petId}",
                json!({
                    "summary": "Find pet by ID",
                    "operationId": "getPetById",
                    "parameters": [pet_id.clone()],
                    "responses": {
                        "200": json_response("The pet", pet),
                        "404": {"description": "Pet not found"}
                    }
                }),
            ))
            .with_operation(OperationDescription::delete(
                "/{petId}",
                json!({
                    "summary": "Deletes a pet by ID",
                    "operationId": "deletePet",
                    "parameters": [pet_id],
                    "responses": {
                        "204": {"description": "Pet deleted"},
                        "404": {"description": "Pet not found"}
                    }
                }),
            ))
    }
}

struct StoreResource;

impl ApiResource for StoreResource {
    fn describe(&self) -> ResourceDescription {
        let order = json!({"$ref": "#/components/schemas/Order"});
        let order_id = path_parameter("orderId", json!({"type": "integer", "format": "int64"}));

        ResourceDescription::new("/store")
            .with_tag("store", "Access to Petstore orders")
            .with_schema(
                "Order",
                json!({
                    "type": "object",
                    "required": ["id", "petId"],
                    "properties": {
                        "id": {"type": "integer", "format": "int64"},
                        "petId": {"type": "integer", "format": "int64"},
                        "quantity": {"type": "integer", "format": "int32"},
                        "status": {"type": "string", "enum": ["placed", "approved", "delivered"]}
                    }
                }),
            )
            .with_operation(OperationDescription::get(
                "/inventory",
                json!({
                    "summary": "Returns pet inventories by status",
                    "operationId": "getInventory",
                    "responses": {
                        "200": json_response(
                            "Pet counts by status",
                            json!({"type": "object", "additionalProperties": {"type": "integer"}}),
                        )
                    }
                }),
            ))
            .with_operation(OperationDescription::post(
                "/order",
                json!({
                    "summary": "Place an order for a pet",
                    "operationId": "placeOrder",
                    "requestBody": json_body(order.clone()),
                    "responses": {
                        "200": json_response("Order placed", order.clone()),
                        "404": {"description": "Pet not found"}
                    }
                }),
            ))
            .with_operation(OperationDescription::get(
                "/order/{orderId}",
                json!({
                    "summary": "Find purchase order by ID",
                    "operationId": "getOrderById",
                    "parameters": [order_id.clone()],
                    "responses": {
                        "200": json_response("The order", order),
                        "404": {"description": "Order not found"}
                    }
                }),
            ))
            .with_operation(OperationDescription::delete(
                "/order/{orderId}",
                json!({
                    "summary": "Delete purchase order by ID",
                    "operationId": "deleteOrder",
                    "parameters": [order_id],
                    "responses": {
                        "204": {"description": "Order deleted"},
                        "404": {"description": "Order not found"}
                    }
                }),
            ))
    }
}

struct UserResource;

impl ApiResource for UserResource {
    fn describe(&self) -> ResourceDescription {
        let user = json!({"$ref": "#/components/schemas/User"});
        let username = path_parameter("username", json!({"type": "string"}));

        ResourceDescription::new("/user")
            .with_tag("user", "Operations about user")
            .with_schema(
                "User",
                json!({
                    "type": "object",
                    "required": ["username"],
                    "properties": {
                        "username": {"type": "string"},
                        "firstName": {"type": "string"},
                        "lastName": {"type": "string"},
                        "email": {"type": "string"}
                    }
                }),
            )
            .with_operation(OperationDescription::post(
                "",
                json!({
                    "summary": "Create user",
                    "operationId": "createUser",
                    "requestBody": json_body(user.clone()),
                    "responses": {"200": json_response("User created", user.clone())}
                }),
            ))
            .with_operation(OperationDescription::get(
                "/{username}",
                json!({
                    "summary": "Get user by user name",
                    "operationId": "getUserByName",
                    "parameters": [username.clone()],
                    "responses": {
                        "200": json_response("The user", user),
                        "404": {"description": "User not found"}
                    }
                }),
            ))
            .with_operation(OperationDescription::delete(
                "/{username}",
                json!({
                    "summary": "Delete user",
                    "operationId": "deleteUser",
                    "parameters": [username],
                    "responses": {
                        "204": {"description": "User deleted"},
                        "404": {"description": "User not found"}
                    }
                }),
            ))
            .with_operation(
                OperationDescription::get("/logout", json!({"operationId": "logoutUser"}))
                    .hidden(),
            )
    }
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: Option<String>,
}

async fn find_pets(
    State(store): State<Arc<PetStore>>,
    Query(query): Query<StatusQuery>,
) -> Json<Vec<Pet>> {
    let pets = store.pets.read().await;
    let found = pets
        .values()
        .filter(|pet| query.status.is_none() || pet.status == query.status)
        .cloned()
        .collect();
    Json(found)
}

async fn add_pet(State(store): State<Arc<PetStore>>, Json(pet): Json<Pet>) -> Json<Pet> {
    store.pets.write().await.insert(pet.id, pet.clone());
    tracing::info!(pet_id = pet.id, "Added pet");
    Json(pet)
}

async fn update_pet(
    State(store): State<Arc<PetStore>>,
    Json(pet): Json<Pet>,
) -> Result<Json<Pet>, StatusCode> {
    let mut pets = store.pets.write().await;
    let existing = pets.get_mut(&pet.id).ok_or(StatusCode::NOT_FOUND)?;
    *existing = pet.clone();
    Ok(Json(pet))
}

async fn get_pet(
    State(store): State<Arc<PetStore>>,
    Path(pet_id): Path<i64>,
) -> Result<Json<Pet>, StatusCode> {
    store
        .pets
        .read()
        .await
        .get(&pet_id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_pet(State(store): State<Arc<PetStore>>, Path(pet_id): Path<i64>) -> StatusCode {
    match store.pets.write().await.remove(&pet_id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn inventory(State(store): State<Arc<PetStore>>) -> Json<BTreeMap<String, u32>> {
    let mut counts = BTreeMap::new();
    for pet in store.pets.read().await.values() {
        let status = pet.status.clone().unwrap_or_else(|| "unknown".to_string());
        *counts.entry(status).or_insert(0) += 1;
    }
    Json(counts)
}

async fn place_order(
    State(store): State<Arc<PetStore>>,
    Json(order): Json<Order>,
) -> Result<Json<Order>, StatusCode> {
    if !store.pets.read().await.contains_key(&order.pet_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    store.orders.write().await.insert(order.id, order.clone());
    Ok(Json(order))
}

async fn get_order(
    State(store): State<Arc<PetStore>>,
    Path(order_id): Path<i64>,
) -> Result<Json<Order>, StatusCode> {
    store
        .orders
        .read()
        .await
        .get(&order_id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_order(State(store): State<Arc<PetStore>>, Path(order_id): Path<i64>) -> StatusCode {
    match store.orders.write().await.remove(&order_id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn create_user(State(store): State<Arc<PetStore>>, Json(user): Json<User>) -> Json<User> {
    store
        .users
        .write()
        .await
        .insert(user.username.clone(), user.clone());
    Json(user)
}

async fn get_user(
    State(store): State<Arc<PetStore>>,
    Path(username): Path<String>,
) -> Result<Json<User>, StatusCode> {
    store
        .users
        .read()
        .await
        .get(&username)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_user(
    State(store): State<Arc<PetStore>>,
    Path(username): Path<String>,
) -> StatusCode {
    match store.users.write().await.remove(&username) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}
