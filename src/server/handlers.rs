//! HTTP handlers for the contact API.
//!
//! Handlers check request shape, hand off to the [`ContactService`], and turn
//! the outcome into a status code and JSON body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::responses::ApiError;
use crate::domain::{AgeInput, ContactId};
use crate::models::Contact;
use crate::services::ContactService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ContactService>,
}

impl AppState {
    pub fn new(service: Arc<dyn ContactService>) -> Self {
        Self { service }
    }
}

/// Text of one phone entry. Strings and numbers pass through; anything else
/// becomes empty and is dropped by normalization.
fn phone_text(raw: Value) -> String {
    match raw {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Body of create and update requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ContactPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    age: Option<AgeInput>,
    #[serde(default)]
    phone_numbers: Option<Vec<Value>>,
}

impl ContactPayload {
    /// Split into name, age and raw phones, requiring name and age.
    fn into_parts(self) -> Result<(String, AgeInput, Vec<String>), ApiError> {
        let (Some(name), Some(age)) = (self.name, self.age) else {
            return Err(ApiError::bad_request("Name and age are required."));
        };
        let phones = self
            .phone_numbers
            .unwrap_or_default()
            .into_iter()
            .map(phone_text)
            .collect();
        Ok((name, age, phones))
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    #[serde(default)]
    q: Option<String>,
}

fn parse_id(raw: &str) -> Result<ContactId, ApiError> {
    Ok(raw.parse::<ContactId>()?)
}

pub(super) async fn root() -> &'static str {
    "Contact book server is running"
}

pub(super) async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::invalid_json(&rejection))?;
    let (name, age, phones) = payload.into_parts()?;

    let contact = state.service.create_contact(&name, &age, &phones).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

pub(super) async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.service.list_contacts().await?))
}

pub(super) async fn search_contacts(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(ApiError::bad_request("Enter a valid search term."));
    }

    Ok(Json(state.service.search_contacts(&query).await?))
}

pub(super) async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload.map_err(|rejection| ApiError::invalid_json(&rejection))?;
    let (name, age, phones) = payload.into_parts()?;

    let contact = state
        .service
        .update_contact(id, &name, &age, &phones)
        .await?;
    Ok(Json(contact))
}

pub(super) async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    state.service.delete_contact(id).await?;
    Ok(Json(json!({ "message": "Contact deleted successfully." })))
}

/// Update and delete routes hit without an ID segment.
pub(super) async fn missing_id() -> ApiError {
    ApiError::bad_request("Contact ID is required.")
}
