//! Demo resource under `/api/demo`
//!
//! Kept in memory; it exists to show how handlers raise functional errors.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{delete, get};
use axum::{Json, Router};
use baseline_core::{ErrorCode, FunctionalError};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::problem::{ApiError, ApiJson, ApiPath};

/// Detail of the demo error endpoint's problem
pub const DEMO_ERROR_DETAIL: &str = "This is a demonstration of RFC 7807 Problem Details error handling. \
     The error response follows the standard format with type, title, status, and detail fields.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demo {
    pub id: String,
}

/// Body of a create request; the id is generated when absent
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewDemo {
    pub id: Option<String>,
}

/// Concurrent in-memory demo collection
#[derive(Debug, Default)]
pub struct DemoStore {
    demos: DashMap<String, Demo>,
}

impl DemoStore {
    /// All demos, ordered by id
    pub fn list(&self) -> Vec<Demo> {
        let mut demos: Vec<_> = self.demos.iter().map(|entry| entry.value().clone()).collect();
        demos.sort_by(|a, b| a.id.cmp(&b.id));
        demos
    }

    pub fn create(&self, new: NewDemo) -> Result<Demo, FunctionalError> {
        let id = new
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        match self.demos.entry(id) {
            Entry::Occupied(entry) => Err(FunctionalError::conflict(
                ErrorCode::DuplicateEntry,
                format!("a demo with id '{}' already exists", entry.key()),
            )),
            Entry::Vacant(entry) => {
                let demo = Demo { id: entry.key().clone() };
                entry.insert(demo.clone());
                Ok(demo)
            }
        }
    }

    pub fn update(&self, demo: Demo) -> Result<Demo, FunctionalError> {
        if demo.id.is_empty() {
            return Err(FunctionalError::bad_request(
                ErrorCode::DemoInvalidInput,
                "demo id must not be empty",
            ));
        }

        let Some(mut existing) = self.demos.get_mut(&demo.id) else {
            return Err(not_found(&demo.id));
        };

        *existing = demo.clone();
        Ok(demo)
    }

    pub fn delete(&self, id: &str) -> Result<(), FunctionalError> {
        self.demos.remove(id).map(|_| ()).ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &str) -> FunctionalError {
    FunctionalError::not_found(ErrorCode::DemoNotFound, format!("no demo with id '{id}'"))
}

/// Routes for the demo resource
pub fn endpoint_router() -> Router<Arc<DemoStore>> {
    Router::new()
        .route("/api/demo", get(list).post(create).put(update))
        .route("/api/demo/error", get(trigger_error))
        .route("/api/demo/{id}", delete(remove))
}

async fn list(State(store): State<Arc<DemoStore>>) -> Json<Vec<Demo>> {
    Json(store.list())
}

async fn create(State(store): State<Arc<DemoStore>>, ApiJson(new): ApiJson<NewDemo>) -> Result<Json<Demo>, ApiError> {
    let demo = store.create(new)?;
    tracing::debug!(id = %demo.id, "created demo");
    Ok(Json(demo))
}

async fn update(State(store): State<Arc<DemoStore>>, ApiJson(demo): ApiJson<Demo>) -> Result<Json<Demo>, ApiError> {
    Ok(Json(store.update(demo)?))
}

async fn remove(State(store): State<Arc<DemoStore>>, ApiPath(id): ApiPath<String>) -> Result<StatusCode, ApiError> {
    store.delete(&id)?;
    tracing::debug!(%id, "deleted demo");
    Ok(StatusCode::NO_CONTENT)
}

/// Always fails, to show what a problem response looks like
async fn trigger_error() -> Result<(), ApiError> {
    Err(FunctionalError::bad_request(ErrorCode::DemoError, DEMO_ERROR_DETAIL).into())
}
