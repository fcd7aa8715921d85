//! # API REST
//!
//! REST API implementation for the catalog.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for common types and utilities. Unlike the gRPC surface, REST access is
//! open; the catalog is read-only.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{pb, CatalogService, HealthService};
use catalog_core::CatalogError;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_entries,
        count_entries,
        get_entry,
        list_topics,
        count_topics,
        get_topic,
        get_topic_level,
        list_cross_references,
    ),
    components(schemas(
        pb::HealthRes,
        pb::Entry,
        pb::EntryList,
        pb::CountRes,
        pb::KeyTerm,
        pb::Level,
        pb::CrossReference,
        pb::CrossReferenceList,
        pb::Topic,
        pb::TopicList,
    ))
)]
pub struct ApiDoc;

/// Filters for list endpoints. With both, the category filter applies first.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive substring to search for
    q: Option<String>,
    /// Category (or content type, for topics) to filter by
    category: Option<String>,
}

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/specialties/:specialty/entries", get(list_entries))
        .route("/specialties/:specialty/entries/count", get(count_entries))
        .route("/specialties/:specialty/entries/:id", get(get_entry))
        .route("/topics", get(list_topics))
        .route("/topics/count", get(count_topics))
        .route("/topics/:id", get(get_topic))
        .route("/topics/:id/levels/:level", get(get_topic_level))
        .route("/topics/:id/cross-references", get(list_cross_references))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiError = (StatusCode, String);

/// Map a catalog error onto an HTTP status.
///
/// Caller mistakes keep their message; anything else is logged and reported as a bare 500.
fn error_response(err: CatalogError) -> ApiError {
    match err {
        CatalogError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        CatalogError::InvalidCategory { .. }
        | CatalogError::InvalidSpecialty(_)
        | CatalogError::InvalidLevel(_)
        | CatalogError::InvalidInput(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        other => {
            tracing::error!("Catalog error: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_owned(),
            )
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = pb::HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<pb::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/specialties/{specialty}/entries",
    params(
        ("specialty" = String, Path, description = "hematology or neurology"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Matching entries in catalog order", body = pb::EntryList),
        (status = 400, description = "Unknown specialty or category")
    )
)]
/// List, search or filter the entries of one specialty
///
/// With no parameters every entry is returned.
#[axum::debug_handler]
async fn list_entries(
    State(state): State<AppState>,
    AxumPath(specialty): AxumPath<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<pb::EntryList>, ApiError> {
    state
        .catalog
        .list_entries(
            &specialty,
            query.category.as_deref(),
            query.q.as_deref(),
        )
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/specialties/{specialty}/entries/count",
    params(("specialty" = String, Path, description = "hematology or neurology")),
    responses(
        (status = 200, description = "Number of entries", body = pb::CountRes),
        (status = 400, description = "Unknown specialty")
    )
)]
#[axum::debug_handler]
async fn count_entries(
    State(state): State<AppState>,
    AxumPath(specialty): AxumPath<String>,
) -> Result<Json<pb::CountRes>, ApiError> {
    state
        .catalog
        .count_entries(&specialty)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/specialties/{specialty}/entries/{id}",
    params(
        ("specialty" = String, Path, description = "hematology or neurology"),
        ("id" = String, Path, description = "Entry id, e.g. itp")
    ),
    responses(
        (status = 200, description = "The entry", body = pb::Entry),
        (status = 400, description = "Unknown specialty"),
        (status = 404, description = "No entry with this id")
    )
)]
/// Look up one entry by id
#[axum::debug_handler]
async fn get_entry(
    State(state): State<AppState>,
    AxumPath((specialty, id)): AxumPath<(String, String)>,
) -> Result<Json<pb::Entry>, ApiError> {
    state
        .catalog
        .get_entry(&specialty, &id)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/topics",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching topics in catalog order", body = pb::TopicList),
        (status = 400, description = "Unknown content type")
    )
)]
/// List, search or filter educational topics
#[axum::debug_handler]
async fn list_topics(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<pb::TopicList>, ApiError> {
    state
        .catalog
        .list_topics(query.category.as_deref(), query.q.as_deref())
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/topics/count",
    responses(
        (status = 200, description = "Number of topics", body = pb::CountRes)
    )
)]
#[axum::debug_handler]
async fn count_topics(State(state): State<AppState>) -> Json<pb::CountRes> {
    Json(state.catalog.count_topics())
}

#[utoipa::path(
    get,
    path = "/topics/{id}",
    params(("id" = String, Path, description = "Topic id")),
    responses(
        (status = 200, description = "The topic with all levels", body = pb::Topic),
        (status = 404, description = "No topic with this id")
    )
)]
#[axum::debug_handler]
async fn get_topic(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<pb::Topic>, ApiError> {
    state
        .catalog
        .get_topic(&id)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/topics/{id}/levels/{level}",
    params(
        ("id" = String, Path, description = "Topic id"),
        ("level" = u32, Path, description = "1 (patient) to 5 (specialist)")
    ),
    responses(
        (status = 200, description = "One level of the topic", body = pb::Level),
        (status = 400, description = "Level outside 1..=5"),
        (status = 404, description = "No topic with this id")
    )
)]
/// One graduated explanation of a topic
#[axum::debug_handler]
async fn get_topic_level(
    State(state): State<AppState>,
    AxumPath((id, level)): AxumPath<(String, u32)>,
) -> Result<Json<pb::Level>, ApiError> {
    state
        .catalog
        .topic_level(&id, level)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/topics/{id}/cross-references",
    params(("id" = String, Path, description = "Topic id")),
    responses(
        (status = 200, description = "Cross-references with resolution state", body = pb::CrossReferenceList),
        (status = 404, description = "No topic with this id")
    )
)]
/// Cross-references of a topic, each marked resolved when its target is loaded
#[axum::debug_handler]
async fn list_cross_references(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<pb::CrossReferenceList>, ApiError> {
    state
        .catalog
        .cross_references(&id)
        .map(Json)
        .map_err(error_response)
}
