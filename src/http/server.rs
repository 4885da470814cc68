//! HTTP API Server for Apparitions
//!
//! Serves the listing pipeline and event details as JSON. Events are copied
//! out of storage per request, then filtered and sorted in memory.

use crate::{
    config::AppConfig,
    core::Event,
    error::Error,
    query::{run_listing, sort_label, sort_link_params, ListingQuery, SUPPORTED_SORTS},
    storage::EventRepository,
};
use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// One row of the listing
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EventSummary {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub category: String,
    pub years: String,
    pub description: String,
    pub country: Option<String>,
    pub image_filename: Option<String>,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            slug: event.slug().into_owned(),
            name: event.name.clone(),
            category: event.category.clone(),
            years: event.years.clone(),
            description: event.description.clone(),
            country: event.country.clone(),
            image_filename: event.image_filename.clone(),
        }
    }
}

/// A sort the client can switch to, with the query string that selects it
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SortOption {
    pub name: String,
    pub slug: String,
    pub orientation: String,
    pub query: String,
}

/// Response for the event listing
#[derive(Debug, Serialize, Deserialize)]
pub struct ListingResponse {
    pub events: Vec<EventSummary>,
    pub total: usize,
    pub categories: Vec<String>,
    pub selected_categories: Vec<String>,
    pub start_year: i32,
    pub end_year: i32,
    pub current_sort: String,
    pub current_sort_label: Option<String>,
    pub supported_sorts: Vec<SortOption>,
}

#[derive(Debug, Deserialize)]
pub struct DetailParams {
    /// Church whose approval should be reported, e.g. "Catholic Church"
    pub church: Option<String>,
}

/// Response for a single event
#[derive(Debug, Serialize, Deserialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: Event,
    pub church_approved: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Generic success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Shared application state
pub struct AppState {
    pub repository: Mutex<EventRepository>,
    pub config: AppConfig,
}

impl AppState {
    fn repository(&self) -> Result<MutexGuard<'_, EventRepository>, ApiError> {
        self.repository
            .lock()
            .map_err(|_| ApiError::InternalError("event repository lock poisoned".to_string()))
    }
}

/// Run `work` against the repository on the blocking thread pool.
async fn with_repository<T, F>(state: &Arc<AppState>, work: F) -> Result<T, ApiError>
where
    F: FnOnce(&EventRepository) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || {
        let repository = state.repository()?;
        let result = work(&repository);
        result.map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("repository task failed: {}", e)))?
}

/// Custom error type for API errors
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            other => {
                tracing::error!(error = %other, "request failed");
                ApiError::InternalError(other.to_string())
            }
        }
    }
}

/// Decode a raw query string into ordered pairs, keeping repeated keys.
/// A query string that cannot be decoded reads as empty.
pub fn query_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    let raw = raw.unwrap_or_default();
    match serde_urlencoded::from_str(raw) {
        Ok(pairs) => pairs,
        Err(e) => {
            tracing::debug!(query = raw, error = %e, "ignoring undecodable query string");
            Vec::new()
        }
    }
}

/// Build listing criteria from raw query pairs.
///
/// Repeated `category` keys form the category set. Year values that are not
/// integers read as 0 (unbounded). A missing or empty `sort_by` falls back to
/// `default_sort`.
pub fn parse_listing_params(pairs: &[(String, String)], default_sort: &str) -> ListingQuery {
    let mut query = ListingQuery::default();
    for (key, value) in pairs {
        match key.as_str() {
            "category" => query.categories.push(value.clone()),
            "start_year" => query.start_year = value.trim().parse().unwrap_or(0),
            "end_year" => query.end_year = value.trim().parse().unwrap_or(0),
            "sort_by" => query.sort_by = value.clone(),
            _ => {}
        }
    }
    if query.sort_by.is_empty() {
        query.sort_by = default_sort.to_string();
    }
    query
}

/// Create the HTTP server with all routes
pub fn create_server(repository: EventRepository, config: AppConfig) -> Router {
    let state = Arc::new(AppState { repository: Mutex::new(repository), config });

    // Configure CORS
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/events", get(list_events))
        .route("/api/events/:slug", get(get_event))
        .route("/api/categories", get(list_categories))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(SuccessResponse { message: "Apparitions HTTP API is running".to_string() })
}

/// GET /api/events - Filtered, sorted listing
async fn list_events(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ListingResponse>, ApiError> {
    let pairs = query_pairs(raw.as_deref());
    let query = parse_listing_params(&pairs, &state.config.default_sort);
    tracing::debug!(
        start_year = query.start_year,
        end_year = query.end_year,
        sort_by = query.sort_by.as_str(),
        categories = ?query.categories,
        "listing events"
    );

    let (events, categories) = with_repository(&state, |repository| {
        Ok((repository.all_events()?, repository.categories()?))
    })
    .await?;

    let listing = run_listing(&events, &query);
    let supported_sorts = SUPPORTED_SORTS
        .iter()
        .map(|sort| SortOption {
            name: sort.name.to_string(),
            slug: sort.slug.to_string(),
            orientation: sort.orientation.as_str().to_string(),
            query: serde_urlencoded::to_string(sort_link_params(&pairs, sort)).unwrap_or_default(),
        })
        .collect();

    Ok(Json(ListingResponse {
        total: listing.len(),
        events: listing.into_iter().map(EventSummary::from).collect(),
        categories,
        selected_categories: query.categories.clone(),
        start_year: query.start_year,
        end_year: query.end_year,
        current_sort_label: sort_label(&query.sort_by).map(str::to_string),
        current_sort: query.sort_by,
        supported_sorts,
    }))
}

/// GET /api/events/:slug - Event details
async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<DetailParams>,
) -> Result<Json<EventDetailResponse>, ApiError> {
    let lookup = slug.clone();
    let event = with_repository(&state, move |repository| repository.event_by_slug(&lookup))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Event '{}' not found", slug)))?;

    let church_approved = params.church.as_deref().map(|church| event.is_church_approved(church));
    Ok(Json(EventDetailResponse { event, church_approved }))
}

/// GET /api/categories - Distinct categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = with_repository(&state, EventRepository::categories).await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// Start the HTTP server on the specified address
pub async fn start_server(
    addr: &str,
    repository: EventRepository,
    config: AppConfig,
) -> crate::Result<()> {
    let app = create_server(repository, config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Apparitions HTTP API listening on http://{}", addr);
    tracing::info!("  GET /api/events          - Filtered, sorted event listing");
    tracing::info!("  GET /api/events/:slug    - Event details");
    tracing::info!("  GET /api/categories      - Distinct categories");
    tracing::info!("  GET /health              - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}
