//! HTTP route handlers for the facebook-poster service.
//!
//! This module contains the shared application state, the HTTP route handler
//! functions, and the router that wires them together.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::auth::authorize_headers;
use crate::config::ServiceConfig;
use crate::facebook::{publish_post, GraphClient, GraphError};
use crate::html::render_html;
use crate::listing::ListingPayload;
use crate::message::build_message;
use crate::store::ArtifactStore;

/// State shared by every request: configuration, Graph API client and artifact store.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub graph: GraphClient,
    pub store: ArtifactStore,
}

impl AppState {
    /// Builds the application state from a loaded configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, GraphError> {
        let graph = GraphClient::new(&config)?;
        let store = ArtifactStore::new(config.output_dir.clone());
        Ok(AppState {
            config: Arc::new(config),
            graph,
            store,
        })
    }
}

/// Builds the router with every application route.
///
/// Middleware layers are added by the caller so tests can drive the bare router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/facebook/post", post(handle_facebook_post))
        .route("/api/health", get(handle_health))
        .with_state(state)
}

/// Success body of the publish endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PublishResult {
    pub ok: bool,
    /// Permalink of the created post; empty when publishing was skipped or failed
    pub post_url: String,
    /// Absolute path of the saved HTML preview
    pub html_file: String,
}

fn err_json(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({"ok": false, "error": message})))
}

/// Handles POST requests to the `/api/facebook/post` endpoint.
///
/// Validates the `X-Api-Key` header and the listing payload, formats the post
/// message, renders and saves the HTML preview, and then attempts to publish to the
/// Facebook Page. Publishing is best-effort: a failed or skipped publish still
/// returns 200 with an empty `post_url`.
///
/// # Success Response
///
/// ```json
/// {
///   "ok": true,
///   "post_url": "https://www.facebook.com/...",
///   "html_file": "/srv/facebook-poster/output/fb_post_42_1700000000.html"
/// }
/// ```
///
/// # Error Responses
///
/// - 401 `{"ok": false, "error": "Unauthorized"}`: Missing or wrong `X-Api-Key`
/// - 400 `{"ok": false, "error": "Invalid JSON"}`: Body is not a JSON object
/// - 400 `{"ok": false, "error": "listing_id and title required"}`: Required fields missing
/// - 500 `{"ok": false, "error": "Failed to save HTML preview"}`: The preview could not be written
pub async fn handle_facebook_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PublishResult>, (StatusCode, Json<Value>)> {
    if !authorize_headers(&headers, &state.config.api_key) {
        warn!("Rejected publish request with missing or invalid API key");
        return Err(err_json(StatusCode::UNAUTHORIZED, "Unauthorized"));
    }

    let listing = ListingPayload::from_json_bytes(&body).map_err(|e| {
        warn!("Rejected publish request: {}", e);
        err_json(StatusCode::BAD_REQUEST, e.message())
    })?;
    info!(
        "Accepted listing {} with {} image(s)",
        listing.listing_id,
        listing.images.len()
    );

    let message = build_message(&listing);
    let html = render_html(&listing, &message, &listing.images);

    let html_path = match state.store.save_html(&html, listing.listing_id).await {
        Ok(path) => path,
        Err(e) => {
            error!(
                "Failed to save HTML preview for listing {}: {}",
                listing.listing_id, e
            );
            return Err(err_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save HTML preview",
            ));
        }
    };

    let outcome = publish_post(&state.graph, &message, &listing.images).await;
    info!(
        "Listing {} processed, post_url: '{}'",
        listing.listing_id,
        outcome.post_url()
    );

    Ok(Json(PublishResult {
        ok: true,
        post_url: outcome.post_url().to_string(),
        html_file: html_path.to_string_lossy().into_owned(),
    }))
}

/// Handles GET requests to the `/api/health` endpoint.
///
/// # Example Response
///
/// ```json
/// {
///   "ok": true,
///   "service": "facebook_poster",
///   "ts": 1700000000.123
/// }
/// ```
pub async fn handle_health() -> Json<Value> {
    let ts = chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0;
    Json(json!({"ok": true, "service": "facebook_poster", "ts": ts}))
}
