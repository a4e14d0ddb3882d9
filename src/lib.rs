//! # Facebook Poster Library
//!
//! A Rust web service library that turns marketplace listings into Facebook Page posts.
//! Each submitted listing is formatted into an emoji-labelled post message, rendered as a
//! standalone HTML preview that is saved to disk, and published to a Facebook Page through
//! the Graph API on a best-effort basis.
//!
//! ## Features
//!
//! - HTTP server with a publish endpoint and a health endpoint
//! - Shared-secret authentication via the `X-Api-Key` header
//! - Multi-photo Graph API posts with permalink resolution
//! - Structured logging
//!
//! ## Configuration
//!
//! - `FB_SERVICE_API_KEY`: Shared secret callers must send
//! - `FB_PAGE_ID` / `FB_PAGE_ACCESS_TOKEN`: Page credentials (publishing is skipped without them)
//! - `FB_GRAPH_VERSION`: Graph API version (defaults to `v19.0`)
//! - `FB_SERVICE_PORT`: Server port (defaults to 5500)
//! - `FB_OUTPUT_DIR`: Directory for HTML previews
//!
//! ## API Endpoints
//!
//! - `POST /api/facebook/post`: Formats, previews and publishes a listing
//! - `GET /api/health`: Returns service health status

pub mod auth;
pub mod config;
pub mod facebook;
pub mod handlers;
pub mod html;
pub mod listing;
pub mod message;
pub mod store;

// Re-export commonly used types and functions
pub use auth::{authorize_headers, is_authorized};
pub use config::{get_server_port, ServiceConfig};
pub use facebook::{publish_post, GraphClient, GraphError, PublishOutcome};
pub use handlers::{create_router, handle_facebook_post, handle_health, AppState, PublishResult};
pub use html::render_html;
pub use listing::{ListingError, ListingPayload};
pub use message::build_message;
pub use store::ArtifactStore;
