//! Facebook Graph API integration module.
//!
//! This module publishes formatted listings to a Facebook Page: images are
//! uploaded as unpublished photos, attached to a single feed post, and the post's
//! permalink is resolved afterwards. Publishing is best-effort; every step is a
//! fallible operation and the orchestrator reports the outcome as a value instead
//! of failing the caller's request.

mod api;
mod photos;
mod posts;

use log::{info, warn};

pub use api::{GraphClient, GraphError};
pub use photos::{upload_photos, upload_unpublished_photo, MAX_UPLOAD_IMAGES};
pub use posts::{create_feed_post, lookup_permalink};

/// Result of a publish attempt.
#[derive(Debug)]
pub enum PublishOutcome {
    /// Page id or access token is not configured; nothing was sent.
    NotConfigured,
    /// The feed post was created.
    Published {
        post_id: String,
        /// `None` when the permalink lookup returned no URL
        permalink_url: Option<String>,
    },
    /// The feed post or the permalink lookup failed.
    Failed(GraphError),
}

impl PublishOutcome {
    /// The public post URL, or an empty string when there is none.
    pub fn post_url(&self) -> &str {
        match self {
            PublishOutcome::Published {
                permalink_url: Some(url),
                ..
            } => url,
            _ => "",
        }
    }
}

/// Publishes a message with up to `MAX_UPLOAD_IMAGES` photos to the configured page.
///
/// Image uploads that fail are skipped. A failure creating the post or resolving
/// its permalink is returned as `PublishOutcome::Failed`; this function never
/// returns an error to its caller.
///
/// # Example
///
/// ```rust,no_run
/// use facebook_poster::{publish_post, GraphClient, ServiceConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let config = ServiceConfig::from_env().unwrap();
///     let client = GraphClient::new(&config).unwrap();
///     let outcome = publish_post(&client, "📣 Car", &[]).await;
///     println!("post url: {}", outcome.post_url());
/// }
/// ```
pub async fn publish_post(
    client: &GraphClient,
    message: &str,
    images: &[String],
) -> PublishOutcome {
    if !client.is_configured() {
        info!("Page credentials not configured, skipping Facebook publish");
        return PublishOutcome::NotConfigured;
    }

    let media_ids = upload_photos(client, images).await;

    let post_id = match create_feed_post(client, message, &media_ids).await {
        Ok(post_id) => post_id,
        Err(e) => {
            warn!("Facebook publish failed while creating the post: {}", e);
            return PublishOutcome::Failed(e);
        }
    };
    info!("Created Facebook post {}", post_id);

    match lookup_permalink(client, &post_id).await {
        Ok(permalink_url) => {
            if permalink_url.is_none() {
                warn!("Post {} was created but has no permalink_url", post_id);
            }
            PublishOutcome::Published {
                post_id,
                permalink_url,
            }
        }
        Err(e) => {
            warn!(
                "Facebook publish failed while resolving permalink for {}: {}",
                post_id, e
            );
            PublishOutcome::Failed(e)
        }
    }
}
