//! Photo uploads for the Graph API.
//!
//! Photos are uploaded unpublished so they can be attached to a single feed post
//! afterwards instead of appearing as separate posts on the page.

use log::{info, warn};

use super::api::{require_id, GraphClient, GraphError};

/// Maximum number of images uploaded for one post.
pub const MAX_UPLOAD_IMAGES: usize = 5;

/// Uploads one image by URL as an unpublished page photo.
///
/// # Returns
///
/// - `Ok(String)`: The media id to reference when attaching the photo to a post
/// - `Err(GraphError)`: If the upload fails or the response carries no id
pub async fn upload_unpublished_photo(
    client: &GraphClient,
    image_url: &str,
) -> Result<String, GraphError> {
    let request = client
        .post(&format!("{}/photos", client.page_id()))
        .form(&[("url", image_url), ("published", "false"), ("caption", "")]);

    let body = client.send(request, "upload_photo").await?;
    require_id(&body, "upload_photo")
}

/// Uploads up to `MAX_UPLOAD_IMAGES` images, skipping any that fail.
///
/// A failed upload never aborts the batch; the returned ids keep the order of the
/// images that succeeded.
pub async fn upload_photos(client: &GraphClient, images: &[String]) -> Vec<String> {
    let mut media_ids = Vec::new();

    for url in images.iter().take(MAX_UPLOAD_IMAGES) {
        match upload_unpublished_photo(client, url).await {
            Ok(media_id) => {
                info!("Uploaded photo {} as media {}", url, media_id);
                media_ids.push(media_id);
            }
            Err(e) => warn!("Skipping image {}: {}", url, e),
        }
    }

    if images.len() > MAX_UPLOAD_IMAGES {
        info!(
            "Ignored {} image(s) beyond the upload limit of {}",
            images.len() - MAX_UPLOAD_IMAGES,
            MAX_UPLOAD_IMAGES
        );
    }

    media_ids
}
