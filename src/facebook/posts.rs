//! Feed post creation and permalink lookup for the Graph API.

use log::{debug, info};
use serde_json::json;

use super::api::{require_id, GraphClient, GraphError};

/// Form fields for a feed post: the message plus one `attached_media[i]` entry per media id.
pub(crate) fn feed_post_form(message: &str, media_ids: &[String]) -> Vec<(String, String)> {
    let mut form = vec![("message".to_string(), message.to_string())];
    for (idx, media_id) in media_ids.iter().enumerate() {
        form.push((
            format!("attached_media[{}]", idx),
            json!({ "media_fbid": media_id }).to_string(),
        ));
    }
    form
}

/// Creates a feed post on the page with the given message and attached photos.
///
/// With no media ids the post is text-only.
///
/// # Returns
///
/// - `Ok(String)`: The id of the created post
/// - `Err(GraphError)`: If the request fails or the response carries no id
pub async fn create_feed_post(
    client: &GraphClient,
    message: &str,
    media_ids: &[String],
) -> Result<String, GraphError> {
    info!(
        "Creating feed post on page {} with {} attached photo(s)",
        client.page_id(),
        media_ids.len()
    );

    let form = feed_post_form(message, media_ids);
    debug!("Feed post form has {} field(s)", form.len());

    let request = client
        .post(&format!("{}/feed", client.page_id()))
        .form(&form);

    let body = client.send(request, "create_feed_post").await?;
    require_id(&body, "create_feed_post")
}

/// Resolves the public permalink of a created post.
///
/// # Returns
///
/// - `Ok(Some(String))`: The permalink URL
/// - `Ok(None)`: If the lookup succeeded but carried no non-empty `permalink_url`
/// - `Err(GraphError)`: If the lookup request fails
pub async fn lookup_permalink(
    client: &GraphClient,
    post_id: &str,
) -> Result<Option<String>, GraphError> {
    let request = client
        .get(post_id)
        .query(&[("fields", "permalink_url")]);

    let body = client.send(request, "lookup_permalink").await?;
    Ok(body
        .get("permalink_url")
        .and_then(|v| v.as_str())
        .filter(|url| !url.is_empty())
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_post_form_text_only() {
        let form = feed_post_form("hello", &[]);
        assert_eq!(form, vec![("message".to_string(), "hello".to_string())]);
    }

    #[test]
    fn test_feed_post_form_indexes_media() {
        let form = feed_post_form("hello", &["111".to_string(), "222".to_string()]);
        assert_eq!(form.len(), 3);
        assert_eq!(form[1].0, "attached_media[0]");
        assert_eq!(form[1].1, r#"{"media_fbid":"111"}"#);
        assert_eq!(form[2].0, "attached_media[1]");
        assert_eq!(form[2].1, r#"{"media_fbid":"222"}"#);
    }
}
