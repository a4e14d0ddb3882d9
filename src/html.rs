//! HTML preview rendering.
//!
//! Produces a self-contained HTML document showing how a listing's post will look,
//! with inline styling and no external assets besides the listing images.
//! All listing-supplied text is HTML-escaped before interpolation.

use crate::listing::ListingPayload;
use crate::message::format_price;

/// Maximum number of images embedded in the preview.
pub const MAX_PREVIEW_IMAGES: usize = 3;

/// Renders the HTML preview for a listing.
///
/// # Parameters
///
/// - `listing`: The validated listing
/// - `message`: The formatted post message, shown with newlines preserved
/// - `images`: Image URLs; only the first three are embedded
///
/// # Returns
///
/// A complete HTML document as a string.
pub fn render_html(listing: &ListingPayload, message: &str, images: &[String]) -> String {
    let title = html_escape(&listing.title);
    let category = html_escape(listing.category.as_deref().unwrap_or(""));
    let location = listing
        .location
        .as_deref()
        .map(|loc| format!(" • {}", html_escape(loc)))
        .unwrap_or_default();
    let src = html_escape(listing.source_listing_url.as_deref().unwrap_or(""));

    let images_html = images
        .iter()
        .take(MAX_PREVIEW_IMAGES)
        .map(|url| {
            format!(
                r#"<img src="{}" alt="image" style="width:100%;max-width:640px;border-radius:8px;display:block;margin:8px 0;" />"#,
                html_escape(url)
            )
        })
        .collect::<Vec<String>>()
        .join("\n");

    let price_html = format_price(listing.price.as_ref())
        .map(|price| {
            format!(
                r#"<div style="font-weight:600;color:#0b5fff;">LKR {}</div>"#,
                price
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Facebook Post Draft - {title}</title>
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <style>
    body {{ font-family: system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial; color:#111; background:#f8fafc; }}
    .card {{ max-width: 720px; margin: 24px auto; background:#fff; border:1px solid #e5e7eb; border-radius:12px; padding:16px; box-shadow: 0 8px 24px rgba(0,0,0,0.06); }}
    .title {{ font-size: 22px; font-weight: 700; margin: 4px 0 6px 0; }}
    .meta {{ color:#444; font-size: 14px; margin-bottom: 10px; }}
    .footer {{ margin-top:16px; font-size: 13px; color:#555; }}
    a {{ color:#0b5fff; text-decoration:none; }}
  </style>
</head>
<body>
  <div class="card">
    <div class="title">{title}</div>
    <div class="meta">{category}{location}</div>
    {price_html}
    <div style="margin-top:12px; white-space:pre-wrap; line-height:1.45;">{message}</div>
    <div style="margin-top:12px;">{images_html}</div>
    <div class="footer">Source: <a href="{src}">{src}</a></div>
  </div>
</body>
</html>"#,
        title = title,
        category = category,
        location = location,
        price_html = price_html,
        message = html_escape(message),
        images_html = images_html,
        src = src,
    )
}

/// Escapes HTML special characters to prevent XSS attacks.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
