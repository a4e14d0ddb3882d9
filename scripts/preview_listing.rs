//! Listing Preview Script
//!
//! This script formats a listing JSON file the same way the publish endpoint does,
//! prints the post message, and saves the HTML preview. With `--publish` it also
//! posts the listing to the Facebook Page configured in the environment.
//!
//! ```bash
//! cargo run --bin preview_listing -- listing.json
//! FB_PAGE_ID=... FB_PAGE_ACCESS_TOKEN=... cargo run --bin preview_listing -- listing.json --publish
//! ```

use facebook_poster::{
    build_message, publish_post, render_html, ArtifactStore, GraphClient, ListingPayload,
    PublishOutcome, ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    println!("📣 Facebook Listing Preview Tool");
    println!("================================");

    let mut path = None;
    let mut publish = false;
    for arg in std::env::args().skip(1) {
        if arg == "--publish" {
            publish = true;
        } else if path.is_none() {
            path = Some(arg);
        } else {
            return Err(format!("Unexpected argument: {}", arg).into());
        }
    }
    let path = path.ok_or("Usage: preview_listing <listing.json> [--publish]")?;

    let body = std::fs::read(&path)?;
    let listing = match ListingPayload::from_json_bytes(&body) {
        Ok(listing) => listing,
        Err(e) => {
            println!("❌ {} is not a valid listing: {}", path, e);
            return Err(e.into());
        }
    };

    let config = ServiceConfig::from_env()?;
    let message = build_message(&listing);
    println!("📝 Post message:\n{}\n", message);

    let html = render_html(&listing, &message, &listing.images);
    let store = ArtifactStore::new(config.output_dir.clone());
    let html_path = store.save_html(&html, listing.listing_id).await?;
    println!("💾 HTML preview saved to {}", html_path.display());

    if !publish {
        println!("ℹ️ Run with --publish to post to the Facebook Page");
        return Ok(());
    }

    let client = GraphClient::new(&config)?;
    match publish_post(&client, &message, &listing.images).await {
        PublishOutcome::NotConfigured => {
            println!("⚠️ FB_PAGE_ID or FB_PAGE_ACCESS_TOKEN is not set, nothing was posted");
        }
        PublishOutcome::Published {
            post_id,
            permalink_url,
        } => {
            println!("✅ Post {} created", post_id);
            match permalink_url {
                Some(url) => println!("🔗 {}", url),
                None => println!("⚠️ The post has no permalink yet"),
            }
        }
        PublishOutcome::Failed(e) => {
            println!("❌ Publishing failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
