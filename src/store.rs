//! Artifact storage for rendered HTML previews.

use log::{debug, info};
use std::path::PathBuf;

/// Writes rendered previews into a single output directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a store rooted at `dir`; nothing touches the filesystem until the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ArtifactStore { dir: dir.into() }
    }

    /// Persists a preview as `fb_post_{listing_id}_{unix_timestamp}.html`.
    ///
    /// The directory is created on first use. Two saves for the same listing within
    /// the same second overwrite each other.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: The absolute path of the written file
    /// - `Err(std::io::Error)`: If the directory cannot be created or the file cannot be written
    pub async fn save_html(&self, html: &str, listing_id: i64) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let dir = tokio::fs::canonicalize(&self.dir).await?;

        let file_name = artifact_file_name(listing_id, chrono::Utc::now().timestamp());
        let path = dir.join(file_name);
        debug!("Writing {} bytes of HTML to {}", html.len(), path.display());

        tokio::fs::write(&path, html).await?;
        info!("Saved HTML preview for listing {} at {}", listing_id, path.display());
        Ok(path)
    }
}

pub(crate) fn artifact_file_name(listing_id: i64, unix_timestamp: i64) -> String {
    format!("fb_post_{}_{}.html", listing_id, unix_timestamp)
}
