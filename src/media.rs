//! Image transcoding and upload artifact lifecycle.

use std::{
    io,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use metrics::counter;
use tracing::{debug, warn};
use uuid::Uuid;

/// Read a persisted upload and encode its full contents as base64.
///
/// The whole file is read into memory; usable image size is bounded by the
/// request body limit enforced upstream.
pub async fn encode_file(path: &Path) -> io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(BASE64.encode(bytes))
}

/// Data URI for a vision request image reference.
///
/// The JPEG label is fixed regardless of the actual source encoding; the
/// upstream endpoint accepts the payload either way and changing the label
/// would change the wire contract.
pub fn jpeg_data_uri(image_b64: &str) -> String {
    format!("data:image/jpeg;base64,{image_b64}")
}

/// Temporary file backing one multipart image upload.
///
/// Exclusively owned by a single vision request from creation to deletion.
#[derive(Debug)]
pub struct UploadArtifact {
    path: PathBuf,
}

impl UploadArtifact {
    /// Persist uploaded bytes under `dir` with a unique name.
    pub async fn persist(dir: &Path, bytes: &[u8]) -> io::Result<Self> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("{}.bin", Uuid::new_v4()));
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "persisted upload artifact");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the backing file.
    ///
    /// Deletion failure is logged and counted, never surfaced to the client:
    /// the HTTP outcome has already been decided by the time cleanup runs.
    pub async fn cleanup(self) {
        if let Err(err) = tokio::fs::remove_file(&self.path).await {
            counter!("vision_upload_cleanup_failures_total").increment(1);
            warn!(path = %self.path.display(), error = %err, "failed to delete upload artifact");
        } else {
            debug!(path = %self.path.display(), "deleted upload artifact");
        }
    }
}
