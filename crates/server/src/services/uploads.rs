//! Product image uploads.
//!
//! Uploaded images are written to the configured uploads directory under a
//! random file name and served back from `/uploads/<file name>`. Only the
//! resulting URL reaches the product store.

use std::path::Path;

use axum::body::Bytes;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// URL prefix under which the uploads directory is served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Errors that can occur while storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The upload contained no bytes.
    #[error("image upload is empty")]
    Empty,

    /// The upload is not one of the accepted image types.
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    /// Writing the file failed.
    #[error("failed to store image: {0}")]
    Io(#[from] std::io::Error),
}

/// An image received from a multipart form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-supplied file name, if any.
    pub file_name: Option<String>,
    /// Client-supplied content type, if any.
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ImageUpload {
    /// Pick the stored file extension from the content type, falling back to
    /// the client file name.
    fn extension(&self) -> Result<&'static str, UploadError> {
        if let Some(ext) = self.content_type.as_deref().and_then(extension_for_mime) {
            return Ok(ext);
        }

        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match from_name.as_deref() {
            Some("jpg" | "jpeg") => Ok("jpg"),
            Some("png") => Ok("png"),
            Some("gif") => Ok("gif"),
            Some("webp") => Ok("webp"),
            _ => Err(UploadError::UnsupportedType(
                self.content_type
                    .clone()
                    .or_else(|| self.file_name.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
            )),
        }
    }
}

fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Write `upload` into `dir` and return the public URL of the stored file.
///
/// # Errors
///
/// Returns `UploadError::Empty` or `UploadError::UnsupportedType` for bad
/// input, and `UploadError::Io` if the file cannot be written.
pub async fn save_image(dir: &Path, upload: &ImageUpload) -> Result<String, UploadError> {
    if upload.bytes.is_empty() {
        return Err(UploadError::Empty);
    }
    let extension = upload.extension()?;

    tokio::fs::create_dir_all(dir).await?;

    let file_name = format!("{}.{extension}", Uuid::new_v4().simple());
    tokio::fs::write(dir.join(&file_name), &upload.bytes).await?;

    info!(file = %file_name, bytes = upload.bytes.len(), "Stored product image");
    Ok(format!("{UPLOADS_URL_PREFIX}/{file_name}"))
}
