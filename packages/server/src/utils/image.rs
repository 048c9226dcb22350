use backend::{BlobStore, StorageError};
use thiserror::Error;
use tracing::instrument;

use crate::extractors::multipart::UploadedFile;
use crate::utils::filename::{FilenameError, validate_image_filename};

/// Bucket folder an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFolder {
    Bumbu,
    Potong,
    LandingPage,
}

impl ImageFolder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bumbu => "bumbu",
            Self::Potong => "potong",
            Self::LandingPage => "landing_page",
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("File tidak valid atau corrupt")]
    EmptyFile,

    #[error("{}", .0.message())]
    InvalidFilename(FilenameError),

    #[error("Gagal mengunggah gambar ke server: {0}")]
    Upload(StorageError),

    #[error("File path tidak valid")]
    ForeignUrl,

    #[error("Gagal menghapus gambar dari storage: {0}")]
    Delete(StorageError),

    /// Every failure of a multi-image delete, in order.
    #[error("{}", .0.join("; "))]
    Several(Vec<String>),
}

impl ImageError {
    /// Failures caused by what the client sent rather than by storage.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyFile | Self::InvalidFilename(_))
    }
}

/// Object path for an upload: `<folder>/<unix-millis>-<filename>`.
pub fn object_path(folder: ImageFolder, filename: &str, millis: i64) -> String {
    format!("{}/{}-{}", folder.as_str(), millis, filename)
}

/// Check that an upload is a non-empty image with an acceptable name and
/// return the trimmed name.
pub fn check_image(file: &UploadedFile) -> Result<&str, ImageError> {
    if file.data.is_empty() {
        return Err(ImageError::EmptyFile);
    }
    validate_image_filename(&file.file_name).map_err(ImageError::InvalidFilename)
}

/// Validate and store one image; return its public URL.
#[instrument(skip(store, file), fields(folder = folder.as_str(), filename = %file.file_name))]
pub async fn upload_image(
    store: &dyn BlobStore,
    file: &UploadedFile,
    folder: ImageFolder,
) -> Result<String, ImageError> {
    let filename = check_image(file)?;

    let path = object_path(folder, filename, chrono::Utc::now().timestamp_millis());
    let content_type = file.content_type.clone().unwrap_or_else(|| {
        mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string()
    });

    store
        .upload(&path, file.data.clone(), &content_type)
        .await
        .map_err(ImageError::Upload)?;

    tracing::debug!(%path, "Image uploaded");
    Ok(store.public_url(&path))
}

/// Upload several images in order, stopping at the first failure.
pub async fn upload_images(
    store: &dyn BlobStore,
    files: &[UploadedFile],
    folder: ImageFolder,
) -> Result<Vec<String>, ImageError> {
    let mut urls = Vec::with_capacity(files.len());
    for file in files {
        urls.push(upload_image(store, file, folder).await?);
    }
    Ok(urls)
}

/// Delete the object behind a public URL produced by [`upload_image`].
#[instrument(skip(store))]
pub async fn delete_image(store: &dyn BlobStore, url: &str) -> Result<(), ImageError> {
    let path = store
        .path_from_public_url(url)
        .ok_or(ImageError::ForeignUrl)?;

    store.remove(&[path]).await.map_err(ImageError::Delete)
}

/// Delete an image that is being replaced or whose row is going away.
/// Empty values and URLs outside the store (external links, seeded rows) are
/// skipped with a warning.
pub async fn discard_image(store: &dyn BlobStore, url: &str) -> Result<(), ImageError> {
    if url.is_empty() {
        return Ok(());
    }
    match delete_image(store, url).await {
        Err(ImageError::ForeignUrl) => {
            tracing::warn!(%url, "Image URL is outside the store, leaving it");
            Ok(())
        }
        other => other,
    }
}

/// Delete every URL, collecting all failures instead of stopping.
pub async fn delete_images(store: &dyn BlobStore, urls: &[String]) -> Result<(), ImageError> {
    let mut errors = Vec::new();
    for url in urls {
        if let Err(e) = delete_image(store, url).await {
            errors.push(e.to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ImageError::Several(errors))
    }
}
