/// Image extensions accepted for upload, lower-case.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Why an uploaded file name was refused.
#[derive(Debug, PartialEq, Eq)]
pub enum FilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename contains path separators (`/` or `\`) or is `..`.
    PathSeparator,
    /// Filename starts with a dot (hidden file).
    Hidden,
    /// Filename contains control characters (CR, LF, NUL, ...).
    ControlCharacter,
    /// Extension missing or not one of [`ALLOWED_IMAGE_EXTENSIONS`].
    UnsupportedExtension,
}

impl FilenameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Nama file tidak boleh kosong",
            Self::PathSeparator => "Nama file tidak boleh mengandung path",
            Self::Hidden => "Nama file tidak boleh diawali titik",
            Self::ControlCharacter => "Nama file mengandung karakter tidak valid",
            Self::UnsupportedExtension => {
                "Format file tidak valid. Hanya diperbolehkan jpg, jpeg, png, webp"
            }
        }
    }
}

/// Lower-cased text after the last dot, if any.
pub fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Validate the client-supplied name of an image upload and return it
/// trimmed. The name ends up as the last segment of the object path, so it
/// must be a single flat segment.
pub fn validate_image_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    // Covers NUL and CR/LF.
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') || trimmed == ".." {
        return Err(FilenameError::PathSeparator);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    match extension(trimmed) {
        Some(ext) if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(trimmed),
        _ => Err(FilenameError::UnsupportedExtension),
    }
}
