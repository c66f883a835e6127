use std::path::{Path, PathBuf};
use thiserror::Error;

/// Image extensions accepted for place pictures
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Missing file field")]
    MissingFile,

    #[error("Missing filename")]
    MissingFilename,

    #[error("Unsupported image type")]
    UnsupportedType(String),

    #[error("File exceeds {0} bytes")]
    TooLarge(usize),

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Local directory holding uploaded place images
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    url_prefix: String,
    max_bytes: usize,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Create the upload directory if it is missing
    pub fn ensure_dir(&self) -> Result<(), UploadError> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Write an uploaded image and return its public URL path
    ///
    /// An existing file with the same name is overwritten.
    pub async fn save(&self, filename: &str, contents: &[u8]) -> Result<String, UploadError> {
        let name = sanitize_filename(filename)?;

        if contents.len() > self.max_bytes {
            return Err(UploadError::TooLarge(self.max_bytes));
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&name), contents).await?;

        tracing::info!("Stored place image {} ({} bytes)", name, contents.len());
        Ok(format!("{}/{}", self.url_prefix, name))
    }
}

/// Reduce a client-supplied filename to a safe file name in the upload dir
///
/// Directory components are dropped, spaces become underscores, and anything
/// outside `a-z A-Z 0-9 . - _` is removed. The extension must be an image type.
pub fn sanitize_filename(raw: &str) -> Result<String, UploadError> {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let name: String = base
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let name = name.trim_start_matches('.').to_string();

    if name.is_empty() {
        return Err(UploadError::MissingFilename);
    }

    let extension = Path::new(&name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::UnsupportedType(extension));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("golden bay.JPG").unwrap(), "golden_bay.JPG");
        assert_eq!(sanitize_filename("../../etc/mdina.png").unwrap(), "mdina.png");
        assert_eq!(sanitize_filename("C:\\pics\\grotto.webp").unwrap(), "grotto.webp");
        assert_eq!(sanitize_filename("..hidden.jpeg").unwrap(), "hidden.jpeg");
    }

    #[test]
    fn test_sanitize_rejects_bad_names() {
        assert!(matches!(sanitize_filename(""), Err(UploadError::MissingFilename)));
        assert!(matches!(sanitize_filename("dir/"), Err(UploadError::MissingFilename)));
        assert!(matches!(
            sanitize_filename("script.sh"),
            Err(UploadError::UnsupportedType(_))
        ));
        assert!(matches!(
            sanitize_filename("noext"),
            Err(UploadError::UnsupportedType(_))
        ));
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let images = ImageStore::new(dir.path().join("places"), "/static/places/", 1024);

        let url = images.save("blue grotto.png", b"png-bytes").await.unwrap();

        assert_eq!(url, "/static/places/blue_grotto.png");
        let written = std::fs::read(dir.path().join("places/blue_grotto.png")).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn test_save_rejects_oversized() {
        let dir = tempfile::tempdir().unwrap();
        let images = ImageStore::new(dir.path(), "/static/places", 4);

        let result = images.save("a.png", b"too large").await;
        assert!(matches!(result, Err(UploadError::TooLarge(4))));
    }
}
