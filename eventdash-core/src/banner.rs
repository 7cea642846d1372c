//! Event banner images: client-side checks and the upload session.
//!
//! Storage itself lives behind [`BannerStore`]; this crate only validates
//! files before handing them over and tracks what the user sees.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub const DEFAULT_MAX_BANNER_MB: u64 = 5;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

#[derive(Error, Debug)]
pub enum BannerError {
    #[error("Unsupported file type '{0}'. Allowed: JPG, PNG, GIF, WebP")]
    UnsupportedType(String),

    #[error("File is too large ({size_mb:.2} MB). Maximum is {max_mb} MB")]
    TooLarge { size_mb: f64, max_mb: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Store(String),
}

/// A local image picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl ImageFile {
    /// Read size from disk and guess the MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, BannerError> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(ImageFile {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            mime_type,
        })
    }

    pub fn size_mb(&self) -> f64 {
        self.size as f64 / 1024.0 / 1024.0
    }
}

/// Reject anything that is not a supported image or is over `max_size_mb`.
pub fn validate_image_file(file: &ImageFile, max_size_mb: u64) -> Result<(), BannerError> {
    if !ALLOWED_IMAGE_TYPES.contains(&file.mime_type.as_str()) {
        return Err(BannerError::UnsupportedType(file.mime_type.clone()));
    }

    if file.size > max_size_mb.saturating_mul(1024 * 1024) {
        return Err(BannerError::TooLarge {
            size_mb: file.size_mb(),
            max_mb: max_size_mb,
        });
    }

    Ok(())
}

/// Object storage for banners.
#[allow(async_fn_in_trait)]
pub trait BannerStore {
    /// Store the file and return its public URL.
    async fn upload(&self, file: &ImageFile) -> Result<String, BannerError>;

    async fn delete(&self, url: &str) -> Result<(), BannerError>;
}

/// Select, upload and delete a single banner, keeping one success or error
/// message at a time.
#[derive(Debug)]
pub struct BannerSession<S> {
    store: S,
    max_size_mb: u64,
    selected: Option<ImageFile>,
    uploaded_url: Option<String>,
    busy: bool,
    error: Option<String>,
    success: Option<String>,
}

impl<S: BannerStore> BannerSession<S> {
    pub fn new(store: S, max_size_mb: u64) -> Self {
        BannerSession {
            store,
            max_size_mb,
            selected: None,
            uploaded_url: None,
            busy: false,
            error: None,
            success: None,
        }
    }

    pub fn selected(&self) -> Option<&ImageFile> {
        self.selected.as_ref()
    }

    pub fn uploaded_url(&self) -> Option<&str> {
        self.uploaded_url.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn can_upload(&self) -> bool {
        self.selected.is_some() && !self.busy
    }

    /// Validate and select `file`. An invalid file clears the selection.
    pub fn select(&mut self, file: ImageFile) -> bool {
        match validate_image_file(&file, self.max_size_mb) {
            Ok(()) => {
                self.selected = Some(file);
                self.error = None;
                self.success = None;
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.selected = None;
                false
            }
        }
    }

    pub async fn upload(&mut self) {
        let Some(file) = self.selected.clone() else {
            return;
        };

        self.start();
        match self.store.upload(&file).await {
            Ok(url) => {
                tracing::info!(%url, "banner uploaded");
                self.success = Some(format!("Upload successful! URL: {}", url));
                self.uploaded_url = Some(url);
            }
            Err(e) => self.error = Some(message_or(&e, "Upload failed")),
        }
        self.busy = false;
    }

    pub async fn delete(&mut self) {
        let Some(url) = self.uploaded_url.clone() else {
            return;
        };

        self.start();
        match self.store.delete(&url).await {
            Ok(()) => {
                tracing::info!(%url, "banner deleted");
                self.success = Some("Image deleted successfully!".to_string());
                self.uploaded_url = None;
                self.selected = None;
            }
            Err(e) => self.error = Some(message_or(&e, "Delete failed")),
        }
        self.busy = false;
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.uploaded_url = None;
        self.error = None;
        self.success = None;
    }

    fn start(&mut self) {
        self.busy = true;
        self.error = None;
        self.success = None;
    }
}

fn message_or(e: &BannerError, fallback: &str) -> String {
    let message = e.to_string();
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn image(name: &str, size: u64, mime: &str) -> ImageFile {
        ImageFile {
            path: PathBuf::from(name),
            name: name.to_string(),
            size,
            mime_type: mime.to_string(),
        }
    }

    const MB: u64 = 1024 * 1024;

    #[test]
    fn accepts_supported_images_within_limit() {
        for mime in ALLOWED_IMAGE_TYPES {
            assert!(validate_image_file(&image("a", MB, mime), 5).is_ok(), "{mime}");
        }
        assert!(validate_image_file(&image("edge.png", 5 * MB, "image/png"), 5).is_ok());
    }

    #[test]
    fn rejects_other_types() {
        let err = validate_image_file(&image("a.svg", 10, "image/svg+xml"), 5).unwrap_err();
        assert!(matches!(err, BannerError::UnsupportedType(_)));

        let err = validate_image_file(&image("a.pdf", 10, "application/pdf"), 5).unwrap_err();
        assert!(matches!(err, BannerError::UnsupportedType(_)));
    }

    #[test]
    fn rejects_oversized_files() {
        let err = validate_image_file(&image("big.jpg", 5 * MB + 1, "image/jpeg"), 5).unwrap_err();
        assert!(matches!(err, BannerError::TooLarge { max_mb: 5, .. }));
        assert_eq!(err.to_string(), "File is too large (5.00 MB). Maximum is 5 MB");
    }

    #[test]
    fn huge_limit_does_not_overflow() {
        let file = image("tiny.png", 10, "image/png");
        assert!(validate_image_file(&file, u64::MAX / 1024).is_ok());
        assert!(validate_image_file(&file, u64::MAX).is_ok());
    }

    #[test]
    fn from_path_guesses_type_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banner.webp");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let file = ImageFile::from_path(&path).unwrap();
        assert_eq!(file.name, "banner.webp");
        assert_eq!(file.size, 2048);
        assert_eq!(file.mime_type, "image/webp");

        let jpg = dir.path().join("photo.JPG");
        std::fs::write(&jpg, b"x").unwrap();
        assert_eq!(ImageFile::from_path(&jpg).unwrap().mime_type, "image/jpeg");
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let err = ImageFile::from_path(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, BannerError::Io(_)));
    }

    #[derive(Default)]
    struct MemoryStore {
        stored: RefCell<Vec<String>>,
        fail_with: Option<String>,
    }

    impl BannerStore for MemoryStore {
        async fn upload(&self, file: &ImageFile) -> Result<String, BannerError> {
            if let Some(message) = &self.fail_with {
                return Err(BannerError::Store(message.clone()));
            }
            let url = format!("https://storage.example.com/banners/{}", file.name);
            self.stored.borrow_mut().push(url.clone());
            Ok(url)
        }

        async fn delete(&self, url: &str) -> Result<(), BannerError> {
            if let Some(message) = &self.fail_with {
                return Err(BannerError::Store(message.clone()));
            }
            self.stored.borrow_mut().retain(|u| u != url);
            Ok(())
        }
    }

    #[tokio::test]
    async fn select_upload_delete() {
        let mut session = BannerSession::new(MemoryStore::default(), 5);

        assert!(session.select(image("cover.png", MB, "image/png")));
        assert!(session.can_upload());

        session.upload().await;
        let url = "https://storage.example.com/banners/cover.png";
        assert_eq!(session.uploaded_url(), Some(url));
        assert_eq!(
            session.success(),
            Some("Upload successful! URL: https://storage.example.com/banners/cover.png")
        );
        assert!(!session.is_busy());

        session.delete().await;
        assert_eq!(session.success(), Some("Image deleted successfully!"));
        assert!(session.uploaded_url().is_none());
        assert!(session.selected().is_none());
        assert!(session.store.stored.borrow().is_empty());
    }

    #[tokio::test]
    async fn invalid_selection_clears_previous_file() {
        let mut session = BannerSession::new(MemoryStore::default(), 5);
        assert!(session.select(image("cover.png", MB, "image/png")));
        assert!(!session.select(image("notes.txt", 10, "text/plain")));

        assert!(session.selected().is_none());
        assert!(session.error().unwrap().contains("text/plain"));
        assert!(!session.can_upload());

        // Nothing selected: upload is a no-op.
        session.upload().await;
        assert!(session.uploaded_url().is_none());
    }

    #[tokio::test]
    async fn store_failure_uses_fallback_when_blank() {
        let store = MemoryStore {
            fail_with: Some(String::new()),
            ..Default::default()
        };
        let mut session = BannerSession::new(store, 5);
        assert!(session.select(image("cover.gif", 10, "image/gif")));

        session.upload().await;
        assert_eq!(session.error(), Some("Upload failed"));
        assert!(session.uploaded_url().is_none());
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn store_failure_message_is_kept() {
        let store = MemoryStore {
            fail_with: Some("bucket not found".into()),
            ..Default::default()
        };
        let mut session = BannerSession::new(store, 5);
        assert!(session.select(image("cover.gif", 10, "image/gif")));

        session.upload().await;
        assert_eq!(session.error(), Some("bucket not found"));
    }

    #[tokio::test]
    async fn clear_resets_everything() {
        let mut session = BannerSession::new(MemoryStore::default(), 5);
        assert!(session.select(image("cover.png", 10, "image/png")));
        session.upload().await;

        session.clear();
        assert!(session.selected().is_none());
        assert!(session.uploaded_url().is_none());
        assert!(session.error().is_none());
        assert!(session.success().is_none());
    }
}
