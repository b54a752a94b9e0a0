//! Upload folder storage
//!
//! All files (raw uploads and `result_` outputs) live flat in a single
//! root folder. Every name passes through [`sanitize_filename`] before it is
//! joined to the root, so no caller-supplied name can address a path outside
//! of it.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Prefix of derived result files
pub const RESULT_PREFIX: &str = "result_";

const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Reduce a client-supplied filename to a safe, flat name
///
/// Non-ASCII characters are dropped, path separators become whitespace,
/// whitespace runs become `_`, anything outside `[A-Za-z0-9_.-]` is removed
/// and leading/trailing `.`/`_` are stripped. The result may be empty.
///
/// ```
/// use sentiscope_common::sanitize_filename;
/// assert_eq!(sanitize_filename("../../etc/passwd.csv"), "etc_passwd.csv");
/// assert_eq!(sanitize_filename("my reviews.csv"), "my_reviews.csv");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let ascii: String = name
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_').to_string();

    if cfg!(windows) && !trimmed.is_empty() {
        let stem = trimmed.split('.').next().unwrap_or_default().to_ascii_uppercase();
        if WINDOWS_DEVICE_NAMES.contains(&stem.as_str()) {
            return format!("_{}", trimmed);
        }
    }

    trimmed
}

/// Name of the result file derived from an (already sanitized) upload name
pub fn result_file_name(sanitized: &str) -> String {
    format!("{}{}", RESULT_PREFIX, sanitized)
}

/// Flat file store rooted at the configured upload folder
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root folder if missing (idempotent)
    pub async fn ensure_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Path a name maps to inside the root, after sanitization
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let sanitized = sanitize_filename(name);
        if sanitized.is_empty() {
            return Err(Error::InvalidFilename(name.to_string()));
        }
        Ok(self.root.join(sanitized))
    }

    pub async fn exists(&self, name: &str) -> bool {
        match self.path_for(name) {
            Ok(path) => tokio::fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Write bytes under the sanitized name, replacing any existing file
    pub async fn store(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        self.ensure_root().await?;
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "Stored file");
        Ok(path)
    }

    /// Write bytes via a temporary sibling and rename into place
    ///
    /// Readers see either the previous file or the complete new one. When
    /// two writers race on the same name the last rename wins.
    pub async fn store_atomic(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        self.ensure_root().await?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp_path = self
            .root
            .join(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));

        if let Err(e) = tokio::fs::write(&tmp_path, bytes).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        debug!(path = %path.display(), size = bytes.len(), "Stored file atomically");
        Ok(path)
    }

    /// Read a stored file by name
    pub async fn load(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path_for(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(sanitize_filename(name)))
            }
            Err(e) => Err(e.into()),
        }
    }
}
