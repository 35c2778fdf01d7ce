use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ConfigError;

pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// One validated serving triple: which file, under which name, with which
/// content type. Immutable once constructed; edits install a whole new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServingConfig {
    pub file_path: PathBuf,
    pub served_name: String,
    pub mime_type: String,
}

impl ServingConfig {
    /// Validate and default the triple.
    ///
    /// The file must exist, be a regular file and be openable for reading.
    /// An empty or absent `served_name` falls back to the file's base name;
    /// an empty or absent `mime_type` falls back to `application/octet-stream`.
    pub fn new(
        file_path: impl Into<PathBuf>,
        served_name: Option<&str>,
        mime_type: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let file_path = file_path.into();

        let metadata = std::fs::metadata(&file_path)
            .map_err(|_| ConfigError::FileNotFound(file_path.clone()))?;
        if !metadata.is_file() {
            return Err(ConfigError::NotAFile(file_path));
        }
        std::fs::File::open(&file_path).map_err(|source| ConfigError::Unreadable {
            path: file_path.clone(),
            source,
        })?;

        let served_name = match served_name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => file_path
                .file_name()
                .and_then(OsStr::to_str)
                .map(str::to_string)
                .ok_or(ConfigError::NoServedName)?,
        };

        let mime_type = match mime_type {
            Some(mime) if !mime.trim().is_empty() => mime.trim().to_string(),
            _ => MIME_OCTET_STREAM.to_string(),
        };

        Ok(Self {
            file_path,
            served_name,
            mime_type,
        })
    }
}

/// Holder for the currently served triple.
///
/// Request handlers clone the inner `Arc` once at the start of matching and
/// work from that snapshot for the rest of the request, so a concurrent
/// `replace` can never show them a half-updated triple. The lock is held
/// only for the pointer swap or clone, never across file or socket I/O.
pub struct SharedServing {
    inner: RwLock<Arc<ServingConfig>>,
}

impl SharedServing {
    #[must_use]
    pub fn new(initial: ServingConfig) -> Self {
        Self {
            inner: RwLock::new(Arc::new(initial)),
        }
    }

    /// The currently installed snapshot.
    pub async fn snapshot(&self) -> Arc<ServingConfig> {
        Arc::clone(&*self.inner.read().await)
    }

    /// Install a new snapshot. Full replacement only; there is no
    /// field-by-field patch.
    pub async fn replace(&self, config: ServingConfig) -> Arc<ServingConfig> {
        let config = Arc::new(config);
        *self.inner.write().await = Arc::clone(&config);
        config
    }

    /// Validate a new triple and install it. On a validation error the
    /// previous snapshot stays in place.
    pub async fn replace_with(
        &self,
        file_path: impl Into<PathBuf>,
        served_name: Option<&str>,
        mime_type: Option<&str>,
    ) -> Result<Arc<ServingConfig>, ConfigError> {
        let config = ServingConfig::new(file_path, served_name, mime_type)?;
        Ok(self.replace(config).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(b"payload").expect("write temp file");
        file
    }

    #[test]
    fn explicit_fields_are_kept() {
        let file = temp_file();
        let config = ServingConfig::new(file.path(), Some("report.pdf"), Some("application/pdf"))
            .expect("valid config");
        assert_eq!(config.served_name, "report.pdf");
        assert_eq!(config.mime_type, "application/pdf");
        assert_eq!(config.file_path, file.path());
    }

    #[test]
    fn empty_fields_fall_back_to_defaults() {
        let file = temp_file();
        let config = ServingConfig::new(file.path(), Some("  "), None).expect("valid config");
        let base_name = file.path().file_name().unwrap().to_str().unwrap();
        assert_eq!(config.served_name, base_name);
        assert_eq!(config.mime_type, MIME_OCTET_STREAM);
    }

    #[test]
    fn missing_file_is_rejected() {
        let err = ServingConfig::new("/definitely/not/here.bin", None, None).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = ServingConfig::new(dir.path(), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::NotAFile(_)));
    }

    #[tokio::test]
    async fn replace_then_snapshot_returns_the_new_triple() {
        let first = temp_file();
        let second = temp_file();
        let shared = SharedServing::new(
            ServingConfig::new(first.path(), Some("first.bin"), None).expect("valid config"),
        );

        shared
            .replace_with(second.path(), Some("second.bin"), Some("text/plain"))
            .await
            .expect("replace succeeds");

        let snapshot = shared.snapshot().await;
        assert_eq!(snapshot.served_name, "second.bin");
        assert_eq!(snapshot.mime_type, "text/plain");
        assert_eq!(snapshot.file_path, second.path());
    }

    #[tokio::test]
    async fn failed_replace_leaves_previous_snapshot() {
        let file = temp_file();
        let shared = SharedServing::new(
            ServingConfig::new(file.path(), Some("keep.bin"), None).expect("valid config"),
        );

        let err = shared
            .replace_with("/definitely/not/here.bin", Some("gone.bin"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
        assert_eq!(shared.snapshot().await.served_name, "keep.bin");
    }
}
