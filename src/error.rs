use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Rejections from serving-config validation.
///
/// The previously installed config is left untouched whenever one of these
/// is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("file is not readable: {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no served name given and none could be derived from the file path")]
    NoServedName,
}

/// Failures of a single start attempt. Recoverable by retrying with a
/// different port; the server stays stopped.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("invalid TCP port: {0}")]
    InvalidPort(u16),

    #[error("failed to bind listener")]
    Bind(#[source] io::Error),
}
