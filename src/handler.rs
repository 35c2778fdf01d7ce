use std::convert::Infallible;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::{Method, Request, Response};
use tokio::io::AsyncReadExt;

use crate::logger;
use crate::response::{self, FileBody};
use crate::serving::{ServingConfig, SharedServing};

/// Files above this size are streamed instead of fully buffered.
pub const STREAM_THRESHOLD: u64 = 64 * 1024;

/// Answer one request against the current serving snapshot.
///
/// The snapshot is read exactly once, before matching starts, so a config
/// edit landing mid-request affects only later requests. Any I/O failure
/// here degrades to a 404 for this request; the listener never sees it.
pub async fn handle_request(
    req: Request<Incoming>,
    shared: Arc<SharedServing>,
) -> Result<Response<FileBody>, Infallible> {
    let snapshot = shared.snapshot().await;
    let method = req.method();
    let path = req.uri().path();

    if *method != Method::GET {
        logger::log_access(method.as_str(), path, 405, 0);
        return Ok(response::build_405_response());
    }

    let requested = strip_leading_slash(path);
    if !requested.eq_ignore_ascii_case(&snapshot.served_name) {
        logger::log_access("GET", path, 404, 0);
        return Ok(response::build_404_response());
    }

    match serve_current_file(&snapshot).await {
        Some((resp, size)) => {
            logger::log_access("GET", path, 200, size);
            Ok(resp)
        }
        None => {
            // Configured file vanished or became unreadable since the edit
            logger::log_access("GET", path, 404, 0);
            Ok(response::build_404_response())
        }
    }
}

async fn serve_current_file(snapshot: &ServingConfig) -> Option<(Response<FileBody>, u64)> {
    let mut file = tokio::fs::File::open(&snapshot.file_path).await.ok()?;
    let size = file.metadata().await.ok()?.len();

    if size > STREAM_THRESHOLD {
        Some((
            response::build_streamed_response(file, &snapshot.mime_type),
            size,
        ))
    } else {
        let mut data = Vec::new();
        file.read_to_end(&mut data).await.ok()?;
        let size = data.len() as u64;
        Some((
            response::build_fixed_response(data, &snapshot.mime_type),
            size,
        ))
    }
}

fn strip_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::strip_leading_slash;

    #[test]
    fn single_leading_slash_is_stripped() {
        assert_eq!(strip_leading_slash("/report.pdf"), "report.pdf");
    }

    #[test]
    fn only_one_slash_is_stripped() {
        assert_eq!(strip_leading_slash("//report.pdf"), "/report.pdf");
    }

    #[test]
    fn bare_path_is_untouched() {
        assert_eq!(strip_leading_slash("report.pdf"), "report.pdf");
        assert_eq!(strip_leading_slash("/"), "");
    }

    #[test]
    fn served_name_matching_ignores_ascii_case() {
        assert!(strip_leading_slash("/REPORT.PDF").eq_ignore_ascii_case("report.pdf"));
        assert!(!strip_leading_slash("/other.pdf").eq_ignore_ascii_case("report.pdf"));
    }
}
