use futures::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use hyper::Response;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Unified body type: small files are sent as one buffered chunk, large
/// files as a stream read off disk piece by piece.
pub type FileBody = BoxBody<Bytes, std::io::Error>;

fn full_body(data: impl Into<Bytes>) -> FileBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

/// Fixed-length 200 with an exact `Content-Length`.
pub fn build_fixed_response(data: Vec<u8>, mime_type: &str) -> Response<FileBody> {
    let len = data.len();
    Response::builder()
        .status(200)
        .header("Content-Type", mime_type)
        .header("Content-Length", len)
        .body(full_body(data))
        .expect("Failed to build fixed response")
}

/// Streamed 200; no `Content-Length`, so HTTP/1.1 falls back to chunked
/// transfer and memory use stays bounded by the read buffer.
pub fn build_streamed_response(file: File, mime_type: &str) -> Response<FileBody> {
    let stream = ReaderStream::new(file).map_ok(Frame::data);
    Response::builder()
        .status(200)
        .header("Content-Type", mime_type)
        .body(StreamBody::new(stream).boxed())
        .expect("Failed to build streamed response")
}

pub fn build_404_response() -> Response<FileBody> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(full_body("Not Found"))
        .expect("Failed to build 404 response")
}

pub fn build_405_response() -> Response<FileBody> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .body(full_body("Method Not Allowed"))
        .expect("Failed to build 405 response")
}
