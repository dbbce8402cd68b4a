//! Response-like inputs.

use std::borrow::Cow;
use std::io::Read;

use http::header::CONTENT_ENCODING;

/// A response whose body may be content-encoded.
pub trait EncodedResponse {
    type Body: Read + Send;

    /// The `Content-Encoding` value, or `""` when the header is absent.
    fn content_encoding(&self) -> Cow<'_, str>;

    /// Gives up the raw body.
    fn into_raw_body(self) -> Self::Body;
}

impl<B> EncodedResponse for http::Response<B>
where
    B: Read + Send,
{
    type Body = B;

    fn content_encoding(&self) -> Cow<'_, str> {
        // First value wins; non-UTF-8 bytes survive lossily so they fail lookup
        // instead of passing the body through.
        self.headers()
            .get(CONTENT_ENCODING)
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .unwrap_or(Cow::Borrowed(""))
    }

    fn into_raw_body(self) -> B {
        self.into_body()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_missing_header_is_empty() {
        let response = http::Response::new(&b""[..]);
        assert_eq!(response.content_encoding(), "");
    }

    #[test]
    fn test_header_value_is_verbatim() {
        let response = http::Response::builder()
            .header("Content-Encoding", "br")
            .body(&b""[..])
            .unwrap();
        assert_eq!(response.content_encoding(), "br");

        let response = http::Response::builder()
            .header("content-encoding", "GZip")
            .body(&b""[..])
            .unwrap();
        assert_eq!(response.content_encoding(), "GZip");
    }

    #[test]
    fn test_first_header_value_wins() {
        let mut response = http::Response::new(&b""[..]);
        response.headers_mut().append(CONTENT_ENCODING, HeaderValue::from_static("zstd"));
        response.headers_mut().append(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        assert_eq!(response.content_encoding(), "zstd");
    }

    #[test]
    fn test_non_utf8_header_is_not_empty() {
        let mut response = http::Response::new(&b""[..]);
        response
            .headers_mut()
            .insert(CONTENT_ENCODING, HeaderValue::from_bytes(b"gz\xffip").unwrap());
        assert_ne!(response.content_encoding(), "");
    }
}
