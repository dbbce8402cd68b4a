//! Content-Encoding aware decompression of HTTP response bodies.
//!
//! Hand a response to [`decode`] and read plain bytes from the returned
//! [`DecodedStream`], or use [`read_all`], [`read_into`] and [`read_into_file`]
//! to consume it in one call. Send [`ACCEPT_ENCODING`] on requests to advertise
//! every encoding this crate can decode.

pub mod config;
pub mod error;
pub mod infra;
pub mod response;
pub mod stream;

use std::io::{Read, Write};
use std::path::Path;

pub use config::Config;
pub use error::{DecodeError, Result, Stage};
pub use infra::{CodecRegistry, ContentEncoding, Decompressor, ACCEPT_ENCODING};
pub use response::{DecodeResponseExt, EncodedResponse, ResponseDecoder};
pub use stream::{DecodedStream, RawSource};

/// Decodes `response`'s body according to its `Content-Encoding` header.
pub fn decode<'a, R>(response: R) -> Result<DecodedStream<'a>>
where
    R: EncodedResponse,
    R::Body: 'a,
{
    ResponseDecoder::new().decode(response)
}

/// Decodes an arbitrary reader tagged with a content-encoding identifier.
pub fn decode_reader<'a, R>(body: R, content_encoding: &str) -> Result<DecodedStream<'a>>
where
    R: Read + Send + 'a,
{
    CodecRegistry::default().decode_reader(body, content_encoding)
}

/// Convenience function for reading a whole decoded body into memory.
pub fn read_all<R: EncodedResponse>(response: R) -> Result<Vec<u8>> {
    ResponseDecoder::new().read_all(response)
}

/// Convenience function for copying a decoded body into `sink`.
pub fn read_into<R: EncodedResponse, W: Write>(response: R, sink: W) -> Result<u64> {
    ResponseDecoder::new().read_into(response, sink)
}

/// Convenience function for writing a decoded body to a new file at `path`.
pub fn read_into_file<R, P>(response: R, path: P, mode: u32) -> Result<u64>
where
    R: EncodedResponse,
    P: AsRef<Path>,
{
    ResponseDecoder::new().read_into_file(response, path, mode)
}
