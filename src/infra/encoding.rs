//! Content-Encoding identifiers understood by this crate.

use std::fmt;

use crate::error::{DecodeError, Result};

/// Value for an outbound `Accept-Encoding` header listing every decodable encoding.
///
/// Kept in the same order as [`ContentEncoding::ALL`].
pub const ACCEPT_ENCODING: &str = "gzip, deflate, br, zstd, snappy, zlib, lz4";

/// A compression scheme named by a `Content-Encoding` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentEncoding {
    Gzip,
    Deflate,
    Brotli,
    Zstd,
    Snappy,
    Zlib,
    Lz4,
}

impl ContentEncoding {
    /// Every supported encoding, in advertisement order.
    pub const ALL: [ContentEncoding; 7] = [
        ContentEncoding::Gzip,
        ContentEncoding::Deflate,
        ContentEncoding::Brotli,
        ContentEncoding::Zstd,
        ContentEncoding::Snappy,
        ContentEncoding::Zlib,
        ContentEncoding::Lz4,
    ];

    /// The wire token for this encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
            ContentEncoding::Deflate => "deflate",
            ContentEncoding::Brotli => "br",
            ContentEncoding::Zstd => "zstd",
            ContentEncoding::Snappy => "snappy",
            ContentEncoding::Zlib => "zlib",
            ContentEncoding::Lz4 => "lz4",
        }
    }

    /// Parses a `Content-Encoding` value.
    ///
    /// Matching is exact and case-sensitive. `""` and `"identity"` yield
    /// `Ok(None)`, meaning the body is passed through untouched. Anything
    /// else that is not a known token is [`DecodeError::UnsupportedEncoding`].
    pub fn parse(identifier: &str) -> Result<Option<Self>> {
        match identifier {
            "" | "identity" => Ok(None),
            other => Self::ALL
                .into_iter()
                .find(|encoding| encoding.as_str() == other)
                .map(Some)
                .ok_or_else(|| DecodeError::UnsupportedEncoding(other.to_string())),
        }
    }
}

impl fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
