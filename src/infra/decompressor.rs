//! Content decompression infrastructure.
//!
//! Provides trait-based abstractions for streaming HTTP body decompression,
//! supporting gzip, deflate, zlib, brotli, zstd, snappy and lz4 encodings.

use std::io::{self, Cursor, Read};

use super::encoding::ContentEncoding;
use crate::config::Config;
use crate::error::{DecodeError, Result};
use crate::stream::{DecodedStream, RawSource};

const GZIP_MAGIC: [u8; 3] = [0x1f, 0x8b, 0x08];

/// Trait for streaming content decompression.
///
/// An implementation wraps a raw body in a reader that yields decoded bytes.
/// The returned reader owns the body.
pub trait Decompressor: Send + Sync {
    /// The content-encoding this decompressor handles.
    fn encoding(&self) -> ContentEncoding;

    /// Wraps `body` in a decoding reader.
    ///
    /// # Errors
    ///
    /// Formats with a fixed header check it here and fail with the codec's
    /// error; nothing beyond that header is read from `body`.
    fn decoder<'a>(&self, body: RawSource<'a>) -> io::Result<RawSource<'a>>;
}

/// Gzip decompressor implementation. Concatenated members are decoded in sequence.
#[derive(Default)]
pub struct GzipDecompressor;

impl Decompressor for GzipDecompressor {
    fn encoding(&self) -> ContentEncoding {
        ContentEncoding::Gzip
    }

    fn decoder<'a>(&self, body: RawSource<'a>) -> io::Result<RawSource<'a>> {
        let body = replay_header(body, "gzip", |header: &[u8; 3]| *header == GZIP_MAGIC)?;
        Ok(Box::new(flate2::read::MultiGzDecoder::new(body)))
    }
}

/// Raw deflate decompressor implementation.
#[derive(Default)]
pub struct DeflateDecompressor;

impl Decompressor for DeflateDecompressor {
    fn encoding(&self) -> ContentEncoding {
        ContentEncoding::Deflate
    }

    fn decoder<'a>(&self, body: RawSource<'a>) -> io::Result<RawSource<'a>> {
        Ok(Box::new(flate2::read::DeflateDecoder::new(body)))
    }
}

/// Zlib decompressor implementation.
#[derive(Default)]
pub struct ZlibDecompressor;

impl Decompressor for ZlibDecompressor {
    fn encoding(&self) -> ContentEncoding {
        ContentEncoding::Zlib
    }

    fn decoder<'a>(&self, body: RawSource<'a>) -> io::Result<RawSource<'a>> {
        let body = replay_header(body, "zlib", |&[cmf, flg]: &[u8; 2]| {
            // CM must be deflate with a window of at most 32K, and FCHECK must balance.
            let check = (u16::from(cmf) << 8) | u16::from(flg);
            cmf & 0x0f == 8 && cmf >> 4 <= 7 && check % 31 == 0
        })?;
        Ok(Box::new(flate2::read::ZlibDecoder::new(body)))
    }
}

/// Brotli decompressor implementation.
pub struct BrotliDecompressor {
    buffer_size: usize,
}

impl BrotliDecompressor {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }
}

impl Default for BrotliDecompressor {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BROTLI_BUFFER_SIZE)
    }
}

impl Decompressor for BrotliDecompressor {
    fn encoding(&self) -> ContentEncoding {
        ContentEncoding::Brotli
    }

    fn decoder<'a>(&self, body: RawSource<'a>) -> io::Result<RawSource<'a>> {
        Ok(Box::new(brotli::Decompressor::new(body, self.buffer_size)))
    }
}

/// Zstandard decompressor implementation.
#[derive(Default)]
pub struct ZstdDecompressor;

impl Decompressor for ZstdDecompressor {
    fn encoding(&self) -> ContentEncoding {
        ContentEncoding::Zstd
    }

    fn decoder<'a>(&self, body: RawSource<'a>) -> io::Result<RawSource<'a>> {
        Ok(Box::new(zstd::stream::read::Decoder::new(body)?))
    }
}

/// Snappy (framing format) decompressor implementation.
#[derive(Default)]
pub struct SnappyDecompressor;

impl Decompressor for SnappyDecompressor {
    fn encoding(&self) -> ContentEncoding {
        ContentEncoding::Snappy
    }

    fn decoder<'a>(&self, body: RawSource<'a>) -> io::Result<RawSource<'a>> {
        Ok(Box::new(snap::read::FrameDecoder::new(body)))
    }
}

/// LZ4 (frame format) decompressor implementation.
#[derive(Default)]
pub struct Lz4Decompressor;

impl Decompressor for Lz4Decompressor {
    fn encoding(&self) -> ContentEncoding {
        ContentEncoding::Lz4
    }

    fn decoder<'a>(&self, body: RawSource<'a>) -> io::Result<RawSource<'a>> {
        Ok(Box::new(lz4_flex::frame::FrameDecoder::new(body)))
    }
}

/// Reads a fixed-size header, checks it, and puts it back in front of the body.
fn replay_header<'a, const N: usize>(
    mut body: RawSource<'a>,
    format: &str,
    is_valid: impl FnOnce(&[u8; N]) -> bool,
) -> io::Result<RawSource<'a>> {
    let mut header = [0u8; N];
    body.read_exact(&mut header)?;
    if !is_valid(&header) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid {format} header"),
        ));
    }
    Ok(Box::new(Cursor::new(header).chain(body)))
}

/// Multi-format decompressor that selects the appropriate codec based on encoding.
pub struct CodecRegistry {
    gzip: GzipDecompressor,
    deflate: DeflateDecompressor,
    zlib: ZlibDecompressor,
    brotli: BrotliDecompressor,
    zstd: ZstdDecompressor,
    snappy: SnappyDecompressor,
    lz4: Lz4Decompressor,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl CodecRegistry {
    pub fn new(config: &Config) -> Self {
        Self {
            gzip: GzipDecompressor,
            deflate: DeflateDecompressor,
            zlib: ZlibDecompressor,
            brotli: BrotliDecompressor::new(config.brotli_buffer_size),
            zstd: ZstdDecompressor,
            snappy: SnappyDecompressor,
            lz4: Lz4Decompressor,
        }
    }

    /// Returns the decompressor registered for `encoding`.
    pub fn decoder_for(&self, encoding: ContentEncoding) -> &dyn Decompressor {
        match encoding {
            ContentEncoding::Gzip => &self.gzip,
            ContentEncoding::Deflate => &self.deflate,
            ContentEncoding::Zlib => &self.zlib,
            ContentEncoding::Brotli => &self.brotli,
            ContentEncoding::Zstd => &self.zstd,
            ContentEncoding::Snappy => &self.snappy,
            ContentEncoding::Lz4 => &self.lz4,
        }
    }

    /// Wraps `body` in the decoder named by `identifier`.
    ///
    /// # Arguments
    ///
    /// * `body` - The raw, possibly compressed body
    /// * `identifier` - The content-encoding header value (e.g., "gzip", "br", "")
    ///
    /// # Returns
    ///
    /// A [`DecodedStream`] on success. An empty or `identity` identifier passes
    /// `body` through unchanged. An unknown identifier is
    /// [`DecodeError::UnsupportedEncoding`] and a header rejected by the codec is
    /// [`DecodeError::CodecInit`]; in both cases `body` has been released.
    /// Callers that need the body back on an unknown identifier should check it
    /// with [`ContentEncoding::parse`] first.
    pub fn decode_reader<'a, R>(&self, body: R, identifier: &str) -> Result<DecodedStream<'a>>
    where
        R: Read + Send + 'a,
    {
        let encoding = match ContentEncoding::parse(identifier) {
            Ok(encoding) => encoding,
            Err(e) => {
                tracing::warn!(encoding = %identifier, "Unsupported content encoding");
                return Err(e);
            }
        };

        let Some(encoding) = encoding else {
            tracing::debug!(encoding = %identifier, "Passing body through undecoded");
            return Ok(DecodedStream::new(None, Box::new(body)));
        };

        let reader = self
            .decoder_for(encoding)
            .decoder(Box::new(body))
            .map_err(|source| DecodeError::CodecInit { encoding, source })?;
        tracing::debug!(encoding = %encoding, "Selected content decoder");
        Ok(DecodedStream::new(Some(encoding), reader))
    }
}
