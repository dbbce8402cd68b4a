//! Decoding and draining of response bodies.
//!
//! [`ResponseDecoder`] picks the codec from a response's `Content-Encoding`
//! and offers three ways to consume the decoded body: collect it into memory,
//! copy it into a writer, or copy it into a freshly created file. Each helper
//! owns the decoded stream for its whole duration, so the body is released on
//! every return path.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use super::source::EncodedResponse;
use crate::config::Config;
use crate::error::{DecodeError, Result};
use crate::infra::CodecRegistry;
use crate::stream::DecodedStream;

/// Decodes content-encoded responses.
pub struct ResponseDecoder {
    registry: CodecRegistry,
    copy_buffer_size: usize,
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseDecoder {
    /// Creates a decoder with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            registry: CodecRegistry::new(config),
            copy_buffer_size: config.copy_buffer_size.max(1),
        }
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Returns the response body wrapped in the decoder its `Content-Encoding` names.
    ///
    /// Errors from the registry are returned unchanged.
    pub fn decode<'a, R>(&self, response: R) -> Result<DecodedStream<'a>>
    where
        R: EncodedResponse,
        R::Body: 'a,
    {
        let encoding = response.content_encoding().into_owned();
        self.registry.decode_reader(response.into_raw_body(), &encoding)
    }

    /// Reads the whole decoded body into memory.
    ///
    /// Nothing is returned on failure, even if some bytes were decoded.
    pub fn read_all<R>(&self, response: R) -> Result<Vec<u8>>
    where
        R: EncodedResponse,
    {
        let mut stream = self.decode(response)?;
        let mut decoded = Vec::new();
        stream.read_to_end(&mut decoded).map_err(DecodeError::Read)?;
        Ok(decoded)
    }

    /// Copies the decoded body into `sink` and returns the number of bytes written.
    ///
    /// Memory use is bounded by the configured copy buffer. Copying stops at
    /// the first read or write error.
    pub fn read_into<R, W>(&self, response: R, mut sink: W) -> Result<u64>
    where
        R: EncodedResponse,
        W: Write,
    {
        let mut stream = self.decode(response)?;
        copy_buffered(&mut stream, &mut sink, self.copy_buffer_size)
    }

    /// Creates (or truncates) the file at `path` with permission bits `mode`
    /// and copies the decoded body into it.
    ///
    /// The file is opened before the response is looked at, so a bad path
    /// fails without decoding anything. `mode` only applies on Unix, and only
    /// when the file is newly created.
    pub fn read_into_file<R, P>(&self, response: R, path: P, mode: u32) -> Result<u64>
    where
        R: EncodedResponse,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let mut file = create_truncated(path, mode).map_err(|source| DecodeError::CreateFile {
            path: path.to_path_buf(),
            source,
        })?;

        match self.read_into(response, &mut file) {
            Ok(written) => {
                tracing::debug!(path = %path.display(), bytes = written, "Wrote decoded body");
                Ok(written)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to write decoded body");
                Err(e)
            }
        }
    }
}

fn create_truncated(path: &Path, mode: u32) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    options.open(path)
}

fn copy_buffered<R, W>(reader: &mut R, writer: &mut W, buffer_size: usize) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = vec![0u8; buffer_size];
    let mut copied = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(DecodeError::Read(e)),
        };
        writer.write_all(&buf[..n]).map_err(DecodeError::Write)?;
        copied += n as u64;
    }
    writer.flush().map_err(DecodeError::Write)?;
    Ok(copied)
}

/// Extension trait for [`EncodedResponse`] that provides convenience methods
/// backed by a default [`ResponseDecoder`].
pub trait DecodeResponseExt: EncodedResponse + Sized {
    fn decoded<'a>(self) -> Result<DecodedStream<'a>>
    where
        Self::Body: 'a,
    {
        ResponseDecoder::new().decode(self)
    }

    fn read_all_decoded(self) -> Result<Vec<u8>> {
        ResponseDecoder::new().read_all(self)
    }

    fn read_decoded_into<W: Write>(self, sink: W) -> Result<u64> {
        ResponseDecoder::new().read_into(self, sink)
    }

    fn read_decoded_into_file<P: AsRef<Path>>(self, path: P, mode: u32) -> Result<u64> {
        ResponseDecoder::new().read_into_file(self, path, mode)
    }
}

// Implement DecodeResponseExt for all types that implement EncodedResponse
impl<T: EncodedResponse> DecodeResponseExt for T {}
