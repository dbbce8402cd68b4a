use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::infra::ContentEncoding;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// The step of a decode operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The encoding identifier was not recognized.
    Lookup,
    /// A recognized codec rejected the start of the body.
    Init,
    /// Decoding (or reading the raw body) failed mid-stream.
    Read,
    /// The output file or sink could not be written.
    Write,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unsupported content encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Failed to initialize {encoding} decoder: {source}")]
    CodecInit {
        encoding: ContentEncoding,
        #[source]
        source: io::Error,
    },

    #[error("Decoding failed: {0}")]
    Read(#[source] io::Error),

    #[error("Writing decoded output failed: {0}")]
    Write(#[source] io::Error),

    #[error("Failed to create {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DecodeError {
    pub fn stage(&self) -> Stage {
        match self {
            DecodeError::UnsupportedEncoding(_) => Stage::Lookup,
            DecodeError::CodecInit { .. } => Stage::Init,
            DecodeError::Read(_) => Stage::Read,
            DecodeError::Write(_) | DecodeError::CreateFile { .. } => Stage::Write,
        }
    }

    /// The underlying I/O error, if this failure came from a codec or the filesystem.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            DecodeError::UnsupportedEncoding(_) => None,
            DecodeError::CodecInit { source, .. } | DecodeError::CreateFile { source, .. } => {
                Some(source)
            }
            DecodeError::Read(e) | DecodeError::Write(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_carries_identifier() {
        let err = DecodeError::UnsupportedEncoding("bogus".to_string());
        assert_eq!(err.to_string(), "Unsupported content encoding: bogus");
        assert_eq!(err.stage(), Stage::Lookup);
        assert!(err.io_error().is_none());
    }

    #[test]
    fn test_stages() {
        let init = DecodeError::CodecInit {
            encoding: ContentEncoding::Gzip,
            source: io::Error::new(io::ErrorKind::InvalidData, "bad magic"),
        };
        assert_eq!(init.stage(), Stage::Init);
        assert_eq!(init.to_string(), "Failed to initialize gzip decoder: bad magic");

        let read = DecodeError::Read(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        assert_eq!(read.stage(), Stage::Read);

        let create = DecodeError::CreateFile {
            path: PathBuf::from("/nope/out.bin"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(create.stage(), Stage::Write);
        assert_eq!(create.io_error().map(|e| e.kind()), Some(io::ErrorKind::NotFound));
    }
}
