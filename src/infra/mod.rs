//! Infrastructure layer wrapping the external codec crates.
//!
//! This module contains:
//! - The content-encoding identifiers and the advertised `Accept-Encoding` value
//! - One `Decompressor` per codec and the registry that dispatches between them
//!
//! Adding a codec means a new `ContentEncoding` variant, its token in
//! `ACCEPT_ENCODING`, and a registry entry.

pub mod decompressor;
pub mod encoding;

pub use decompressor::{
    BrotliDecompressor, CodecRegistry, Decompressor, DeflateDecompressor, GzipDecompressor,
    Lz4Decompressor, SnappyDecompressor, ZlibDecompressor, ZstdDecompressor,
};
pub use encoding::{ContentEncoding, ACCEPT_ENCODING};
