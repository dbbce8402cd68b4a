//! Uniform decoded byte stream.
//!
//! Every codec's reader is boxed behind [`DecodedStream`]. The codec reader
//! owns the raw body, so releasing the stream releases codec state and body
//! together, whatever the codec.

use std::fmt;
use std::io::{self, Read};

use crate::infra::ContentEncoding;

/// A boxed readable byte source, as handed to and returned from codecs.
pub type RawSource<'a> = Box<dyn Read + Send + 'a>;

/// Decoded response body.
///
/// Reading yields plain bytes; end of the compressed data is reported as
/// `Ok(0)`. Release happens on [`close`](DecodedStream::close) or on drop,
/// and since both consume the stream it can only happen once.
pub struct DecodedStream<'a> {
    encoding: Option<ContentEncoding>,
    inner: RawSource<'a>,
}

impl<'a> DecodedStream<'a> {
    pub(crate) fn new(encoding: Option<ContentEncoding>, inner: RawSource<'a>) -> Self {
        Self { encoding, inner }
    }

    /// The codec in use, or `None` when the body is passed through.
    pub fn encoding(&self) -> Option<ContentEncoding> {
        self.encoding
    }

    /// Releases the codec state and the underlying body.
    pub fn close(self) {
        drop(self);
    }
}

impl Read for DecodedStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl fmt::Debug for DecodedStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedStream")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Body that records how many times it has been released.
    pub(crate) struct TrackedBody {
        inner: Cursor<Vec<u8>>,
        drops: Arc<AtomicUsize>,
    }

    impl TrackedBody {
        pub(crate) fn new(data: Vec<u8>) -> (Self, Arc<AtomicUsize>) {
            let drops = Arc::new(AtomicUsize::new(0));
            let body = Self {
                inner: Cursor::new(data),
                drops: Arc::clone(&drops),
            };
            (body, drops)
        }
    }

    impl Read for TrackedBody {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Drop for TrackedBody {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_close_releases_body_once() {
        let (body, drops) = TrackedBody::new(b"plain".to_vec());
        let mut stream = DecodedStream::new(None, Box::new(body));

        let mut out = String::new();
        stream.read_to_string(&mut out).unwrap();
        assert_eq!(out, "plain");
        assert_eq!(drops.load(Ordering::SeqCst), 0);

        stream.close();
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_end_of_stream_is_not_an_error() {
        let mut stream = DecodedStream::new(None, Box::new(&b"ab"[..]));
        let mut buf = [0u8; 8];
        assert_eq!(stream.read(&mut buf).unwrap(), 2);
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_debug_reports_encoding() {
        let stream = DecodedStream::new(Some(ContentEncoding::Lz4), Box::new(io::empty()));
        assert_eq!(format!("{stream:?}"), "DecodedStream { encoding: Some(Lz4), .. }");
    }
}
