use std::env;

/// Size of the intermediate buffer used when draining into a sink.
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Internal buffer size handed to the brotli decoder.
pub const DEFAULT_BROTLI_BUFFER_SIZE: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub copy_buffer_size: usize,
    pub brotli_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
            brotli_buffer_size: DEFAULT_BROTLI_BUFFER_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            copy_buffer_size: size_from_env("HTTP_DECOMPRESSOR_COPY_BUFFER")
                .unwrap_or(DEFAULT_COPY_BUFFER_SIZE),
            brotli_buffer_size: size_from_env("HTTP_DECOMPRESSOR_BROTLI_BUFFER")
                .unwrap_or(DEFAULT_BROTLI_BUFFER_SIZE),
        }
    }
}

fn size_from_env(key: &str) -> Option<usize> {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|&n: &usize| n > 0)
}
