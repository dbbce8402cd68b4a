pub mod reader;
pub mod source;

pub use reader::{DecodeResponseExt, ResponseDecoder};
pub use source::EncodedResponse;
