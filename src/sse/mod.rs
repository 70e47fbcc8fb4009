//! Decoder for the service's job status streams.
//!
//! The status endpoints answer with a long-lived body of `data: <json>`
//! lines, optionally closed by `data: [DONE]`. No `event:`, `id:` or
//! `retry:` fields are honored.
//!
//! # Module structure
//! - `frame` - byte buffering and line classification (FrameDecoder, Frame)
//! - `stream` - pull-based stream of JSON values (JsonEventStream)

mod frame;
mod stream;

pub use frame::{parse_frame_line, Frame, FrameDecoder, DATA_PREFIX, DONE_SENTINEL};
pub use stream::JsonEventStream;
