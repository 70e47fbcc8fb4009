//! Line framing for the job status stream.
//!
//! The service writes one `data: <json>` line per event. [`FrameDecoder`]
//! accumulates raw bytes, cuts them at `\n`, and turns every complete line
//! into a [`Frame`]. Lines are cut at the byte level, so a multi-byte
//! character split across two chunks is only decoded once both halves have
//! arrived.

use serde_json::Value;

use crate::error::StreamError;

/// Prefix carrying a frame payload.
pub const DATA_PREFIX: &str = "data:";

/// Payload marking a graceful end of the stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One decoded `data:` line.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// A payload that parsed as JSON
    Value(Value),
    /// The `[DONE]` sentinel
    Done,
    /// A payload that did not parse; dropped by the stream
    Malformed(StreamError),
}

/// Classify a single line. Returns `None` for lines that carry no frame
/// (blank lines, comments, `event:` or `id:` fields).
pub fn parse_frame_line(line: &str) -> Option<Frame> {
    let payload = line.trim().strip_prefix(DATA_PREFIX)?.trim();

    if payload == DONE_SENTINEL {
        return Some(Frame::Done);
    }

    Some(match serde_json::from_str(payload) {
        Ok(value) => Frame::Value(value),
        Err(e) => Frame::Malformed(StreamError::malformed_frame(payload, e.to_string())),
    })
}

/// Incremental newline framer over raw bytes.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
    /// Bytes of `buffer` already known to contain no newline.
    scanned: usize,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return the frames of every line it completed,
    /// in arrival order. The trailing partial line stays buffered.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Frame> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        let mut start = 0;
        let mut cursor = self.scanned;
        while let Some(offset) = self.buffer[cursor..].iter().position(|&b| b == b'\n') {
            let end = cursor + offset;
            if let Some(frame) = Self::decode_line(&self.buffer[start..end]) {
                frames.push(frame);
            }
            start = end + 1;
            cursor = start;
        }

        self.buffer.drain(..start);
        self.scanned = self.buffer.len();
        frames
    }

    /// Flush the buffered partial line once the source has ended.
    pub fn finish(&mut self) -> Option<Frame> {
        let rest = std::mem::take(&mut self.buffer);
        self.scanned = 0;
        Self::decode_line(&rest)
    }

    /// Bytes waiting for a newline.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    fn decode_line(bytes: &[u8]) -> Option<Frame> {
        if bytes.is_empty() {
            return None;
        }
        parse_frame_line(&String::from_utf8_lossy(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(frames: Vec<Frame>) -> Vec<Value> {
        frames
            .into_iter()
            .filter_map(|frame| match frame {
                Frame::Value(value) => Some(value),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_frame_line_data() {
        assert_eq!(
            parse_frame_line(r#"data: {"type":"state"}"#),
            Some(Frame::Value(json!({"type": "state"})))
        );
        // Whitespace around the line and the payload is ignored
        assert_eq!(
            parse_frame_line("  data:[1, 2]  \r"),
            Some(Frame::Value(json!([1, 2])))
        );
    }

    #[test]
    fn test_parse_frame_line_ignored() {
        assert_eq!(parse_frame_line(""), None);
        assert_eq!(parse_frame_line("   "), None);
        assert_eq!(parse_frame_line(": keep-alive"), None);
        assert_eq!(parse_frame_line("event: state"), None);
        assert_eq!(parse_frame_line(r#"{"type":"state"}"#), None);
    }

    #[test]
    fn test_parse_frame_line_done() {
        assert_eq!(parse_frame_line("data: [DONE]"), Some(Frame::Done));
    }

    #[test]
    fn test_parse_frame_line_malformed() {
        match parse_frame_line("data: not-json") {
            Some(Frame::Malformed(StreamError::MalformedFrame { payload, .. })) => {
                assert_eq!(payload, "not-json");
            }
            other => panic!("Expected malformed frame, got {:?}", other),
        }
    }

    #[test]
    fn test_feed_keeps_partial_line() {
        let mut decoder = FrameDecoder::new();

        let frames = decoder.feed(b"data: {\"a\":");
        assert!(frames.is_empty());
        assert_eq!(decoder.buffered_len(), 11);

        let frames = decoder.feed(b"1}\ndata: {\"b\"");
        assert_eq!(values(frames), vec![json!({"a": 1})]);

        let frames = decoder.feed(b":2}\n");
        assert_eq!(values(frames), vec![json!({"b": 2})]);
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_feed_multiple_lines_in_one_chunk() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed(b"data: 1\n\ndata: 2\r\ndata: 3\n");
        assert_eq!(values(frames), vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_feed_split_multibyte_character() {
        let line = "data: {\"title\":\"caf\u{e9} \u{1f980}\"}\n".as_bytes();
        // Split inside the four-byte crab
        let split = line.len() - 5;

        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(&line[..split]).is_empty());
        let frames = decoder.feed(&line[split..]);

        assert_eq!(values(frames), vec![json!({"title": "caf\u{e9} \u{1f980}"})]);
    }

    #[test]
    fn test_finish_flushes_trailing_line() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(b"data: {\"last\":true}").is_empty());

        assert_eq!(decoder.finish(), Some(Frame::Value(json!({"last": true}))));
        assert_eq!(decoder.buffered_len(), 0);
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_finish_discards_noise() {
        let mut decoder = FrameDecoder::new();
        decoder.feed(b"data: 1\nretry: 10");
        assert_eq!(decoder.finish(), None);
    }
}
