//! Pull-based JSON event stream over a byte stream.
//!
//! [`JsonEventStream`] reads the next chunk only once every frame decoded
//! from the previous chunk has been handed out, so a slow consumer throttles
//! the socket read. Dropping it (or calling [`JsonEventStream::close`])
//! drops the body stream and with it the connection.

use futures_util::StreamExt;
use serde_json::Value;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;

use super::frame::{Frame, FrameDecoder};
use crate::error::StreamError;
use crate::traits::ByteStream;

/// Lazy, single-pass sequence of JSON values read from `data:` frames.
///
/// Yields `Ok(value)` per frame, `Err(StreamError::ConnectionLost)` once if
/// the body read fails, and `None` when the server closes the stream or
/// sends `[DONE]`. After `None` or an error the stream stays finished.
pub struct JsonEventStream {
    source: Option<ByteStream>,
    decoder: FrameDecoder,
    pending: VecDeque<Frame>,
    malformed_frames: usize,
    finished: bool,
}

impl JsonEventStream {
    pub fn new(source: ByteStream) -> Self {
        Self {
            source: Some(source),
            decoder: FrameDecoder::new(),
            pending: VecDeque::new(),
            malformed_frames: 0,
            finished: false,
        }
    }

    /// Pull the next value.
    pub async fn next_value(&mut self) -> Option<Result<Value, StreamError>> {
        self.next().await
    }

    /// Close the connection now. Frames not yet handed out are discarded.
    pub fn close(&mut self) {
        self.source = None;
        self.pending.clear();
        self.finished = true;
    }

    /// Whether the stream has ended, cleanly or not.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of `data:` lines dropped because they were not valid JSON.
    pub fn malformed_frames(&self) -> usize {
        self.malformed_frames
    }

    /// Pop the next deliverable value from already decoded frames.
    fn drain_pending(&mut self) -> Option<Value> {
        while let Some(frame) = self.pending.pop_front() {
            match frame {
                Frame::Value(value) => return Some(value),
                Frame::Done => {
                    tracing::debug!("Event stream received [DONE]");
                    self.close();
                    return None;
                }
                Frame::Malformed(err) => {
                    self.malformed_frames += 1;
                    tracing::warn!("Skipping event frame: {}", err);
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for JsonEventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonEventStream")
            .field("open", &self.source.is_some())
            .field("pending", &self.pending.len())
            .field("buffered", &self.decoder.buffered_len())
            .field("malformed_frames", &self.malformed_frames)
            .field("finished", &self.finished)
            .finish()
    }
}

impl Stream for JsonEventStream {
    type Item = Result<Value, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.finished {
                return Poll::Ready(None);
            }

            if let Some(value) = this.drain_pending() {
                return Poll::Ready(Some(Ok(value)));
            }
            if this.finished {
                return Poll::Ready(None);
            }

            let Some(source) = this.source.as_mut() else {
                this.finished = true;
                return Poll::Ready(None);
            };

            match source.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(chunk))) => {
                    this.pending.extend(this.decoder.feed(&chunk));
                }
                Poll::Ready(Some(Err(e))) => {
                    tracing::warn!("Event stream read failed: {}", e);
                    this.close();
                    return Poll::Ready(Some(Err(StreamError::ConnectionLost {
                        message: e.to_string(),
                    })));
                }
                Poll::Ready(None) => {
                    this.source = None;
                    this.pending.extend(this.decoder.finish());
                }
            }
        }
    }
}
