//! Typed monitors over job status streams.
//!
//! A [`Monitor`] owns one open status connection for one job and maps each
//! decoded frame to a [`MonitorEvent`]. Nothing is buffered or replayed:
//! every monitor starts from the server's current state. Dropping the
//! monitor closes the connection.

use futures::Stream;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::{ErrorContext, WatercrawlError, WatercrawlResult};
use crate::models::{JobResource, MonitorEvent};
use crate::sse::JsonEventStream;

/// What a synchronous wait ended on.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<S, R> {
    /// The first result item
    Result(R),
    /// A terminal snapshot reached before any result
    Terminal(S),
}

impl<S, R> Outcome<S, R> {
    pub fn into_result(self) -> Option<R> {
        match self {
            Outcome::Result(result) => Some(result),
            Outcome::Terminal(_) => None,
        }
    }
}

/// Event cursor for one job.
pub struct Monitor<S, R> {
    resource_id: String,
    events: JsonEventStream,
    invalid_events: usize,
    _marker: PhantomData<fn() -> (S, R)>,
}

impl<S, R> Monitor<S, R>
where
    S: DeserializeOwned + JobResource,
    R: DeserializeOwned,
{
    pub fn new(resource_id: impl Into<String>, events: JsonEventStream) -> Self {
        let resource_id = resource_id.into();
        tracing::debug!(resource_id = %resource_id, "Monitor opened");
        Self {
            resource_id,
            events,
            invalid_events: 0,
            _marker: PhantomData,
        }
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Pull the next event. `None` means the server ended the stream.
    pub async fn next_event(&mut self) -> Option<WatercrawlResult<MonitorEvent<S, R>>> {
        self.next().await
    }

    /// Close the connection now.
    pub fn close(&mut self) {
        if !self.events.is_finished() {
            tracing::debug!(resource_id = %self.resource_id, "Monitor closed");
        }
        self.events.close();
    }

    /// Frames dropped so far: invalid JSON plus envelopes that did not fit
    /// their event type.
    pub fn skipped_frames(&self) -> usize {
        self.events.malformed_frames() + self.invalid_events
    }

    /// Consume events until the first result or a terminal snapshot, then
    /// close the connection.
    pub async fn wait_for_outcome(mut self) -> WatercrawlResult<Outcome<S, R>> {
        while let Some(event) = self.next_event().await {
            match event? {
                MonitorEvent::Result(result) => {
                    self.close();
                    return Ok(Outcome::Result(result));
                }
                MonitorEvent::State(state) if state.status().is_terminal() => {
                    tracing::debug!(
                        resource_id = %self.resource_id,
                        status = %state.status(),
                        "Job reached terminal state"
                    );
                    self.close();
                    return Ok(Outcome::Terminal(state));
                }
                _ => {}
            }
        }
        Err(self.no_result())
    }

    /// Consume events until a terminal snapshot, ignoring results.
    pub async fn wait_for_terminal(mut self) -> WatercrawlResult<S> {
        while let Some(event) = self.next_event().await {
            if let MonitorEvent::State(state) = event? {
                if state.status().is_terminal() {
                    tracing::debug!(
                        resource_id = %self.resource_id,
                        status = %state.status(),
                        "Job reached terminal state"
                    );
                    self.close();
                    return Ok(state);
                }
            }
        }
        Err(self.no_result())
    }

    fn no_result(&self) -> WatercrawlError {
        WatercrawlError::NoResult {
            resource_id: self.resource_id.clone(),
        }
        .with_context(ErrorContext::new("monitor").with_resource_id(&self.resource_id))
    }
}

impl<S, R> Stream for Monitor<S, R>
where
    S: DeserializeOwned + JobResource,
    R: DeserializeOwned,
{
    type Item = WatercrawlResult<MonitorEvent<S, R>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            match this.events.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Ready(Some(Err(e))) => {
                    let err = WatercrawlError::from(e).with_context(
                        ErrorContext::new("monitor").with_resource_id(&this.resource_id),
                    );
                    return Poll::Ready(Some(Err(err)));
                }
                Poll::Ready(Some(Ok(value))) => match MonitorEvent::from_value(value) {
                    Ok(event) => return Poll::Ready(Some(Ok(event))),
                    Err(e) => {
                        this.invalid_events += 1;
                        tracing::warn!(resource_id = %this.resource_id, "Skipping event: {}", e);
                    }
                },
            }
        }
    }
}

impl<S, R> std::fmt::Debug for Monitor<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("resource_id", &self.resource_id)
            .field("events", &self.events)
            .finish()
    }
}
