//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP client operations (buffered requests, streaming GET)

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Method, Response};
