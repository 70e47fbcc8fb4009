//! Error category classification for unified error handling.
//!
//! Categories give callers a coarse handle on an error without matching
//! every variant: whether it is worth retrying, whether the credential is
//! at fault, or whether the caller passed something the service rejected.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout or a stream cut off mid-read.
    /// Generally transient.
    Network,

    /// The API key was rejected (HTTP 401/403).
    Auth,

    /// Service-side failure (HTTP 5xx).
    /// Generally transient.
    Server,

    /// The client received something it could not make sense of
    /// (undecodable body, unexpected payload shape).
    Client,

    /// The request itself was wrong (HTTP 4xx, failed local precondition,
    /// job produced nothing to return).
    User,

    /// Missing or invalid client configuration.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    ///
    /// The library never retries on its own; this is advisory for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns a human-readable description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Auth => "Authentication problem",
            ErrorCategory::Server => "Server-side issue",
            ErrorCategory::Client => "Unexpected response from the service",
            ErrorCategory::User => "Request rejected",
            ErrorCategory::Configuration => "Configuration problem",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Auth => "Check that WATERCRAWL_API_KEY holds a valid API key",
            ErrorCategory::Server => {
                "The service may be experiencing issues. Please try again later"
            }
            ErrorCategory::Client => {
                "The service returned data this client does not understand. Upgrading may help"
            }
            ErrorCategory::User => "Check the request parameters and try again",
            ErrorCategory::Configuration => "Check your client configuration",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
