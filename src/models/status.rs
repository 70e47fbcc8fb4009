use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status shared by crawl, search and sitemap jobs.
///
/// The service has spelled the canceled state both `canceled` and
/// `cancelled`; both deserialize to [`JobStatus::Canceled`], which
/// serializes as `canceled`. Unrecognized values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    #[default]
    New,
    Running,
    Canceling,
    Canceled,
    Failed,
    Finished,
    Unknown(String),
}

impl JobStatus {
    /// Wire spelling.
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::New => "new",
            JobStatus::Running => "running",
            JobStatus::Canceling => "canceling",
            JobStatus::Canceled => "canceled",
            JobStatus::Failed => "failed",
            JobStatus::Finished => "finished",
            JobStatus::Unknown(raw) => raw,
        }
    }

    /// No further events are expected once a job reaches this status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Canceled | JobStatus::Failed | JobStatus::Finished
        )
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "new" => JobStatus::New,
            "running" => JobStatus::Running,
            "canceling" | "cancelling" => JobStatus::Canceling,
            "canceled" | "cancelled" => JobStatus::Canceled,
            "failed" => JobStatus::Failed,
            "finished" => JobStatus::Finished,
            _ => JobStatus::Unknown(raw),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A server-side job observed through snapshots.
pub trait JobResource {
    fn uuid(&self) -> &str;
    fn status(&self) -> &JobStatus;
}
