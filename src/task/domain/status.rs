//! Task lifecycle states and the transition matrix.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, no worker assigned.
    Pending,
    /// Worker assigned, work not yet started.
    Assigned,
    /// Worker checked in and is working.
    InProgress,
    /// Work finished.
    Completed,
    /// Parked for administrative review.
    Review,
    /// Abandoned; no further work expected.
    Rejected,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Review => "review",
            Self::Rejected => "rejected",
        }
    }

    /// Returns whether the state permits a transition to `target`.
    ///
    /// The main line is `pending -> assigned -> in_progress -> completed`.
    /// Any state except `rejected` may move to `rejected`, and any state
    /// except `review` may be parked in `review`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        match (self, target) {
            (Self::Pending, Self::Assigned)
            | (Self::Assigned, Self::InProgress)
            | (Self::InProgress, Self::Completed) => true,
            (from, Self::Rejected) => !matches!(from, Self::Rejected),
            (from, Self::Review) => !matches!(from, Self::Review),
            _ => false,
        }
    }

    /// Returns whether the state is terminal for retention purposes.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "review" => Ok(Self::Review),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
