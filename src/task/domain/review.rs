//! Administrative review sub-record.

use super::ParseReviewVerdictError;
use crate::account::domain::AccountId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of an administrative review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    /// The work passed review.
    Approved,
    /// The work failed review.
    Rejected,
}

impl ReviewVerdict {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReviewVerdict {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ReviewVerdict {
    type Error = ParseReviewVerdictError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseReviewVerdictError(value.to_owned())),
        }
    }
}

/// Review recorded when an admin parks a task in the review state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminReview {
    verdict: ReviewVerdict,
    comments: Option<String>,
    reviewer: AccountId,
    reviewed_at: DateTime<Utc>,
}

impl AdminReview {
    /// Creates a review record stamped with the current time.
    #[must_use]
    pub fn new(verdict: ReviewVerdict, reviewer: AccountId, clock: &impl Clock) -> Self {
        Self {
            verdict,
            comments: None,
            reviewer,
            reviewed_at: clock.utc(),
        }
    }

    /// Sets the reviewer's comments.
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Returns the verdict.
    #[must_use]
    pub const fn verdict(&self) -> ReviewVerdict {
        self.verdict
    }

    /// Returns the comments, if any.
    #[must_use]
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    /// Returns who reviewed the work.
    #[must_use]
    pub const fn reviewer(&self) -> AccountId {
        self.reviewer
    }

    /// Returns when the review happened.
    #[must_use]
    pub const fn reviewed_at(&self) -> DateTime<Utc> {
        self.reviewed_at
    }
}
