//! Error types for the task domain.

use super::{AttachmentId, TaskStatus};
use crate::inventory::domain::InventoryItemId;
use thiserror::Error;

/// Validation and transition failures raised by task domain types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskDomainError {
    /// The requested status transition is not in the matrix.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        /// Status before the attempted transition.
        from: TaskStatus,
        /// Requested target status.
        to: TaskStatus,
    },

    /// A worker is already assigned.
    #[error("task already has an assigned worker")]
    WorkerAlreadyAssigned,

    /// A task must target at least one section.
    #[error("task must reference at least one section")]
    NoSections,

    /// GPS coordinates were outside valid ranges.
    #[error("coordinates out of range: lat {latitude}, lon {longitude}")]
    InvalidCoordinates {
        /// Offending latitude.
        latitude: f64,
        /// Offending longitude.
        longitude: f64,
    },

    /// A rating must be between 1 and 5.
    #[error("rating must be between 1 and 5, got {rating}")]
    RatingOutOfRange {
        /// The offending rating.
        rating: u8,
    },

    /// A material quantity must be positive.
    #[error("material quantity must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// The offending quantity.
        quantity: f64,
    },

    /// A cost component must not be negative.
    #[error("cost component must not be negative, got {value}")]
    NegativeCost {
        /// The offending value.
        value: f64,
    },

    /// Feedback may only be recorded on completed tasks.
    #[error("feedback requires a completed task, status is {status}")]
    FeedbackRequiresCompletion {
        /// Status at the time of submission.
        status: TaskStatus,
    },

    /// The referenced material line does not exist on the task.
    #[error("no material line for inventory item {item_id}")]
    UnknownMaterial {
        /// The inventory item with no matching line.
        item_id: InventoryItemId,
    },

    /// The referenced attachment does not exist in the slot.
    #[error("attachment not found: {attachment_id}")]
    UnknownAttachment {
        /// The missing attachment.
        attachment_id: AttachmentId,
    },
}

/// Error raised when parsing a [`super::TaskStatus`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error raised when parsing a [`super::MediaSlot`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid media slot: {0}")]
pub struct ParseMediaSlotError(pub String);

/// Error raised when parsing a [`super::ReviewVerdict`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid review verdict: {0}")]
pub struct ParseReviewVerdictError(pub String);
