//! Services for the task context.

pub mod feedback;
pub mod lifecycle;
pub mod retention;

pub use feedback::{FeedbackError, FeedbackResult, FeedbackService, SubmitFeedbackRequest};
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
pub use retention::{RetentionConfig, RetentionError, RetentionResult, RetentionService};
