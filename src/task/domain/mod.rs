//! Domain model for the task context.

mod error;
mod feedback;
mod gallery;
mod geo;
mod ids;
mod materials;
mod review;
mod status;
mod task;

pub use error::{
    ParseMediaSlotError, ParseReviewVerdictError, ParseTaskStatusError, TaskDomainError,
};
pub use feedback::{Feedback, Rating};
pub use gallery::{Attachment, MediaGallery, MediaSlot, SectionMediaSnapshot};
pub use geo::GeoFix;
pub use ids::{AttachmentId, TaskId};
pub use materials::{Cost, MaterialConfirmation, MaterialLine};
pub use review::{AdminReview, ReviewVerdict};
pub use status::TaskStatus;
pub use task::{NewTaskData, PersistedTaskData, Task};
