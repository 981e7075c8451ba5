//! Services for the media context.

pub mod attachments;
pub mod cleanup;

pub use attachments::{MediaAttachmentError, MediaAttachmentResult, MediaAttachmentService};
pub use cleanup::{MediaCleanupError, MediaCleanupResult, MediaCleanupService, MediaOwner};
