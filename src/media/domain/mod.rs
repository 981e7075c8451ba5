//! Domain model for hosted media descriptors.

mod error;
mod stored;

pub use error::{MediaDomainError, ParseMediaKindError};
pub use stored::{MediaKind, StorageId, StoredMedia};
