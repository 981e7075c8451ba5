//! Error types for the site domain.

use super::SectionId;
use thiserror::Error;

/// Validation failures raised by site domain types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteDomainError {
    /// Site or section name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// Site location is empty after trimming.
    #[error("location must not be empty")]
    EmptyLocation,

    /// Site type is empty after trimming.
    #[error("site type must not be empty")]
    EmptySiteType,

    /// The referenced section does not belong to the site.
    #[error("section not found on site: {section_id}")]
    UnknownSection {
        /// The section that was not found.
        section_id: SectionId,
    },
}

/// Error raised when parsing a [`super::SectionStatus`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid section status: {0}")]
pub struct ParseSectionStatusError(pub String);
