//! Domain model for the site context.

mod error;
mod ids;
mod section;
mod site;

pub use error::{ParseSectionStatusError, SiteDomainError};
pub use ids::{SectionId, SiteId};
pub use section::{LastTaskSummary, Section, SectionStatus};
pub use site::{PersistedSiteData, Site};
