//! Services for the site context.

pub mod registry;

pub use registry::{
    AddSectionRequest, CreateSiteRequest, SiteRegistryError, SiteRegistryResult,
    SiteRegistryService,
};
