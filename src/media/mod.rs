//! Stored media values, the external hosting boundary, and attachment
//! management.
//!
//! Siteline never stores media bytes. Uploads happen outside the core; what
//! enters is the descriptor the hosting provider returned. This module owns
//! that descriptor type, the deletion contract against the provider, and
//! the services that manage before/after attachments and cross-entity media
//! removal. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
