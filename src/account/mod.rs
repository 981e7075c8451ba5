//! People directory for Siteline: administrators, field workers, and clients.
//!
//! Accounts carry the role that decides what a caller may do, plus the
//! completed-task counter maintained by the task lifecycle engine. The
//! authenticated caller enters the core as an explicit [`domain::Principal`]
//! parameter rather than ambient state. The module follows hexagonal
//! architecture:
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
