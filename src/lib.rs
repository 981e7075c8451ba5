//! Siteline: field-service work order coordination core.
//!
//! This crate provides the lifecycle engine for field-service tasks carried
//! out against hierarchical physical locations, keeping the surrounding
//! records (inventory stock, site and section registries, account counters)
//! consistent as each task moves through its states.
//!
//! # Architecture
//!
//! Siteline follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, fakes)
//! - **Services**: Orchestration across domain aggregates and ports
//!
//! # Modules
//!
//! - [`account`]: People directory (admins, workers, clients) and caller identity
//! - [`inventory`]: Per-branch stock ledger with conditional deduction
//! - [`site`]: Site/section registry and dashboard counters
//! - [`media`]: Stored media values, hosting port, and attachment management
//! - [`task`]: Work order aggregate, lifecycle engine, feedback, retention

pub mod account;
pub mod inventory;
pub mod media;
pub mod site;
pub mod task;
