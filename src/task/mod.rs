//! Task context: the work order aggregate and its lifecycle engine.
//!
//! A task moves `pending -> assigned -> in_progress -> completed`, with a
//! rejection branch and an administrative review state. Every transition is
//! validated by the domain and persisted with a status-guarded update, and
//! the completion transition cascades counter and pointer updates into the
//! account and site contexts.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
