//! Adapter implementations for the task context ports.

pub mod memory;
pub mod postgres;
