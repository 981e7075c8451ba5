//! Adapter implementations of the account ports.

pub mod memory;
pub mod postgres;
