//! Adapter implementations for site ports.

pub mod memory;
pub mod postgres;
