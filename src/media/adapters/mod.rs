//! Adapter implementations for media ports.

pub mod memory;
