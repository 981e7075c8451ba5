//! Ports exposed by the media context.

pub mod host;

pub use host::{MediaHost, MediaHostError, MediaHostResult};
