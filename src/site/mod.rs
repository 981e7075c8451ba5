//! Site context: physical locations and their sections.
//!
//! A site owns an ordered arena of identity-bearing sections; sections never
//! outlive their site. The lifecycle engine is the only writer of the
//! aggregate counters and the per-section last-task pointers.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
