//! Step definitions and shared world for work order lifecycle scenarios.

pub mod world;

mod given;
mod then;
mod when;
