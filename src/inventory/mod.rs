//! Inventory context: per-branch stock ledger with atomic deduction.
//!
//! Stock quantities are the one hot-contended shared resource in the system;
//! every mutation goes through conditional, store-side arithmetic so that
//! concurrent deductions can never drive stock negative.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
