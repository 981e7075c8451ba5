//! Unit tests for the inventory context.
