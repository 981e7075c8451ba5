//! Unit tests for the account context.
