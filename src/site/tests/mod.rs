//! Unit tests for the site context.
