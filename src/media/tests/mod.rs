//! Unit tests for the media services.
