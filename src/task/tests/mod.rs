//! Unit tests for task domain, validation and services.
