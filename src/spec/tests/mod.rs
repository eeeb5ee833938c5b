//! Unit tests for the spec context.
