//! Property-based tests for field processing.
