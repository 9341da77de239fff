//! Property-based tests for text normalization and list parsing.
