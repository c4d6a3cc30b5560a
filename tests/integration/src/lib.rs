//! Integration test package; see `tests/`.
