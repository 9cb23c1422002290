//! End-to-end tests for Pickwise live under `tests/`.
