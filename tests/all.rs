//! Integration tests for the playground binary crate.
//!
//! Scenarios live under `suite/`; mock-server fixtures under `common/`.

mod common;
mod suite;
