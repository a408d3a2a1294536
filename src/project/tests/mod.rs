//! Unit tests for the project module.
//!
//! Tests are organised by layer: domain invariants (counters in
//! particular), row-model mappings, and service orchestration over the
//! in-memory adapter.

mod domain_tests;
