//! Unit tests for the task module.
//!
//! Tests are organised by layer: domain behaviour (status boundaries and
//! `completed_at` stamping), row-model mappings, and service orchestration
//! over the in-memory adapters, including the counter coupling with the
//! project context.

mod models_tests;
