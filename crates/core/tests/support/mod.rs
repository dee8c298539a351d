//! Shared test helpers for `chainboard-core` integration tests.
//!
//! Provides the in-memory sample source and clock fixtures so the tests can
//! focus on service behaviour instead of boilerplate.

pub mod sources;
