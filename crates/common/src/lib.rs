//! Foundation utilities shared across Chainboard crates.
//!
//! Currently this is the wall-clock abstraction: every component that
//! compares timestamps (window resolution, cache expiry) takes a [`Clock`]
//! instead of calling `Utc::now()` directly, so tests can move time without
//! sleeping.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod time;

pub use time::{Clock, MockClock, SystemClock};
