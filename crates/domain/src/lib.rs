//! # Chainboard Domain
//!
//! Business domain types and models for Chainboard.
//!
//! This crate contains:
//! - Metrics types (range tokens, windows, samples, series)
//! - Catalog types (network upgrades, FIPs)
//! - Error types and Result definitions
//! - Configuration structures and domain constants
//!
//! ## Architecture
//! - No dependencies on other Chainboard crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
