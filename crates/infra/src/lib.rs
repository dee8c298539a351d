//! # Chainboard Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The chain-index HTTP client (`SampleSource` implementation)
//! - The embedded upgrade/FIP content store
//! - Configuration loading (file + environment)
//!
//! ## Architecture
//! - Implements traits defined in `chainboard-core`
//! - Depends on `chainboard-domain` and `chainboard-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod config;
pub mod content;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use content::EmbeddedContentStore;
pub use errors::InfraError;
pub use http::ChainIndexClient;
