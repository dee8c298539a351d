//! HTTP clients for upstream services

pub mod chain_index;

pub use chain_index::ChainIndexClient;
