//! Embedded upgrade and FIP catalog

pub mod store;

pub use store::EmbeddedContentStore;
