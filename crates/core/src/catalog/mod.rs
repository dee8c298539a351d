//! Network-upgrade catalog: stores and the read service over them.

pub mod ports;
pub mod service;

pub use service::CatalogService;
