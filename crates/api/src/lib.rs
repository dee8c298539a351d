//! # Chainboard Application
//!
//! HTTP gateway for the network-upgrade dashboard: wires the metrics and
//! catalog services to their infrastructure implementations and exposes them
//! as a JSON API.
//!
//! ## Endpoints
//! - `GET /api/miner-count?range=` - Aggregated daily miner counts
//! - `GET /api/upgrades?q=&status=` - Upgrade catalog listing
//! - `GET /api/upgrades/{id}` - Upgrade detail with resolved FIPs
//! - `GET /api/fips/{id}` - Single FIP record
//! - `GET /health` - Liveness probe
//!
//! ## Architecture
//! - [`AppContext`] owns the wired services; routes borrow it through axum
//!   state and never construct their own dependencies
//! - All responses are JSON, errors included

pub mod context;
pub mod routes;

pub use context::AppContext;
pub use routes::build_router;
