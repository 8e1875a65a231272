//! countyhealth - county public-health measure lookup API.
//!
//! Library target so integration tests can build the router directly.
//! The binaries (`countyhealth`, `loader`) are thin wrappers over these
//! modules.

pub mod config;
pub mod error;
pub mod ingest;
pub mod measures;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;
pub mod validate;
