//! Typed client for the Trysail control plane.
//!
//! [`TrysailClient`] composes a [`Config`] with a shared blocking HTTP
//! transport and hands out one resource client per area of the API:
//!
//! - [`TrysailClient::zones`] - zone CRUD and zone configuration
//! - [`TrysailClient::control_plane`] - control-plane status, sync and metrics
//! - [`TrysailClient::trysaild`] - the per-zone `trysaild` agent
//!
//! ```no_run
//! use trysail_sdk::{Config, TrysailClient};
//!
//! # fn main() -> trysail_sdk::Result<()> {
//! let client = TrysailClient::new(Config::new("http://localhost:8081").with_timeout(10))?;
//! for zone in client.zones().list()? {
//!     println!("{} ({}): {}", zone.name, zone.id, zone.status);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod resources;

pub use client::TrysailClient;
pub use models::{
    CreateZoneRequest, UpdateZoneRequest, Zone, ZONE_STATUS_ACTIVE, ZONE_STATUS_INACTIVE,
};
pub use resources::{ControlPlaneResource, TrysaildResource, ZoneResource};
pub use trysail_core::{build_query_string, Config, Error, ErrorKind, QueryParams};

/// Convenient result alias that reuses the shared Trysail error type.
pub type Result<T> = trysail_core::Result<T>;
