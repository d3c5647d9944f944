//! Control-plane endpoints (`/api/controlplane`).

use crate::Result;
use serde::Serialize;
use serde_json::Value;
use trysail_core::{Config, HttpTransport};

/// Client for control-plane status, synchronisation and metrics.
#[derive(Debug, Clone, Copy)]
pub struct ControlPlaneResource<'a> {
    transport: &'a HttpTransport,
    config: &'a Config,
}

impl<'a> ControlPlaneResource<'a> {
    /// Bind a control-plane client to a transport and configuration.
    #[must_use]
    pub const fn new(transport: &'a HttpTransport, config: &'a Config) -> Self {
        Self { transport, config }
    }

    /// Configuration the client was created with.
    #[must_use]
    pub const fn config(&self) -> &'a Config {
        self.config
    }

    /// Fetch the control-plane status.
    pub fn get_status(&self) -> Result<Value> {
        self.transport.get("/api/controlplane/status")
    }

    /// Ask the control plane to synchronise zones from the license server.
    pub fn sync_zones(&self) -> Result<Value> {
        self.transport.post("/api/controlplane/sync")
    }

    /// List the zones registered with the control plane.
    pub fn get_registered_zones(&self) -> Result<Value> {
        self.transport.get("/api/controlplane/zones")
    }

    /// Register a zone with the control plane.
    ///
    /// `zone` is sent as-is; a [`Zone`](crate::Zone), a
    /// [`CreateZoneRequest`](crate::CreateZoneRequest) or a JSON value all work.
    pub fn register_zone<B>(&self, zone: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.transport
            .post_json("/api/controlplane/zones/register", zone)
    }

    /// Fetch control-plane metrics.
    pub fn get_metrics(&self) -> Result<Value> {
        self.transport.get("/api/controlplane/metrics")
    }
}
