//! Zone management endpoints (`/api/zones`).

use crate::models::{CreateZoneRequest, UpdateZoneRequest, Zone};
use crate::Result;
use reqwest::Method;
use serde_json::Value;
use trysail_core::client::{decode_value, parse_response};
use trysail_core::{Config, HttpTransport};

const ZONES_PATH: &str = "/api/zones";

/// Client for zone CRUD and zone configuration.
#[derive(Debug, Clone, Copy)]
pub struct ZoneResource<'a> {
    transport: &'a HttpTransport,
    config: &'a Config,
}

impl<'a> ZoneResource<'a> {
    /// Bind a zone client to a transport and configuration.
    #[must_use]
    pub const fn new(transport: &'a HttpTransport, config: &'a Config) -> Self {
        Self { transport, config }
    }

    /// Configuration the client was created with.
    #[must_use]
    pub const fn config(&self) -> &'a Config {
        self.config
    }

    /// List all zones.
    ///
    /// An empty response body yields an empty list.
    pub fn list(&self) -> Result<Vec<Zone>> {
        let (status, body) = self
            .transport
            .request::<()>(Method::GET, ZONES_PATH, "", None)?;

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        decode_value(status, parse_response(status, &body)?)
    }

    /// Fetch a single zone.
    pub fn get(&self, zone_id: &str) -> Result<Zone> {
        let path = format!("{ZONES_PATH}/{zone_id}");
        self.transport.send::<(), _>(Method::GET, &path, "", None)
    }

    /// Create a zone.
    pub fn create(&self, request: &CreateZoneRequest) -> Result<Zone> {
        self.transport
            .send(Method::POST, ZONES_PATH, "", Some(request))
    }

    /// Apply a partial update to a zone.
    pub fn update(&self, zone_id: &str, request: &UpdateZoneRequest) -> Result<Zone> {
        let path = format!("{ZONES_PATH}/{zone_id}");
        self.transport.send(Method::PUT, &path, "", Some(request))
    }

    /// Delete a zone. Returns `true` once the control plane accepted the deletion.
    pub fn delete(&self, zone_id: &str) -> Result<bool> {
        let path = format!("{ZONES_PATH}/{zone_id}");
        self.transport.delete(&path)
    }

    /// Fetch the rendered configuration of a zone.
    pub fn get_configuration(&self, zone_id: &str) -> Result<Value> {
        let path = format!("{ZONES_PATH}/{zone_id}/config");
        self.transport.get(&path)
    }
}
