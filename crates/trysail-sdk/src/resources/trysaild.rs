//! `trysaild` agent endpoints (`/api/trysaild`).
//!
//! Every zone runs a `trysaild` daemon; these calls reach it through the
//! control plane.

use crate::Result;
use serde::Serialize;
use serde_json::Value;
use trysail_core::{Config, HttpTransport, QueryParams};

const TRYSAILD_PATH: &str = "/api/trysaild";

/// Client for the per-zone `trysaild` agent.
#[derive(Debug, Clone, Copy)]
pub struct TrysaildResource<'a> {
    transport: &'a HttpTransport,
    config: &'a Config,
}

impl<'a> TrysaildResource<'a> {
    /// Bind an agent client to a transport and configuration.
    #[must_use]
    pub const fn new(transport: &'a HttpTransport, config: &'a Config) -> Self {
        Self { transport, config }
    }

    /// Configuration the client was created with.
    #[must_use]
    pub const fn config(&self) -> &'a Config {
        self.config
    }

    /// Fetch the agent server status.
    pub fn get_status(&self) -> Result<Value> {
        self.transport.get(&format!("{TRYSAILD_PATH}/status"))
    }

    /// Fetch the agent configuration of a zone.
    pub fn get_configuration(&self, zone_id: &str) -> Result<Value> {
        self.transport
            .get(&format!("{TRYSAILD_PATH}/{zone_id}/config"))
    }

    /// Execute a command on the agent of a zone.
    pub fn execute_command<B>(&self, zone_id: &str, command: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.transport
            .post_json(&format!("{TRYSAILD_PATH}/{zone_id}/execute"), command)
    }

    /// List the peers known to the agent of a zone.
    pub fn get_peers(&self, zone_id: &str) -> Result<Value> {
        self.transport
            .get(&format!("{TRYSAILD_PATH}/{zone_id}/peers"))
    }

    /// Add a peer to the agent of a zone.
    pub fn add_peer<B>(&self, zone_id: &str, peer: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.transport
            .post_json(&format!("{TRYSAILD_PATH}/{zone_id}/peers"), peer)
    }

    /// Remove a peer from the agent of a zone. Returns `true` on success.
    pub fn remove_peer(&self, zone_id: &str, peer_id: &str) -> Result<bool> {
        self.transport
            .delete(&format!("{TRYSAILD_PATH}/{zone_id}/peers/{peer_id}"))
    }

    /// Fetch agent logs. Unset options are left out of the query string.
    pub fn get_logs(&self, zone_id: &str, options: &QueryParams) -> Result<Value> {
        self.transport
            .get_with_query(&format!("{TRYSAILD_PATH}/{zone_id}/logs"), options)
    }

    /// Restart the agent of a zone.
    pub fn restart(&self, zone_id: &str) -> Result<Value> {
        self.transport
            .post(&format!("{TRYSAILD_PATH}/{zone_id}/restart"))
    }
}
