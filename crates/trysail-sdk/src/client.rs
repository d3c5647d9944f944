//! Top-level Trysail client.

use crate::resources::{ControlPlaneResource, TrysaildResource, ZoneResource};
use crate::Result;
use tracing::debug;
use trysail_core::{Config, HttpTransport};

/// Blocking client for the Trysail control plane.
///
/// The HTTP transport is built once, when the client is created, and shared
/// by every resource client handed out afterwards.
#[derive(Debug, Clone)]
pub struct TrysailClient {
    config: Config,
    transport: HttpTransport,
}

impl TrysailClient {
    /// Construct a client from a configuration.
    ///
    /// Uses the configuration's pre-built HTTP client when present; otherwise
    /// builds one from its base URL, timeout, TLS flag and headers.
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::from_config(&config)?;
        debug!(base_url = config.base_url(), "Created Trysail client");
        Ok(Self { config, transport })
    }

    /// Construct a client from `TRYSAIL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Zone management endpoints.
    #[must_use]
    pub const fn zones(&self) -> ZoneResource<'_> {
        ZoneResource::new(&self.transport, &self.config)
    }

    /// Control-plane endpoints.
    #[must_use]
    pub const fn control_plane(&self) -> ControlPlaneResource<'_> {
        ControlPlaneResource::new(&self.transport, &self.config)
    }

    /// `trysaild` agent endpoints.
    #[must_use]
    pub const fn trysaild(&self) -> TrysaildResource<'_> {
        TrysaildResource::new(&self.transport, &self.config)
    }

    /// Configuration the client was created with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &reqwest::blocking::Client {
        self.transport.http_client()
    }
}
