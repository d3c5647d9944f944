//! Trysail models shared by the resource clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Status reported by the control plane for a zone that is in service.
pub const ZONE_STATUS_ACTIVE: &str = "active";

/// Status reported by the control plane for a zone taken out of service.
pub const ZONE_STATUS_INACTIVE: &str = "inactive";

/// A managed network segment as returned by the control plane.
///
/// Decoding is lenient: every field is optional on the wire and falls back to
/// its default when missing, `null` or of an unexpected type. Keys and CIDR
/// strings are not validated; that is the control plane's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    /// Zone identifier.
    pub id: String,
    /// Human-readable zone name.
    pub name: String,
    /// WireGuard public key of the zone.
    pub public_key: String,
    /// Public `host:port` endpoint.
    pub endpoint: Option<String>,
    /// CIDR ranges routed to the zone.
    pub allowed_ips: Vec<String>,
    /// Keepalive interval, as sent by the control plane.
    pub persistent_keepalive: Option<String>,
    /// Zone status, `active` unless the control plane says otherwise.
    pub status: String,
    /// Last handshake timestamp, as sent by the control plane.
    pub last_seen: Option<String>,
    /// Free-form metadata.
    pub metadata: Map<String, Value>,
}

impl Default for Zone {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            public_key: String::new(),
            endpoint: None,
            allowed_ips: Vec::new(),
            persistent_keepalive: None,
            status: ZONE_STATUS_ACTIVE.to_string(),
            last_seen: None,
            metadata: Map::new(),
        }
    }
}

impl Zone {
    /// Create a zone with the required identity fields and defaults elsewhere.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            public_key: public_key.into(),
            ..Self::default()
        }
    }

    /// Decode a zone from a JSON object. Never fails.
    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            id: string_field(map, "id").unwrap_or_default(),
            name: string_field(map, "name").unwrap_or_default(),
            public_key: string_field(map, "public_key").unwrap_or_default(),
            endpoint: string_field(map, "endpoint"),
            allowed_ips: map
                .get("allowed_ips")
                .and_then(Value::as_array)
                .map(|ips| {
                    ips.iter()
                        .filter_map(|ip| ip.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
            persistent_keepalive: string_field(map, "persistent_keepalive"),
            status: string_field(map, "status")
                .unwrap_or_else(|| ZONE_STATUS_ACTIVE.to_string()),
            last_seen: string_field(map, "last_seen"),
            metadata: map
                .get("metadata")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Encode the zone as a JSON object with all nine wire keys.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::from(self.id.clone()));
        map.insert("name".into(), Value::from(self.name.clone()));
        map.insert("public_key".into(), Value::from(self.public_key.clone()));
        map.insert("endpoint".into(), Value::from(self.endpoint.clone()));
        map.insert("allowed_ips".into(), Value::from(self.allowed_ips.clone()));
        map.insert(
            "persistent_keepalive".into(),
            Value::from(self.persistent_keepalive.clone()),
        );
        map.insert("status".into(), Value::from(self.status.clone()));
        map.insert("last_seen".into(), Value::from(self.last_seen.clone()));
        map.insert("metadata".into(), Value::Object(self.metadata.clone()));
        map
    }

    /// Returns true when the zone status is `active`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ZONE_STATUS_ACTIVE
    }

    /// Parse `last_seen` as an RFC 3339 timestamp.
    #[must_use]
    pub fn last_seen_at(&self) -> Option<DateTime<Utc>> {
        self.last_seen
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }
}

impl From<&Map<String, Value>> for Zone {
    fn from(map: &Map<String, Value>) -> Self {
        Self::from_map(map)
    }
}

impl Serialize for Zone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_map(&map))
    }
}

// Numbers are accepted for string fields; keepalives often arrive as integers.
fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

/// Request payload for creating a zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreateZoneRequest {
    /// Zone name.
    pub name: String,
    /// WireGuard public key.
    pub public_key: String,
    /// Public endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Routed CIDR ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_ips: Option<Vec<String>>,
    /// Keepalive interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_keepalive: Option<String>,
    /// Initial status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl CreateZoneRequest {
    /// Create a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public_key: public_key.into(),
            ..Self::default()
        }
    }

    /// Set the public endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the routed CIDR ranges.
    #[must_use]
    pub fn with_allowed_ips<I, S>(mut self, allowed_ips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_ips = Some(allowed_ips.into_iter().map(Into::into).collect());
        self
    }

    /// Set the keepalive interval.
    #[must_use]
    pub fn with_persistent_keepalive(mut self, keepalive: impl Into<String>) -> Self {
        self.persistent_keepalive = Some(keepalive.into());
        self
    }

    /// Set the initial status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Request payload for a partial zone update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UpdateZoneRequest {
    /// Zone name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// WireGuard public key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// Public endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Routed CIDR ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_ips: Option<Vec<String>>,
    /// Keepalive interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_keepalive: Option<String>,
    /// Zone status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}
