//! Resource clients, one per area of the control-plane API.
//!
//! Resource clients borrow the transport and configuration of the
//! [`TrysailClient`](crate::TrysailClient) that created them and hold no other
//! state, so they are cheap to create per call.

pub mod control_plane;
pub mod trysaild;
pub mod zones;

pub use control_plane::ControlPlaneResource;
pub use trysaild::TrysaildResource;
pub use zones::ZoneResource;
