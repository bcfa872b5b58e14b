// ── Network device domain types ──

use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Device operational state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum DeviceState {
    Online,
    Offline,
    PendingAdoption,
    Updating,
    GettingReady,
    Adopting,
    Deleting,
    ConnectionInterrupted,
    Isolated,
    /// The controller sent a state this build does not know, or none at
    /// all. Treated as not online everywhere.
    Unknown,
}

impl DeviceState {
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }

    pub fn is_transitional(&self) -> bool {
        matches!(
            self,
            Self::Updating | Self::GettingReady | Self::Adopting | Self::PendingAdoption
        )
    }
}

/// Physical port on a switch or gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub idx: u32,
    pub name: Option<String>,
    /// PoE delivery is configured on this port. Only ports with this
    /// flag get a power-cycle action.
    pub poe_enabled: bool,
}

/// The canonical network device type, assembled from the device list
/// and detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: Option<String>,
    pub model: Option<String>,
    pub mac: Option<String>,
    pub ip: Option<IpAddr>,
    pub firmware_version: Option<String>,
    pub state: DeviceState,
    pub ports: Vec<Port>,
}

impl Device {
    /// Look up a port by its 1-based index.
    pub fn port(&self, idx: u32) -> Option<&Port> {
        self.ports.iter().find(|port| port.idx == idx)
    }

    /// Display name, falling back to the device id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
