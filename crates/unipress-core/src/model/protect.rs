// ── Protect device domain types ──

use serde::{Deserialize, Serialize};
use strum::Display;

/// Ringtone used when a chime has no ring settings to consult.
pub const DEFAULT_RINGTONE_ID: &str = "default";

/// Connection state of a Protect device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ProtectState {
    Connected,
    Disconnected,
    /// Unrecognized or missing state. Treated as not connected.
    Unknown,
}

impl ProtectState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// One entry of a chime's ring configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingSetting {
    pub ringtone_id: Option<String>,
    pub camera_ids: Vec<String>,
}

/// A Protect chime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chime {
    pub id: String,
    pub name: Option<String>,
    pub state: ProtectState,
    pub ring_settings: Vec<RingSetting>,
}

impl Chime {
    /// The ringtone the chime would currently play: the first ring
    /// setting's ringtone, or [`DEFAULT_RINGTONE_ID`] when there is
    /// none.
    pub fn current_ringtone_id(&self) -> &str {
        self.ring_settings
            .first()
            .and_then(|setting| setting.ringtone_id.as_deref())
            .unwrap_or(DEFAULT_RINGTONE_ID)
    }

    /// Display name, falling back to the chime id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A Protect camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub id: String,
    pub name: Option<String>,
    pub state: ProtectState,
    /// Camera supports pan-tilt-zoom; only these get patrol actions.
    pub has_ptz: bool,
}

impl Camera {
    /// Display name, falling back to the camera id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
