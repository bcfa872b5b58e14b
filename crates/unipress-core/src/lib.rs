// unipress-core: Coordinator and button dispatch layer between unipress-api and consumers.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod coordinator;
pub mod buttons;

/// Namespace prefix for Protect-side unique ids.
pub const DOMAIN: &str = "unipress";

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ControllerConfig, TlsVerification};
pub use coordinator::{ConnectionState, Coordinator};
pub use error::CoreError;
pub use snapshot::{ProtectSnapshot, Snapshot};

pub use buttons::{
    build_buttons, setup_entry, Button, ButtonDescription, ButtonKind, ChimeAttributes,
    ChimePlayButton, PortPowerCycleButton, PtzPatrolStartButton, PtzPatrolStopButton,
    RestartButton, PTZ_PATROL_SLOT,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Camera, Chime, Device, DeviceState, Port, ProtectState, RingSetting, DEFAULT_RINGTONE_ID,
};
