// ── Unified domain model ──
//
// Every type in this module is the canonical representation of a UniFi
// entity, converted from the wire types in unipress-api. Consumers
// (buttons, CLI) depend on these and never on raw payloads.

pub mod device;
pub mod protect;

// ── Re-exports ──────────────────────────────────────────────────────

pub use device::{Device, DeviceState, Port};
pub use protect::{Camera, Chime, DEFAULT_RINGTONE_ID, ProtectState, RingSetting};
