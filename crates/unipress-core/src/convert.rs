// ── API-to-domain type conversions ──
//
// Bridges raw `unipress_api` response types into canonical
// `unipress_core::model` domain types. Every function here is total:
// unknown state words become `Unknown`, malformed port entries are
// dropped, missing fields get defaults. Nothing downstream has to look
// at raw JSON again.

use std::net::IpAddr;

use serde_json::Value;

use unipress_api::network::types::{DeviceDetailsResponse, DeviceResponse};
use unipress_api::protect::types::{CameraResponse, ChimeResponse};

use crate::model::{
    device::{Device, DeviceState, Port},
    protect::{Camera, Chime, ProtectState, RingSetting},
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an optional string to an `IpAddr`, silently dropping unparseable values.
fn parse_ip(raw: Option<&str>) -> Option<IpAddr> {
    raw.and_then(|s| s.parse().ok())
}

// ── Device ─────────────────────────────────────────────────────────

/// Map the Integration API state word to `DeviceState`.
fn map_device_state(raw: Option<&str>) -> DeviceState {
    match raw {
        Some("ONLINE") => DeviceState::Online,
        Some("OFFLINE") => DeviceState::Offline,
        Some("PENDING_ADOPTION") => DeviceState::PendingAdoption,
        Some("UPDATING") => DeviceState::Updating,
        Some("GETTING_READY") => DeviceState::GettingReady,
        Some("ADOPTING") => DeviceState::Adopting,
        Some("DELETING") => DeviceState::Deleting,
        Some("CONNECTION_INTERRUPTED") => DeviceState::ConnectionInterrupted,
        Some("ISOLATED") => DeviceState::Isolated,
        _ => DeviceState::Unknown,
    }
}

/// Convert one raw `port_table` entry.
///
/// Entries without a numeric `port_idx` are unaddressable and dropped.
/// `poe_enable` counts only when it is boolean `true`; any other shape
/// means no PoE.
fn map_port_entry(entry: &Value) -> Option<Port> {
    let idx = u32::try_from(entry.get("port_idx")?.as_u64()?).ok()?;

    Some(Port {
        idx,
        name: entry
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_owned),
        poe_enabled: entry.get("poe_enable").and_then(Value::as_bool) == Some(true),
    })
}

/// Assemble a `Device` from the list entry and, when the detail fetch
/// succeeded, the detail payload.
///
/// The detail state is preferred over the (older) list state. Without
/// details the device has no ports.
pub fn device_from_api(summary: &DeviceResponse, details: Option<&DeviceDetailsResponse>) -> Device {
    let ports = details
        .map(|d| d.port_table.iter().filter_map(map_port_entry).collect())
        .unwrap_or_default();

    let state_raw = details
        .and_then(|d| d.state.as_deref())
        .or(summary.state.as_deref());

    Device {
        id: summary.id.clone(),
        name: summary.name.clone(),
        model: summary.model.clone(),
        mac: summary.mac_address.clone(),
        ip: parse_ip(summary.ip_address.as_deref()),
        firmware_version: summary.firmware_version.clone(),
        state: map_device_state(state_raw),
        ports,
    }
}

// ── Protect ────────────────────────────────────────────────────────

/// Map the Protect state word to `ProtectState`.
fn map_protect_state(raw: Option<&str>) -> ProtectState {
    match raw {
        Some("CONNECTED") => ProtectState::Connected,
        Some("DISCONNECTED") => ProtectState::Disconnected,
        _ => ProtectState::Unknown,
    }
}

impl From<ChimeResponse> for Chime {
    fn from(c: ChimeResponse) -> Self {
        Chime {
            state: map_protect_state(c.state.as_deref()),
            id: c.id,
            name: c.name,
            ring_settings: c
                .ring_settings
                .into_iter()
                .map(|s| RingSetting {
                    ringtone_id: s.ringtone_id,
                    camera_ids: s.camera_ids,
                })
                .collect(),
        }
    }
}

impl From<CameraResponse> for Camera {
    fn from(c: CameraResponse) -> Self {
        Camera {
            state: map_protect_state(c.state.as_deref()),
            id: c.id,
            name: c.name,
            has_ptz: c.feature_flags.has_ptz,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn device_state_mapping() {
        assert_eq!(map_device_state(Some("ONLINE")), DeviceState::Online);
        assert_eq!(map_device_state(Some("OFFLINE")), DeviceState::Offline);
        assert_eq!(
            map_device_state(Some("CONNECTION_INTERRUPTED")),
            DeviceState::ConnectionInterrupted
        );
        assert_eq!(map_device_state(Some("SLEEPING")), DeviceState::Unknown);
        assert_eq!(map_device_state(None), DeviceState::Unknown);
    }

    #[test]
    fn port_entry_requires_numeric_index() {
        assert!(map_port_entry(&json!({ "poe_enable": true })).is_none());
        assert!(map_port_entry(&json!({ "port_idx": "one" })).is_none());
        assert!(map_port_entry(&json!("not an object")).is_none());

        let port = map_port_entry(&json!({ "port_idx": 3 })).unwrap();
        assert_eq!(port.idx, 3);
        assert!(!port.poe_enabled);
    }

    #[test]
    fn port_entry_poe_only_when_boolean_true() {
        let enabled = map_port_entry(&json!({ "port_idx": 1, "poe_enable": true })).unwrap();
        assert!(enabled.poe_enabled);

        let disabled = map_port_entry(&json!({ "port_idx": 1, "poe_enable": false })).unwrap();
        assert!(!disabled.poe_enabled);

        // A non-boolean flag means no PoE, not an error
        let stringly = map_port_entry(&json!({ "port_idx": 1, "poe_enable": "true" })).unwrap();
        assert!(!stringly.poe_enabled);
    }

    #[test]
    fn device_prefers_detail_state_and_collects_ports() {
        let summary: DeviceResponse = serde_json::from_value(json!({
            "id": "device-1",
            "name": "Office Switch",
            "state": "OFFLINE",
            "ipAddress": "192.168.1.10"
        }))
        .unwrap();
        let details: DeviceDetailsResponse = serde_json::from_value(json!({
            "id": "device-1",
            "state": "ONLINE",
            "port_table": [
                { "port_idx": 1, "name": "Port 1", "poe_enable": true },
                { "port_idx": 2, "poe_enable": false },
                { "name": "broken entry" },
            ]
        }))
        .unwrap();

        let device = device_from_api(&summary, Some(&details));

        assert_eq!(device.state, DeviceState::Online);
        assert_eq!(device.ports.len(), 2);
        assert!(device.port(1).unwrap().poe_enabled);
        assert!(!device.port(2).unwrap().poe_enabled);
        assert!(device.port(3).is_none());
        assert_eq!(device.ip, Some("192.168.1.10".parse().unwrap()));
    }

    #[test]
    fn device_without_details_has_no_ports() {
        let summary: DeviceResponse = serde_json::from_value(json!({
            "id": "device-1",
            "state": "ONLINE"
        }))
        .unwrap();

        let device = device_from_api(&summary, None);

        assert_eq!(device.state, DeviceState::Online);
        assert!(device.ports.is_empty());
    }

    #[test]
    fn chime_conversion_keeps_ring_settings_order() {
        let raw: ChimeResponse = serde_json::from_value(json!({
            "id": "chime-1",
            "name": "Hallway",
            "state": "CONNECTED",
            "ringSettings": [
                { "ringtoneId": "mechanical", "cameraIds": ["cam-1"] },
                { "ringtoneId": "digital", "cameraIds": [] },
            ]
        }))
        .unwrap();

        let chime: Chime = raw.into();

        assert!(chime.state.is_connected());
        assert_eq!(chime.current_ringtone_id(), "mechanical");
        assert_eq!(chime.ring_settings.len(), 2);
    }

    #[test]
    fn chime_without_settings_uses_default_ringtone() {
        let raw: ChimeResponse = serde_json::from_value(json!({
            "id": "chime-1",
            "state": "MIGRATING"
        }))
        .unwrap();

        let chime: Chime = raw.into();

        assert_eq!(chime.state, ProtectState::Unknown);
        assert_eq!(chime.current_ringtone_id(), "default");
    }

    #[test]
    fn camera_conversion_reads_feature_flags() {
        let raw: CameraResponse = serde_json::from_value(json!({
            "id": "cam-1",
            "name": "Driveway",
            "state": "CONNECTED",
            "featureFlags": { "hasPtz": true, "hasSmartDetect": true }
        }))
        .unwrap();

        let camera: Camera = raw.into();

        assert!(camera.has_ptz);
        assert!(camera.state.is_connected());

        let raw_fixed: CameraResponse = serde_json::from_value(json!({
            "id": "cam-2",
            "state": "DISCONNECTED"
        }))
        .unwrap();

        let fixed: Camera = raw_fixed.into();

        assert!(!fixed.has_ptz);
        assert!(!fixed.state.is_connected());
    }
}
