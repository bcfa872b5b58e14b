//! Press-button actions over the coordinator's cached snapshot.
//!
//! Every button follows the same shape: a total `available()` predicate
//! read from the current snapshot, and an async `press()` that dispatches
//! one controller call and logs the outcome without ever propagating an
//! error to the caller.

mod chime;
mod port;
mod ptz;
mod restart;

use strum::Display;
use tracing::debug;

use crate::coordinator::Coordinator;

pub use chime::{ChimeAttributes, ChimePlayButton};
pub use port::PortPowerCycleButton;
pub use ptz::{PtzPatrolStartButton, PtzPatrolStopButton, PTZ_PATROL_SLOT};
pub use restart::RestartButton;

// ── Button descriptions ─────────────────────────────────────────────

/// Static metadata shared by every instance of a button kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonDescription {
    /// Stable key used when composing unique ids.
    pub key: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Material Design icon identifier.
    pub icon: &'static str,
}

pub const DEVICE_RESTART: ButtonDescription = ButtonDescription {
    key: "device_restart",
    name: "Device Restart",
    icon: "mdi:restart",
};

pub const PORT_POWER_CYCLE: ButtonDescription = ButtonDescription {
    key: "power_cycle",
    name: "Power Cycle",
    icon: "mdi:power-cycle",
};

pub const CHIME_PLAY: ButtonDescription = ButtonDescription {
    key: "play",
    name: "Play",
    icon: "mdi:bell-ring-outline",
};

pub const PTZ_PATROL_START: ButtonDescription = ButtonDescription {
    key: "ptz_start",
    name: "Start PTZ Patrol",
    icon: "mdi:cctv",
};

pub const PTZ_PATROL_STOP: ButtonDescription = ButtonDescription {
    key: "ptz_stop",
    name: "Stop PTZ Patrol",
    icon: "mdi:stop-circle-outline",
};

/// Discriminates the five button kinds, e.g. for CLI listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ButtonKind {
    DeviceRestart,
    PortPowerCycle,
    ChimePlay,
    PtzPatrolStart,
    PtzPatrolStop,
}

// ── Button enum ─────────────────────────────────────────────────────

/// One pressable action bound to a target in the snapshot.
pub enum Button {
    Restart(RestartButton),
    PortPowerCycle(PortPowerCycleButton),
    ChimePlay(ChimePlayButton),
    PtzPatrolStart(PtzPatrolStartButton),
    PtzPatrolStop(PtzPatrolStopButton),
}

impl Button {
    pub fn kind(&self) -> ButtonKind {
        match self {
            Self::Restart(_) => ButtonKind::DeviceRestart,
            Self::PortPowerCycle(_) => ButtonKind::PortPowerCycle,
            Self::ChimePlay(_) => ButtonKind::ChimePlay,
            Self::PtzPatrolStart(_) => ButtonKind::PtzPatrolStart,
            Self::PtzPatrolStop(_) => ButtonKind::PtzPatrolStop,
        }
    }

    pub fn unique_id(&self) -> &str {
        match self {
            Self::Restart(b) => b.unique_id(),
            Self::PortPowerCycle(b) => b.unique_id(),
            Self::ChimePlay(b) => b.unique_id(),
            Self::PtzPatrolStart(b) => b.unique_id(),
            Self::PtzPatrolStop(b) => b.unique_id(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Restart(b) => b.name(),
            Self::PortPowerCycle(b) => b.name(),
            Self::ChimePlay(b) => b.name(),
            Self::PtzPatrolStart(b) => b.name(),
            Self::PtzPatrolStop(b) => b.name(),
        }
    }

    pub fn description(&self) -> &'static ButtonDescription {
        match self {
            Self::Restart(b) => b.description(),
            Self::PortPowerCycle(b) => b.description(),
            Self::ChimePlay(b) => b.description(),
            Self::PtzPatrolStart(b) => b.description(),
            Self::PtzPatrolStop(b) => b.description(),
        }
    }

    pub fn icon(&self) -> &'static str {
        self.description().icon
    }

    /// Site the button acts within, for network-side buttons.
    pub fn site_id(&self) -> Option<&str> {
        match self {
            Self::Restart(b) => Some(b.site_id()),
            Self::PortPowerCycle(b) => Some(b.site_id()),
            _ => None,
        }
    }

    pub fn available(&self) -> bool {
        match self {
            Self::Restart(b) => b.available(),
            Self::PortPowerCycle(b) => b.available(),
            Self::ChimePlay(b) => b.available(),
            Self::PtzPatrolStart(b) => b.available(),
            Self::PtzPatrolStop(b) => b.available(),
        }
    }

    pub async fn press(&self) {
        match self {
            Self::Restart(b) => b.press().await,
            Self::PortPowerCycle(b) => b.press().await,
            Self::ChimePlay(b) => b.press().await,
            Self::PtzPatrolStart(b) => b.press().await,
            Self::PtzPatrolStop(b) => b.press().await,
        }
    }
}

// ── Setup ───────────────────────────────────────────────────────────

/// Enumerate buttons for everything in the current snapshot.
///
/// Per device: one restart button, plus one power-cycle button per
/// PoE-enabled port. When the Protect client is configured and the
/// snapshot carries a Protect section: one play button per chime and a
/// start/stop pair per PTZ-capable camera. Iteration order is not
/// specified.
pub fn setup_entry<F>(coordinator: &Coordinator, mut register: F)
where
    F: FnMut(Button),
{
    let snapshot = coordinator.snapshot();
    let mut count = 0usize;

    for (site_id, devices) in &snapshot.devices {
        for (device_id, device) in devices {
            register(Button::Restart(RestartButton::new(
                coordinator.clone(),
                site_id,
                device_id,
            )));
            count += 1;

            for p in &device.ports {
                if p.poe_enabled {
                    register(Button::PortPowerCycle(PortPowerCycleButton::new(
                        coordinator.clone(),
                        site_id,
                        device_id,
                        p.idx,
                    )));
                    count += 1;
                }
            }
        }
    }

    if coordinator.protect_configured() {
        if let Some(protect) = &snapshot.protect {
            for c in protect.chimes.values() {
                register(Button::ChimePlay(ChimePlayButton::new(
                    coordinator.clone(),
                    c,
                )));
                count += 1;
            }

            for cam in protect.cameras.values() {
                if cam.has_ptz {
                    register(Button::PtzPatrolStart(PtzPatrolStartButton::new(
                        coordinator.clone(),
                        cam,
                    )));
                    register(Button::PtzPatrolStop(PtzPatrolStopButton::new(
                        coordinator.clone(),
                        cam,
                    )));
                    count += 2;
                }
            }
        }
    }

    debug!(buttons = count, "button setup complete");
}

/// Collect every button into a `Vec`.
pub fn build_buttons(coordinator: &Coordinator) -> Vec<Button> {
    let mut buttons = Vec::new();
    setup_entry(coordinator, |button| buttons.push(button));
    buttons
}

// ── Test fixtures ───────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod fixtures {
    use std::collections::HashMap;
    use std::time::Duration;

    use chrono::Utc;
    use secrecy::SecretString;

    use crate::config::{ControllerConfig, TlsVerification};
    use crate::coordinator::Coordinator;
    use crate::model::{Camera, Chime, Device, DeviceState, Port, ProtectState, RingSetting};
    use crate::snapshot::{ProtectSnapshot, Snapshot};

    pub fn coordinator(protect_enabled: bool) -> Coordinator {
        let config = ControllerConfig {
            url: "https://unifi.local".parse().expect("static url"),
            api_key: SecretString::from("test-key".to_string()),
            tls: TlsVerification::DangerAcceptInvalid,
            timeout: Duration::from_secs(5),
            refresh_interval_secs: 0,
            protect_enabled,
        };
        Coordinator::new(config).expect("coordinator construction is infallible here")
    }

    pub fn device(id: &str, state: DeviceState, ports: Vec<Port>) -> Device {
        Device {
            id: id.to_owned(),
            name: Some(format!("{id} name")),
            model: None,
            mac: None,
            ip: None,
            firmware_version: None,
            state,
            ports,
        }
    }

    pub fn poe_port(idx: u32, poe_enabled: bool) -> Port {
        Port {
            idx,
            name: Some(format!("Port {idx}")),
            poe_enabled,
        }
    }

    pub fn chime(id: &str, state: ProtectState, ringtone: Option<&str>) -> Chime {
        Chime {
            id: id.to_owned(),
            name: Some("Hallway".to_owned()),
            state,
            ring_settings: ringtone
                .map(|r| {
                    vec![RingSetting {
                        ringtone_id: Some(r.to_owned()),
                        camera_ids: Vec::new(),
                    }]
                })
                .unwrap_or_default(),
        }
    }

    pub fn camera(id: &str, state: ProtectState, has_ptz: bool) -> Camera {
        Camera {
            id: id.to_owned(),
            name: Some("Driveway".to_owned()),
            state,
            has_ptz,
        }
    }

    pub fn snapshot_with_devices(site_id: &str, devices: Vec<Device>) -> Snapshot {
        let mut map = HashMap::new();
        map.insert(
            site_id.to_owned(),
            devices
                .into_iter()
                .map(|d| (d.id.clone(), d))
                .collect::<HashMap<_, _>>(),
        );
        Snapshot {
            devices: map,
            protect: None,
            refreshed_at: Utc::now(),
        }
    }

    pub fn protect_snapshot(cameras: Vec<Camera>, chimes: Vec<Chime>) -> Snapshot {
        Snapshot {
            devices: HashMap::new(),
            protect: Some(ProtectSnapshot {
                cameras: cameras.into_iter().map(|c| (c.id.clone(), c)).collect(),
                chimes: chimes.into_iter().map(|c| (c.id.clone(), c)).collect(),
            }),
            refreshed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::model::{DeviceState, ProtectState};

    #[test]
    fn kind_display_uses_snake_case() {
        assert_eq!(ButtonKind::DeviceRestart.to_string(), "device_restart");
        assert_eq!(ButtonKind::PtzPatrolStart.to_string(), "ptz_patrol_start");
    }

    #[test]
    fn network_buttons_cover_devices_and_poe_ports() {
        let coordinator = fixtures::coordinator(false);
        coordinator.install_snapshot(fixtures::snapshot_with_devices(
            "site-1",
            vec![
                fixtures::device(
                    "switch",
                    DeviceState::Online,
                    vec![fixtures::poe_port(1, true), fixtures::poe_port(2, false)],
                ),
                fixtures::device("ap", DeviceState::Offline, Vec::new()),
            ],
        ));

        let buttons = build_buttons(&coordinator);
        let ids: HashSet<&str> = buttons.iter().map(Button::unique_id).collect();

        assert_eq!(buttons.len(), 3);
        assert!(ids.contains("site-1_switch_device_restart"));
        assert!(ids.contains("site-1_ap_device_restart"));
        assert!(ids.contains("site-1_switch_port_1_power_cycle"));
        // PoE disabled on port 2, so no button for it
        assert!(!ids.contains("site-1_switch_port_2_power_cycle"));
    }

    #[test]
    fn offline_device_gets_a_button_but_reads_unavailable() {
        let coordinator = fixtures::coordinator(false);
        coordinator.install_snapshot(fixtures::snapshot_with_devices(
            "site-1",
            vec![fixtures::device("ap", DeviceState::Offline, Vec::new())],
        ));

        let buttons = build_buttons(&coordinator);
        assert_eq!(buttons.len(), 1);
        assert!(!buttons[0].available());
    }

    #[test]
    fn protect_buttons_require_configured_client() {
        let snapshot = fixtures::protect_snapshot(
            vec![fixtures::camera("cam-1", ProtectState::Connected, true)],
            vec![fixtures::chime("chime-1", ProtectState::Connected, None)],
        );

        // Protect disabled: the section is ignored even when cached.
        let without = fixtures::coordinator(false);
        without.install_snapshot(snapshot.clone());
        assert!(build_buttons(&without).is_empty());

        let with = fixtures::coordinator(true);
        with.install_snapshot(snapshot);
        let buttons = build_buttons(&with);
        let ids: HashSet<&str> = buttons.iter().map(Button::unique_id).collect();

        assert_eq!(buttons.len(), 3);
        assert!(ids.contains("unipress_chime_chime-1_play"));
        assert!(ids.contains("unipress_camera_cam-1_ptz_start"));
        assert!(ids.contains("unipress_camera_cam-1_ptz_stop"));
    }

    #[test]
    fn fixed_cameras_get_no_patrol_buttons() {
        let coordinator = fixtures::coordinator(true);
        coordinator.install_snapshot(fixtures::protect_snapshot(
            vec![
                fixtures::camera("ptz-cam", ProtectState::Connected, true),
                fixtures::camera("fixed-cam", ProtectState::Connected, false),
            ],
            Vec::new(),
        ));

        let buttons = build_buttons(&coordinator);
        let kinds: Vec<ButtonKind> = buttons.iter().map(Button::kind).collect();

        assert_eq!(buttons.len(), 2);
        assert!(kinds.contains(&ButtonKind::PtzPatrolStart));
        assert!(kinds.contains(&ButtonKind::PtzPatrolStop));
        assert!(buttons
            .iter()
            .all(|b| b.unique_id().contains("ptz-cam")));
    }

    #[test]
    fn missing_protect_section_yields_no_protect_buttons() {
        let coordinator = fixtures::coordinator(true);
        coordinator.install_snapshot(fixtures::snapshot_with_devices("site-1", Vec::new()));

        assert!(build_buttons(&coordinator).is_empty());
    }

    #[test]
    fn button_enum_delegates_to_kind() {
        let coordinator = fixtures::coordinator(false);
        let button = Button::Restart(RestartButton::new(coordinator, "site-1", "device-1"));

        assert_eq!(button.kind(), ButtonKind::DeviceRestart);
        assert_eq!(button.unique_id(), "site-1_device-1_device_restart");
        assert_eq!(button.name(), "Device Restart");
        assert_eq!(button.icon(), "mdi:restart");
        assert_eq!(button.site_id(), Some("site-1"));
        assert!(!button.available());
    }
}
