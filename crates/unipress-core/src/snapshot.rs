// ── Cached console state ──
//
// A `Snapshot` is one immutable, fully typed picture of the console:
// network devices keyed by site and device id, plus the Protect section
// when the console runs Protect. The coordinator swaps whole snapshots
// atomically; buttons only ever read them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::model::{Camera, Chime, Device, Port};

/// The Protect half of a snapshot.
#[derive(Debug, Clone, Default)]
pub struct ProtectSnapshot {
    pub cameras: HashMap<String, Camera>,
    pub chimes: HashMap<String, Chime>,
}

/// One immutable picture of everything the coordinator knows.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Network devices, keyed by site id then device id.
    pub devices: HashMap<String, HashMap<String, Device>>,
    /// Protect devices. `None` when the console has no Protect
    /// application (or it was never reachable).
    pub protect: Option<ProtectSnapshot>,
    /// When this snapshot was assembled.
    pub refreshed_at: DateTime<Utc>,
}

impl Snapshot {
    /// A snapshot with nothing in it, as held before the first refresh.
    pub fn empty() -> Self {
        Self {
            devices: HashMap::new(),
            protect: None,
            refreshed_at: Utc::now(),
        }
    }

    // ── Lookups ──────────────────────────────────────────────────────
    // All total: any missing level yields `None`, never a panic.

    pub fn device(&self, site_id: &str, device_id: &str) -> Option<&Device> {
        self.devices.get(site_id)?.get(device_id)
    }

    pub fn port(&self, site_id: &str, device_id: &str, port_idx: u32) -> Option<&Port> {
        self.device(site_id, device_id)?.port(port_idx)
    }

    pub fn camera(&self, camera_id: &str) -> Option<&Camera> {
        self.protect.as_ref()?.cameras.get(camera_id)
    }

    pub fn chime(&self, chime_id: &str) -> Option<&Chime> {
        self.protect.as_ref()?.chimes.get(chime_id)
    }

    /// Total number of network devices across all sites.
    pub fn device_count(&self) -> usize {
        self.devices.values().map(HashMap::len).sum()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}
