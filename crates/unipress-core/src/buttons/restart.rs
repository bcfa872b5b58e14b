// ── Device restart button ──

use tracing::{debug, error, info};

use crate::buttons::{ButtonDescription, DEVICE_RESTART};
use crate::coordinator::Coordinator;
use crate::error::CoreError;

/// Restarts one network device.
pub struct RestartButton {
    coordinator: Coordinator,
    site_id: String,
    device_id: String,
    unique_id: String,
}

impl RestartButton {
    pub fn new(coordinator: Coordinator, site_id: &str, device_id: &str) -> Self {
        Self {
            unique_id: format!("{site_id}_{device_id}_{}", DEVICE_RESTART.key),
            coordinator,
            site_id: site_id.to_owned(),
            device_id: device_id.to_owned(),
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn description(&self) -> &'static ButtonDescription {
        &DEVICE_RESTART
    }

    pub fn name(&self) -> String {
        DEVICE_RESTART.name.to_owned()
    }

    /// Total over whatever the snapshot holds: a missing site, a
    /// missing device, or any non-online state all read as unavailable.
    pub fn available(&self) -> bool {
        self.coordinator
            .snapshot()
            .device(&self.site_id, &self.device_id)
            .is_some_and(|device| device.state.is_online())
    }

    /// Fire the restart. Failures are logged, never propagated.
    pub async fn press(&self) {
        debug!(site = %self.site_id, device = %self.device_id, "restart button pressed");

        match self.dispatch().await {
            Ok(true) => {
                info!(site = %self.site_id, device = %self.device_id, "device restart initiated");
            }
            Ok(false) => {
                error!(
                    site = %self.site_id,
                    device = %self.device_id,
                    "controller did not accept device restart"
                );
            }
            Err(err) => {
                error!(
                    site = %self.site_id,
                    device = %self.device_id,
                    error = %err,
                    "device restart failed"
                );
            }
        }
    }

    async fn dispatch(&self) -> Result<bool, CoreError> {
        let accepted = self
            .coordinator
            .network()
            .restart_device(&self.site_id, &self.device_id)
            .await?;
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::fixtures;
    use crate::model::DeviceState;
    use crate::snapshot::Snapshot;

    #[test]
    fn unique_id_combines_site_device_and_key() {
        let coordinator = fixtures::coordinator(false);
        let button = RestartButton::new(coordinator, "site-1", "device-1");

        assert_eq!(button.unique_id(), "site-1_device-1_device_restart");
        assert_eq!(button.name(), "Device Restart");
        assert_eq!(button.description().icon, "mdi:restart");
    }

    #[test]
    fn available_only_when_device_online() {
        let coordinator = fixtures::coordinator(false);
        let button = RestartButton::new(coordinator.clone(), "site-1", "device-1");

        // Nothing cached yet
        assert!(!button.available());

        coordinator.install_snapshot(fixtures::snapshot_with_devices(
            "site-1",
            vec![fixtures::device("device-1", DeviceState::Online, Vec::new())],
        ));
        assert!(button.available());

        coordinator.install_snapshot(fixtures::snapshot_with_devices(
            "site-1",
            vec![fixtures::device("device-1", DeviceState::Offline, Vec::new())],
        ));
        assert!(!button.available());

        coordinator.install_snapshot(fixtures::snapshot_with_devices(
            "site-1",
            vec![fixtures::device("device-1", DeviceState::Unknown, Vec::new())],
        ));
        assert!(!button.available());
    }

    #[test]
    fn unavailable_when_device_vanishes() {
        let coordinator = fixtures::coordinator(false);
        let button = RestartButton::new(coordinator.clone(), "site-1", "device-1");

        coordinator.install_snapshot(fixtures::snapshot_with_devices(
            "site-1",
            vec![fixtures::device("device-1", DeviceState::Online, Vec::new())],
        ));
        assert!(button.available());

        coordinator.install_snapshot(Snapshot::empty());
        assert!(!button.available());
    }
}
