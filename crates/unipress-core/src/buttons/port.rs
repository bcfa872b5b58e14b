// ── PoE port power-cycle button ──

use tracing::{debug, error, info};

use crate::buttons::{ButtonDescription, PORT_POWER_CYCLE};
use crate::coordinator::Coordinator;
use crate::error::CoreError;

/// Power-cycles a single PoE port on a network device.
pub struct PortPowerCycleButton {
    coordinator: Coordinator,
    site_id: String,
    device_id: String,
    port_idx: u32,
    unique_id: String,
}

impl PortPowerCycleButton {
    pub fn new(coordinator: Coordinator, site_id: &str, device_id: &str, port_idx: u32) -> Self {
        Self {
            unique_id: format!("{site_id}_{device_id}_port_{port_idx}_power_cycle"),
            coordinator,
            site_id: site_id.to_owned(),
            device_id: device_id.to_owned(),
            port_idx,
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

    pub fn port_idx(&self) -> u32 {
        self.port_idx
    }

    pub fn description(&self) -> &'static ButtonDescription {
        &PORT_POWER_CYCLE
    }

    pub fn name(&self) -> String {
        format!("Port {} Power Cycle", self.port_idx)
    }

    /// The device must be online and the port must still exist with PoE
    /// enabled. Any missing link in that chain reads as unavailable.
    pub fn available(&self) -> bool {
        self.coordinator
            .snapshot()
            .device(&self.site_id, &self.device_id)
            .is_some_and(|device| {
                device.state.is_online()
                    && device
                        .port(self.port_idx)
                        .is_some_and(|port| port.poe_enabled)
            })
    }

    /// Fire the power cycle. Failures are logged, never propagated.
    pub async fn press(&self) {
        debug!(
            site = %self.site_id,
            device = %self.device_id,
            port = self.port_idx,
            "power-cycle button pressed"
        );

        match self.dispatch().await {
            Ok(()) => {
                info!(
                    site = %self.site_id,
                    device = %self.device_id,
                    port = self.port_idx,
                    "port power cycle initiated"
                );
            }
            Err(err) => {
                error!(
                    site = %self.site_id,
                    device = %self.device_id,
                    port = self.port_idx,
                    error = %err,
                    "port power cycle failed"
                );
            }
        }
    }

    async fn dispatch(&self) -> Result<(), CoreError> {
        self.coordinator
            .network()
            .power_cycle_port(&self.site_id, &self.device_id, self.port_idx)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::fixtures;
    use crate::model::DeviceState;

    #[test]
    fn unique_id_includes_port_index() {
        let coordinator = fixtures::coordinator(false);
        let button = PortPowerCycleButton::new(coordinator, "site-1", "device-1", 2);

        assert_eq!(button.unique_id(), "site-1_device-1_port_2_power_cycle");
        assert_eq!(button.name(), "Port 2 Power Cycle");
        assert_eq!(button.port_idx(), 2);
    }

    #[test]
    fn available_requires_online_device_and_poe_port() {
        let coordinator = fixtures::coordinator(false);
        let button = PortPowerCycleButton::new(coordinator.clone(), "site-1", "device-1", 2);

        assert!(!button.available());

        coordinator.install_snapshot(fixtures::snapshot_with_devices(
            "site-1",
            vec![fixtures::device(
                "device-1",
                DeviceState::Online,
                vec![fixtures::poe_port(2, true)],
            )],
        ));
        assert!(button.available());

        // PoE disabled on the port
        coordinator.install_snapshot(fixtures::snapshot_with_devices(
            "site-1",
            vec![fixtures::device(
                "device-1",
                DeviceState::Online,
                vec![fixtures::poe_port(2, false)],
            )],
        ));
        assert!(!button.available());

        // Port gone entirely
        coordinator.install_snapshot(fixtures::snapshot_with_devices(
            "site-1",
            vec![fixtures::device(
                "device-1",
                DeviceState::Online,
                vec![fixtures::poe_port(1, true)],
            )],
        ));
        assert!(!button.available());

        // Device offline, port otherwise fine
        coordinator.install_snapshot(fixtures::snapshot_with_devices(
            "site-1",
            vec![fixtures::device(
                "device-1",
                DeviceState::Offline,
                vec![fixtures::poe_port(2, true)],
            )],
        ));
        assert!(!button.available());
    }
}
