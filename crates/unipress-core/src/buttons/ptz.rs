// ── PTZ patrol buttons ──

use tracing::{debug, error, info};

use crate::buttons::{ButtonDescription, PTZ_PATROL_START, PTZ_PATROL_STOP};
use crate::coordinator::Coordinator;
use crate::error::CoreError;
use crate::model::Camera;
use crate::DOMAIN;

/// Patrol preset slot used for every start request. The API numbers
/// patrol slots from zero and consoles always populate the first one.
pub const PTZ_PATROL_SLOT: u32 = 0;

fn camera_connected(coordinator: &Coordinator, camera_id: &str) -> bool {
    coordinator
        .snapshot()
        .camera(camera_id)
        .is_some_and(|camera| camera.state.is_connected())
}

/// Starts the patrol stored in slot [`PTZ_PATROL_SLOT`] on a PTZ camera.
pub struct PtzPatrolStartButton {
    coordinator: Coordinator,
    camera_id: String,
    unique_id: String,
}

impl PtzPatrolStartButton {
    pub fn new(coordinator: Coordinator, camera: &Camera) -> Self {
        Self {
            unique_id: format!("{DOMAIN}_camera_{}_ptz_start", camera.id),
            coordinator,
            camera_id: camera.id.clone(),
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn camera_id(&self) -> &str {
        &self.camera_id
    }

    pub fn description(&self) -> &'static ButtonDescription {
        &PTZ_PATROL_START
    }

    pub fn name(&self) -> String {
        PTZ_PATROL_START.name.to_owned()
    }

    pub fn available(&self) -> bool {
        camera_connected(&self.coordinator, &self.camera_id)
    }

    /// Start the patrol. Failures are logged, never propagated.
    pub async fn press(&self) {
        debug!(camera = %self.camera_id, "ptz patrol start pressed");

        match self.dispatch().await {
            Ok(()) => {
                info!(camera = %self.camera_id, slot = PTZ_PATROL_SLOT, "ptz patrol started");
            }
            Err(err) => {
                error!(camera = %self.camera_id, error = %err, "ptz patrol start failed");
            }
        }
    }

    async fn dispatch(&self) -> Result<(), CoreError> {
        let protect = self
            .coordinator
            .protect()
            .ok_or(CoreError::ProtectNotConfigured)?;
        protect
            .ptz_patrol_start(&self.camera_id, PTZ_PATROL_SLOT)
            .await?;
        Ok(())
    }
}

/// Stops whichever patrol is running on a PTZ camera.
pub struct PtzPatrolStopButton {
    coordinator: Coordinator,
    camera_id: String,
    unique_id: String,
}

impl PtzPatrolStopButton {
    pub fn new(coordinator: Coordinator, camera: &Camera) -> Self {
        Self {
            unique_id: format!("{DOMAIN}_camera_{}_ptz_stop", camera.id),
            coordinator,
            camera_id: camera.id.clone(),
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn camera_id(&self) -> &str {
        &self.camera_id
    }

    pub fn description(&self) -> &'static ButtonDescription {
        &PTZ_PATROL_STOP
    }

    pub fn name(&self) -> String {
        PTZ_PATROL_STOP.name.to_owned()
    }

    pub fn available(&self) -> bool {
        camera_connected(&self.coordinator, &self.camera_id)
    }

    /// Stop the patrol. Failures are logged, never propagated.
    pub async fn press(&self) {
        debug!(camera = %self.camera_id, "ptz patrol stop pressed");

        match self.dispatch().await {
            Ok(()) => {
                info!(camera = %self.camera_id, "ptz patrol stopped");
            }
            Err(err) => {
                error!(camera = %self.camera_id, error = %err, "ptz patrol stop failed");
            }
        }
    }

    async fn dispatch(&self) -> Result<(), CoreError> {
        let protect = self
            .coordinator
            .protect()
            .ok_or(CoreError::ProtectNotConfigured)?;
        protect.ptz_patrol_stop(&self.camera_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::fixtures;
    use crate::model::ProtectState;

    #[test]
    fn unique_ids_distinguish_start_and_stop() {
        let coordinator = fixtures::coordinator(true);
        let camera = fixtures::camera("cam-1", ProtectState::Connected, true);

        let start = PtzPatrolStartButton::new(coordinator.clone(), &camera);
        let stop = PtzPatrolStopButton::new(coordinator, &camera);

        assert_eq!(start.unique_id(), "unipress_camera_cam-1_ptz_start");
        assert_eq!(stop.unique_id(), "unipress_camera_cam-1_ptz_stop");
        assert_eq!(start.name(), "Start PTZ Patrol");
        assert_eq!(stop.name(), "Stop PTZ Patrol");
    }

    #[test]
    fn availability_follows_camera_connection() {
        let coordinator = fixtures::coordinator(true);
        let camera = fixtures::camera("cam-1", ProtectState::Connected, true);
        let start = PtzPatrolStartButton::new(coordinator.clone(), &camera);
        let stop = PtzPatrolStopButton::new(coordinator.clone(), &camera);

        assert!(!start.available());
        assert!(!stop.available());

        coordinator.install_snapshot(fixtures::protect_snapshot(
            vec![fixtures::camera("cam-1", ProtectState::Connected, true)],
            Vec::new(),
        ));
        assert!(start.available());
        assert!(stop.available());

        coordinator.install_snapshot(fixtures::protect_snapshot(
            vec![fixtures::camera("cam-1", ProtectState::Disconnected, true)],
            Vec::new(),
        ));
        assert!(!start.available());
        assert!(!stop.available());
    }
}
