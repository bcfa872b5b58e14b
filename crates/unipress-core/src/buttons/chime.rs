// ── Chime play button ──

use tracing::{debug, error, info};

use crate::buttons::{ButtonDescription, CHIME_PLAY};
use crate::coordinator::Coordinator;
use crate::error::CoreError;
use crate::model::{Chime, DEFAULT_RINGTONE_ID};
use crate::DOMAIN;

/// Descriptive attributes captured when the button was built. These do
/// not track later snapshot refreshes; the ringtone actually played is
/// resolved again at press time.
pub struct ChimeAttributes<'a> {
    pub chime_id: &'a str,
    pub chime_name: Option<&'a str>,
    pub ringtone_id: &'a str,
}

/// Plays the configured ringtone on a Protect chime.
pub struct ChimePlayButton {
    coordinator: Coordinator,
    chime_id: String,
    chime_name: Option<String>,
    ringtone_at_setup: String,
    unique_id: String,
}

impl ChimePlayButton {
    pub fn new(coordinator: Coordinator, chime: &Chime) -> Self {
        Self {
            unique_id: format!("{DOMAIN}_chime_{}_play", chime.id),
            coordinator,
            chime_id: chime.id.clone(),
            chime_name: chime.name.clone(),
            ringtone_at_setup: chime.current_ringtone_id().to_owned(),
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn chime_id(&self) -> &str {
        &self.chime_id
    }

    pub fn description(&self) -> &'static ButtonDescription {
        &CHIME_PLAY
    }

    pub fn name(&self) -> String {
        CHIME_PLAY.name.to_owned()
    }

    pub fn attributes(&self) -> ChimeAttributes<'_> {
        ChimeAttributes {
            chime_id: &self.chime_id,
            chime_name: self.chime_name.as_deref(),
            ringtone_id: &self.ringtone_at_setup,
        }
    }

    /// Available while the chime is present and connected. A missing
    /// Protect section counts as absent.
    pub fn available(&self) -> bool {
        self.coordinator
            .snapshot()
            .chime(&self.chime_id)
            .is_some_and(|chime| chime.state.is_connected())
    }

    /// Play the chime. The ringtone is read from the current snapshot
    /// rather than the one seen at construction, so ring-setting
    /// changes picked up by a refresh take effect immediately.
    /// Failures are logged, never propagated.
    pub async fn press(&self) {
        let snapshot = self.coordinator.snapshot();
        let ringtone = snapshot.chime(&self.chime_id).map_or_else(
            || DEFAULT_RINGTONE_ID.to_owned(),
            |chime| chime.current_ringtone_id().to_owned(),
        );

        debug!(chime = %self.chime_id, ringtone = %ringtone, "chime play button pressed");

        match self.dispatch(&ringtone).await {
            Ok(()) => {
                info!(chime = %self.chime_id, ringtone = %ringtone, "chime play requested");
            }
            Err(err) => {
                error!(chime = %self.chime_id, error = %err, "chime play failed");
            }
        }
    }

    async fn dispatch(&self, ringtone_id: &str) -> Result<(), CoreError> {
        let protect = self
            .coordinator
            .protect()
            .ok_or(CoreError::ProtectNotConfigured)?;
        protect
            .play_chime(&self.chime_id, Some(ringtone_id))
            .await?;
        Ok(())
    }
}
