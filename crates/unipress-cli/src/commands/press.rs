//! Press command handler: find a target by unique id and press it.

use tracing::debug;

use unipress_core::{ControllerConfig, Coordinator, CoreError, build_buttons};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub async fn handle(
    config: ControllerConfig,
    unique_id: String,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let target = unique_id.clone();

    let name = Coordinator::oneshot(config, |coordinator| async move {
        let buttons = build_buttons(&coordinator);
        let Some(button) = buttons.iter().find(|b| b.unique_id() == unique_id) else {
            return Err(CoreError::NotFound {
                entity_type: "button".into(),
                identifier: unique_id,
            });
        };

        if !button.available() {
            debug!(button = %button.unique_id(), "pressing a currently unavailable target");
        }
        button.press().await;
        Ok(button.name())
    })
    .await?;

    if !global.quiet {
        eprintln!("Pressed '{name}' ({target})");
    }
    Ok(())
}
