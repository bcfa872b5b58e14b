//! Targets command handler: enumerate pressable actions.

use serde::Serialize;
use tabled::Tabled;

use unipress_core::{Button, ControllerConfig, Coordinator, build_buttons};

use crate::cli::{GlobalOpts, TargetsArgs};
use crate::error::CliError;
use crate::output;

// ── Rows ────────────────────────────────────────────────────────────

/// One pressable target, detached from the coordinator for rendering.
#[derive(Serialize)]
struct Target {
    unique_id: String,
    kind: String,
    name: String,
    site: Option<String>,
    available: bool,
}

impl Target {
    fn from_button(button: &Button) -> Self {
        Self {
            unique_id: button.unique_id().to_owned(),
            kind: button.kind().to_string(),
            name: button.name(),
            site: button.site_id().map(str::to_owned),
            available: button.available(),
        }
    }
}

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "Unique ID")]
    unique_id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Available")]
    available: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    config: ControllerConfig,
    args: TargetsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut targets = Coordinator::oneshot(config, |coordinator| async move {
        Ok(build_buttons(&coordinator)
            .iter()
            .map(Target::from_button)
            .collect::<Vec<_>>())
    })
    .await?;

    if let Some(ref site) = args.site {
        targets.retain(|t| t.site.as_deref() == Some(site.as_str()));
    }
    if args.available {
        targets.retain(|t| t.available);
    }
    // Enumeration order is unspecified; sort for stable output.
    targets.sort_by(|a, b| a.unique_id.cmp(&b.unique_id));

    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        &targets,
        |t| TargetRow {
            unique_id: t.unique_id.clone(),
            kind: t.kind.clone(),
            name: t.name.clone(),
            site: t.site.clone().unwrap_or_default(),
            available: output::availability_cell(t.available, color),
        },
        |t| t.unique_id.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
