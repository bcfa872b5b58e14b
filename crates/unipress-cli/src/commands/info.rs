//! Info command handler: application versions over one round trip.

use serde::Serialize;

use unipress_core::{ControllerConfig, Coordinator, CoreError};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct InfoReport {
    console: String,
    network_version: String,
    /// `None` when Protect is disabled, absent, or unreachable.
    protect_version: Option<String>,
}

fn detail(report: &InfoReport) -> String {
    [
        format!("Console:  {}", report.console),
        format!("Network:  {}", report.network_version),
        format!(
            "Protect:  {}",
            report.protect_version.as_deref().unwrap_or("not present")
        ),
    ]
    .join("\n")
}

pub async fn handle(config: ControllerConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let coordinator = Coordinator::new(config)?;

    let info = coordinator
        .network()
        .get_info()
        .await
        .map_err(CoreError::from)?;

    let protect_version = match coordinator.protect() {
        Some(client) => match client.get_meta_info().await {
            Ok(meta) => meta.application_version,
            Err(err) => {
                tracing::debug!(error = %err, "protect meta probe failed");
                None
            }
        },
        None => None,
    };

    let report = InfoReport {
        console: coordinator.config().url.to_string(),
        network_version: info.application_version,
        protect_version,
    };

    let out = output::render_single(&global.output, &report, detail, |r| {
        r.network_version.clone()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
