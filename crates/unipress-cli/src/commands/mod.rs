//! Command dispatch: bridges CLI args -> coordinator work -> output formatting.

pub mod config_cmd;
pub mod info;
pub mod press;
pub mod targets;

use unipress_core::ControllerConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a console-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    config: ControllerConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Info => info::handle(config, global).await,
        Command::Targets(args) => targets::handle(config, args, global).await,
        Command::Press { unique_id } => press::handle(config, unique_id, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
