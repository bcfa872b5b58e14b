//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};

use unipress_config::Profile;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn empty_profile() -> Profile {
    Profile {
        controller: String::new(),
        api_key: None,
        api_key_env: None,
        ca_cert: None,
        insecure: None,
        timeout: None,
        protect: None,
    }
}

fn list_available(profiles: &std::collections::HashMap<String, Profile>) -> String {
    if profiles.is_empty() {
        "(none)".into()
    } else {
        profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = unipress_config::config_path();
            eprintln!("✨ unipress — configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Console URL
            let controller: String = Input::new()
                .with_prompt("Console URL")
                .default("https://192.168.1.1".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 3. API key
            let key = rpassword::prompt_password("API key: ").map_err(prompt_err)?;

            if key.is_empty() {
                return Err(CliError::Validation {
                    field: "api_key".into(),
                    reason: "API key cannot be empty".into(),
                });
            }

            // Offer keyring storage
            let store_choices = &[
                "Store in system keyring (recommended)",
                "Save to config file (plaintext)",
            ];
            let store_selection = Select::new()
                .with_prompt("Where to store the API key?")
                .items(store_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let api_key_field = if store_selection == 0 {
                let entry = keyring::Entry::new("unipress", &format!("{profile_name}/api-key"))
                    .map_err(|e| CliError::Validation {
                        field: "keyring".into(),
                        reason: format!("failed to access keyring: {e}"),
                    })?;
                entry.set_password(&key).map_err(|e| CliError::Validation {
                    field: "keyring".into(),
                    reason: format!("failed to store API key in keyring: {e}"),
                })?;
                eprintln!("   ✓ API key stored in system keyring");
                None // Don't write to config file
            } else {
                Some(key) // Save plaintext in config
            };

            // 4. TLS: local consoles usually run self-signed certs
            let insecure = Confirm::new()
                .with_prompt("Accept self-signed TLS certificates?")
                .default(true)
                .interact()
                .map_err(prompt_err)?;

            // 5. Protect probe
            let protect = Confirm::new()
                .with_prompt("Probe the Protect application (cameras, chimes)?")
                .default(true)
                .interact()
                .map_err(prompt_err)?;

            // 6. Merge into existing config and write
            let profile = Profile {
                controller,
                api_key: api_key_field,
                api_key_env: None,
                ca_cert: None,
                insecure: Some(insecure),
                timeout: None,
                protect: Some(protect),
            };

            let mut cfg = unipress_config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            unipress_config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: unipress info");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = unipress_config::load_config_or_default();
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| format!("{c:#?}"),
                |_| "config".into(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = unipress_config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg
                .profiles
                .entry(profile_name.clone())
                .or_insert_with(empty_profile);

            match key.as_str() {
                "controller" => profile.controller = value,
                "api_key" | "api-key" => profile.api_key = Some(value),
                "api_key_env" | "api-key-env" => profile.api_key_env = Some(value),
                "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
                "insecure" => {
                    profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                        field: "insecure".into(),
                        reason: "must be 'true' or 'false'".into(),
                    })?);
                }
                "timeout" => {
                    profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                        field: "timeout".into(),
                        reason: "must be a number (seconds)".into(),
                    })?);
                }
                "protect" => {
                    profile.protect = Some(value.parse().map_err(|_| CliError::Validation {
                        field: "protect".into(),
                        reason: "must be 'true' or 'false'".into(),
                    })?);
                }
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown config key '{other}'. Valid keys: controller, api_key, \
                             api_key_env, ca_cert, insecure, timeout, protect"
                        ),
                    });
                }
            }

            unipress_config::save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = unipress_config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: unipress config init");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = unipress_config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    name,
                    available: list_available(&cfg.profiles),
                });
            }

            cfg.default_profile = Some(name.clone());
            unipress_config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetKey ──────────────────────────────────────────────────
        ConfigCommand::SetKey { profile } => {
            let cfg = unipress_config::load_config_or_default();
            let profile_name =
                profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: list_available(&cfg.profiles),
                });
            }

            let secret = rpassword::prompt_password("API key: ").map_err(prompt_err)?;

            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "api_key".into(),
                    reason: "API key cannot be empty".into(),
                });
            }

            let entry = keyring::Entry::new("unipress", &format!("{profile_name}/api-key"))
                .map_err(|e| CliError::Validation {
                    field: "keyring".into(),
                    reason: format!("failed to access keyring: {e}"),
                })?;
            entry
                .set_password(&secret)
                .map_err(|e| CliError::Validation {
                    field: "keyring".into(),
                    reason: format!("failed to store API key in keyring: {e}"),
                })?;

            eprintln!("✓ API key stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}
