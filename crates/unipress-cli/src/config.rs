//! Profile resolution: config file + CLI flags -> `ControllerConfig`.
//!
//! The TOML schema and the file-side credential chain live in
//! `unipress-config`; this module adds the CLI-flag layer on top. Core
//! never sees either -- it receives a pre-built `ControllerConfig`.

use std::time::Duration;

use secrecy::SecretString;

use unipress_config::{Config, Profile};
use unipress_core::{ControllerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Request timeout applied when neither the flag nor the profile sets one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate a `Profile` + global flags into a `ControllerConfig`.
///
/// This is the single boundary where file config crosses into core types.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<ControllerConfig, CliError> {
    // 1. Console URL (flag > env > profile)
    let url_str = global.controller.as_deref().unwrap_or(&profile.controller);
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. API key
    let api_key = resolve_api_key(profile, profile_name, global)?;

    // 3. TLS verification
    let tls = if global.insecure || profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    // 4. Protect probe (flag > profile > on)
    let protect_enabled = global.protect_override().or(profile.protect).unwrap_or(true);

    // 5. Timeout (flag > profile > default)
    let timeout_secs = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(ControllerConfig {
        url,
        api_key,
        tls,
        timeout: Duration::from_secs(timeout_secs),
        // The CLI runs one-shot; no background refresh.
        refresh_interval_secs: 0,
        protect_enabled,
    })
}

/// Resolve an API key: CLI flag first, then the file-side chain
/// (profile env var, keyring, plaintext).
fn resolve_api_key(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref key) = global.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Ok(unipress_config::resolve_api_key(profile, profile_name)?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::{ColorMode, OutputFormat};

    fn bare_profile(controller: &str) -> Profile {
        Profile {
            controller: controller.into(),
            api_key: Some("file-key".into()),
            api_key_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            protect: None,
        }
    }

    fn bare_global() -> GlobalOpts {
        GlobalOpts {
            profile: None,
            controller: None,
            api_key: None,
            output: OutputFormat::Table,
            color: ColorMode::Auto,
            verbose: 0,
            quiet: false,
            insecure: false,
            timeout: None,
            protect: false,
            no_protect: false,
        }
    }

    #[test]
    fn profile_timeout_applies_when_flag_absent() {
        let mut profile = bare_profile("https://unifi.local");
        profile.timeout = Some(90);

        let config =
            resolve_profile(&profile, "default", &bare_global()).expect("valid profile");
        assert_eq!(config.timeout, Duration::from_secs(90));
    }

    #[test]
    fn timeout_flag_beats_the_profile() {
        let mut profile = bare_profile("https://unifi.local");
        profile.timeout = Some(90);

        let mut global = bare_global();
        global.timeout = Some(5);

        let config = resolve_profile(&profile, "default", &global).expect("valid profile");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn timeout_defaults_when_neither_is_set() {
        let profile = bare_profile("https://unifi.local");

        let config =
            resolve_profile(&profile, "default", &bare_global()).expect("valid profile");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn invalid_controller_url_is_a_validation_error() {
        let profile = bare_profile("not a url");

        match resolve_profile(&profile, "default", &bare_global()) {
            Err(CliError::Validation { field, .. }) => assert_eq!(field, "controller"),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }

    #[test]
    fn tls_mapping_follows_profile_and_flags() {
        let mut profile = bare_profile("https://unifi.local");

        profile.insecure = Some(true);
        let config = resolve_profile(&profile, "default", &bare_global()).expect("valid profile");
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);

        profile.insecure = Some(false);
        profile.ca_cert = Some(PathBuf::from("/etc/ssl/unifi.pem"));
        let config = resolve_profile(&profile, "default", &bare_global()).expect("valid profile");
        assert_eq!(
            config.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/ssl/unifi.pem"))
        );

        profile.ca_cert = None;
        let config = resolve_profile(&profile, "default", &bare_global()).expect("valid profile");
        assert_eq!(config.tls, TlsVerification::SystemDefaults);

        // The -k flag wins over everything in the profile.
        let mut global = bare_global();
        global.insecure = true;
        profile.ca_cert = Some(PathBuf::from("/etc/ssl/unifi.pem"));
        let config = resolve_profile(&profile, "default", &global).expect("valid profile");
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn protect_defaults_on_and_respects_overrides() {
        let mut profile = bare_profile("https://unifi.local");

        let config = resolve_profile(&profile, "default", &bare_global()).expect("valid profile");
        assert!(config.protect_enabled);

        profile.protect = Some(false);
        let config = resolve_profile(&profile, "default", &bare_global()).expect("valid profile");
        assert!(!config.protect_enabled);

        let mut global = bare_global();
        global.protect = true;
        let config = resolve_profile(&profile, "default", &global).expect("valid profile");
        assert!(config.protect_enabled);
    }
}
