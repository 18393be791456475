//! CLI-owned configuration: TOML file, env overrides, and the credential
//! resolution chain. The library never sees these types -- it receives a
//! pre-built `SessionConfig`.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use owlet_api::{SessionConfig, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Keyring service name for stored passwords.
pub const KEYRING_SERVICE: &str = "owlet-cli";

// ── TOML config struct ───────────────────────────────────────────────

/// CLI-owned TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Owlet account email.
    pub email: Option<String>,

    /// Account password (plaintext -- prefer the keyring or OWLET_PASSWORD).
    pub password: Option<String>,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "owlet-cli", "owlet-cli")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("owlet-cli");
            p.push("config.toml");
            p
        })
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("OWLET_").only(&["email", "password"]));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or is broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Session config ───────────────────────────────────────────────────

/// Build the library `SessionConfig` from global flags.
///
/// The endpoint overrides exist for driving the CLI against a mock cloud;
/// everything else keeps the library defaults.
pub fn build_session_config(global: &GlobalOpts) -> Result<SessionConfig, CliError> {
    let mut config = SessionConfig {
        transport: TransportConfig {
            timeout: Duration::from_secs(global.timeout),
        },
        ..SessionConfig::default()
    };

    if let Some(ref raw) = global.user_url {
        config.user_url = parse_url("user-url", raw)?;
    }
    if let Some(ref raw) = global.ads_url {
        config.ads_url = parse_url("ads-url", raw)?;
    }

    Ok(config)
}

fn parse_url(field: &str, raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })
}

// ── Credential resolution ────────────────────────────────────────────

/// Resolve email + password from the credential chain.
///
/// Email: `--email` / `OWLET_EMAIL` (clap) > config file.
/// Password: `OWLET_PASSWORD` > keyring > config plaintext > interactive
/// prompt (only when stderr is a terminal).
pub fn resolve_credentials(
    global: &GlobalOpts,
    config: &Config,
) -> Result<(String, SecretString), CliError> {
    let email = global
        .email
        .clone()
        .or_else(|| config.email.clone())
        .ok_or(CliError::NoCredentials)?;

    // 1. Environment
    if let Ok(pw) = std::env::var("OWLET_PASSWORD") {
        return Ok((email, SecretString::from(pw)));
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &email) {
        if let Ok(pw) = entry.get_password() {
            return Ok((email, SecretString::from(pw)));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = config.password {
        return Ok((email, SecretString::from(pw.clone())));
    }

    // 4. Interactive prompt
    if std::io::stderr().is_terminal() {
        let pw = rpassword::prompt_password(format!("Password for {email}: "))?;
        return Ok((email, SecretString::from(pw)));
    }

    Err(CliError::NoCredentials)
}
