//! `owlet config` subcommands: init, show, path.

use std::fs;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, KEYRING_SERVICE};
use crate::error::CliError;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
        ConfigCommand::Show => show(),
        ConfigCommand::Init => init(global),
    }
}

fn show() -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    if cfg.password.is_some() {
        cfg.password = Some("[REDACTED]".into());
    }

    let rendered = toml::to_string_pretty(&cfg).expect("config serializes");
    print!("{rendered}");
    Ok(())
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let email = match global.email {
        Some(ref e) => e.clone(),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Owlet account email")
            .interact_text()
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
    };

    let password = rpassword::prompt_password("Owlet account password: ")?;

    // Prefer the system keyring; fall back to plaintext in the file with
    // a warning when no keyring backend is available.
    let keyring_ok = keyring::Entry::new(KEYRING_SERVICE, &email)
        .and_then(|entry| entry.set_password(&password))
        .map_err(|err| {
            eprintln!(
                "warning: could not store the password in the system keyring ({err}); \
                 storing it in the config file instead"
            );
        })
        .is_ok();

    let cfg = Config {
        email: Some(email),
        password: (!keyring_ok).then_some(password),
    };

    let path = config::config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, toml::to_string_pretty(&cfg).expect("config serializes"))?;

    println!("Configuration written to {}", path.display());
    Ok(())
}
