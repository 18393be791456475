//! Command dispatch and session bootstrap.

pub mod base_station;
pub mod config_cmd;
pub mod devices;
pub mod status;

use owlet_api::Session;

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Resolve credentials, build the session config, and log in.
pub async fn connect(global: &GlobalOpts) -> Result<Session, CliError> {
    let file = config::load_config_or_default();
    let (email, password) = config::resolve_credentials(global, &file)?;
    let session_config = config::build_session_config(global)?;

    tracing::debug!(%email, "connecting to the Owlet cloud");

    Session::connect(session_config, &email, &password)
        .await
        .map_err(|err| match err {
            owlet_api::Error::Transport(e) => CliError::from_transport(e, global.timeout),
            other => other.into(),
        })
}

/// Dispatch a data command against a live session.
pub async fn dispatch(
    command: Command,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Devices => devices::handle(session, global).await,
        Command::Status(args) => status::handle(session, &args, global).await,
        Command::BaseStation(args) => base_station::handle(session, &args, global).await,
        Command::Config(_) | Command::Completions(_) => {
            unreachable!("handled in main before a session is established")
        }
    }
}
