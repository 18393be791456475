//! Base-station power toggle handler.

use owlet_api::Session;

use crate::cli::{BaseStationArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    session: &Session,
    args: &BaseStationArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let on = args.state.is_on();
    session.set_base_station(&args.dsn, on).await?;

    let verb = if on { "on" } else { "off" };
    output::print_output(
        &format!("Base station for {} turned {verb}", args.dsn),
        global.quiet,
    );
    Ok(())
}
