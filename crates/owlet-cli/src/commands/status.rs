//! Sock status handler: fetches and renders one property snapshot.

use owo_colors::OwoColorize;

use owlet_api::{PropertySnapshot, Session};

use crate::cli::{GlobalOpts, StatusArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    session: &Session,
    args: &StatusArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let snapshot = session.get_properties(&args.dsn).await?;

    let color = output::should_color(&global.color);
    let dsn = args.dsn.clone();
    let rendered = output::render_single(
        &global.output,
        &snapshot,
        |s| detail(s, color),
        move |_| dsn.clone(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(s: &PropertySnapshot, color: bool) -> String {
    [
        format!("Baby:           {}", s.baby_name.as_deref().unwrap_or("-")),
        format!("Base station:   {}", fmt_flag(s.is_base_station_on)),
        format!(
            "Battery:        {}",
            s.battery_level
                .map_or_else(|| "-".into(), |v| format!("{v}%"))
        ),
        format!("Charging:       {}", fmt_flag(s.is_charging)),
        format!("Sock off:       {}", fmt_flag(s.is_sock_off)),
        format!("Sock connected: {}", fmt_flag(s.is_sock_connected)),
        format!("Movement:       {}", fmt_flag(s.is_wiggling)),
        format!(
            "Heart rate:     {}",
            s.heart_rate
                .map_or_else(|| "-".into(), |v| format!("{v} bpm"))
        ),
        format!("Oxygen:         {}", fmt_oxygen(s.oxygen_level, color)),
    ]
    .join("\n")
}

fn fmt_flag(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

/// Oxygen saturation, highlighted when below the vendor's alert range.
fn fmt_oxygen(level: Option<i64>, color: bool) -> String {
    match level {
        Some(v) if color && v < 94 => format!("{v}%").red().to_string(),
        Some(v) if color => format!("{v}%").green().to_string(),
        Some(v) => format!("{v}%"),
        None => "-".into(),
    }
}
