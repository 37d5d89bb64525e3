//! `list` sub-command, display what `fetch` would use.
//!

use eyre::Result;
use tabled::{builder::Builder, settings::Style};
use tracing::trace;

use crate::Config;

/// Format the configuration as a table.
///
#[tracing::instrument(skip(cfg))]
pub fn list_config(cfg: &Config) -> Result<String> {
    trace!("enter");

    let unset = "-".to_string();
    let window = format!(
        "{} .. {}",
        cfg.date_from.as_ref().unwrap_or(&unset),
        cfg.date_to.as_ref().unwrap_or(&unset)
    );
    let retries = match cfg.api.max_retries {
        0 => "unlimited".to_string(),
        n => n.to_string(),
    };

    let mut builder = Builder::default();
    builder.push_record(["Parameter", "Value"]);
    builder.push_record(["Mode".to_string(), format!("{} (${})", cfg.mode, cfg.mode.token_var())]);
    builder.push_record(["Aircraft".to_string(), cfg.aircraft.join(", ")]);
    builder.push_record(["Dates".to_string(), window]);
    builder.push_record(["Output".to_string(), cfg.output.display().to_string()]);
    builder.push_record(["Aggregate".to_string(), cfg.aggregate.to_string()]);
    builder.push_record(["API".to_string(), cfg.api.base_url.clone()]);
    builder.push_record([
        "Retry on 429".to_string(),
        format!("{}s, {}", cfg.api.retry_delay, retries),
    ]);
    builder.push_record(["Pause".to_string(), format!("{}s", cfg.api.pause)]);
    builder.push_record([
        "Airborne".to_string(),
        format!(
            "alt >= {} ft, speed >= {} kt",
            cfg.filter.min_altitude, cfg.filter.min_speed
        ),
    ]);

    let allf = builder.build().with(Style::modern()).to_string();
    Ok(format!("Current configuration:\n{allf}"))
}
