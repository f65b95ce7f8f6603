//! # Tide Predictor Entry Point
//!
//! Host-side harness around the library: reads the clock, asks the predictor
//! for the current height, and prints it. The chart and JSON modes show the
//! surrounding 24 hours.
//!
//! # Usage
//!
//! ```bash
//! tide-port-san-luis                                  # current height
//! tide-port-san-luis --stdout                         # ASCII chart
//! tide-port-san-luis --json                           # series as JSON
//! tide-port-san-luis --at "2024-07-04 12:00:00"       # station time, not UTC
//! tide-port-san-luis --config other-station.toml
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: warn)

use anyhow::{anyhow, bail, Context};
use chrono::{NaiveDateTime, Utc};
use std::env;
use tide_port_san_luis::config::{Config, DEFAULT_CONFIG_PATH};
use tide_port_san_luis::renderer::{draw_ascii, ChartOptions};
use tide_port_san_luis::{series, Accuracy, CalendarInstant};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// What to print.
#[derive(Debug, PartialEq)]
enum Mode {
    Height,
    Chart,
    Json,
}

#[derive(Debug)]
struct Args {
    mode: Mode,
    at: Option<CalendarInstant>,
    config_path: String,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> anyhow::Result<Args> {
    let mut parsed = Args {
        mode: Mode::Height,
        at: None,
        config_path: DEFAULT_CONFIG_PATH.to_string(),
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--stdout" => parsed.mode = Mode::Chart,
            "--json" => parsed.mode = Mode::Json,
            "--at" => {
                let value = args.next().ok_or_else(|| anyhow!("--at needs a value"))?;
                let naive = NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S")
                    .with_context(|| format!("--at {value:?} is not YYYY-MM-DD HH:MM:SS"))?;
                parsed.at = Some(naive.into());
            }
            "--config" => {
                parsed.config_path = args
                    .next()
                    .ok_or_else(|| anyhow!("--config needs a path"))?;
            }
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(parsed)
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::WARN),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(env::args().skip(1))?;
    let config = Config::load_from_path(&args.config_path);
    let predictor = config.predictor();
    let profile = predictor.profile();

    // The host clock is UTC; the predictor wants station time
    let now = args
        .at
        .unwrap_or_else(|| profile.time_reference.instant_from_utc(Utc::now()));
    info!("predicting for {} ({})", now, profile.time_reference.label());

    if let Accuracy::Degraded { days_from_epoch } = predictor.accuracy(&now) {
        warn!(
            "{} is {} days from the {} epoch; accuracy is degraded outside {}..{}",
            now,
            days_from_epoch,
            profile.name,
            predictor.valid_from(),
            predictor.valid_until()
        );
    }

    match args.mode {
        Mode::Height => {
            let height = predictor.predict_height(&now);
            println!(
                "{} {} {}: {:.2} {}",
                profile.name,
                now,
                profile.time_reference.label(),
                height,
                profile.unit
            );
        }
        Mode::Chart => {
            let series = series::around(
                &predictor,
                &now,
                config.display.time_window_hours,
                config.display.step_minutes,
            );
            draw_ascii(&series, &ChartOptions::from_config(&config, profile));
            for extremum in series::extrema(&series) {
                println!(
                    "{:?} {:+} min: {:.2} {}",
                    extremum.kind, extremum.mins_rel, extremum.height, profile.unit
                );
            }
        }
        Mode::Json => {
            let series = series::around(
                &predictor,
                &now,
                config.display.time_window_hours,
                config.display.step_minutes,
            );
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
    }

    Ok(())
}
