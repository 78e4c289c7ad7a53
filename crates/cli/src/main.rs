// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod script;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use script::{ScriptStep, parse_script};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tablehold::{BookingView, Controller};
use tablehold_api::{
    BookingBackend, BookingClient, DEFAULT_BASE_URL, FixtureBackend, HoldOutcome,
    HttpBookingBackend,
};
use tablehold_domain::{BookingConfig, RawAvailability, parse_date};
use time::{Date, OffsetDateTime};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_log::AsTrace;

/// Tablehold - replays a guest's reservation session and prints each view
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Establishment id used for availability and hold requests
    #[arg(short, long)]
    est: String,

    /// Guest language; defaults to the configured `usrLang`
    #[arg(short, long, default_value = "")]
    lng: String,

    /// Booking configuration snapshot (JSON). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serve availability from this payload file instead of the network
    #[arg(short, long)]
    payload: Option<PathBuf>,

    /// JSON array of guest steps to replay
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Base URL of the booking service
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// The session's notion of today (`YYYY-MM-DD`); defaults to the UTC date
    #[arg(long)]
    today: Option<String>,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    fn load_config(&self) -> Result<BookingConfig> {
        let Some(path) = &self.config else {
            return Ok(BookingConfig::default());
        };
        let body: String = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading configuration {}", path.display()))?;
        Ok(BookingConfig::from_json(&body)?.normalized())
    }

    fn today(&self) -> Result<Date> {
        match &self.today {
            Some(text) => Ok(parse_date(text)?),
            None => Ok(OffsetDateTime::now_utc().date()),
        }
    }

    fn load_script(&self, config: &BookingConfig) -> Result<Vec<ScriptStep>> {
        let Some(path) = &self.script else {
            return Ok(vec![ScriptStep::SetCovers {
                covers: config.party_min,
            }]);
        };
        let body: String = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading script {}", path.display()))?;
        parse_script(&body).wrap_err_with(|| format!("parsing script {}", path.display()))
    }
}

/// What one replayed step produced.
#[derive(Debug, Serialize)]
struct StepReport<'a> {
    index: usize,
    step: &'a ScriptStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hold: Option<HoldOutcome>,
    view: BookingView,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .init();

    let config: BookingConfig = args.load_config()?;
    let today: Date = args.today()?;
    let steps: Vec<ScriptStep> = args.load_script(&config)?;
    let controller: Controller = Controller::new(config, today);
    info!(est = %args.est, today = %today, steps = steps.len(), "Starting session");

    if let Some(path) = &args.payload {
        let body: String = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading payload {}", path.display()))?;
        let payload: RawAvailability = serde_json::from_str(&body)
            .wrap_err_with(|| format!("parsing payload {}", path.display()))?;
        let backend: Arc<FixtureBackend> = Arc::new(FixtureBackend::new(payload));
        replay(BookingClient::new(backend, controller, &args.est, &args.lng), &steps).await
    } else {
        let backend: Arc<HttpBookingBackend> =
            Arc::new(HttpBookingBackend::new(args.base_url.as_str()));
        replay(BookingClient::new(backend, controller, &args.est, &args.lng), &steps).await
    }
}

async fn replay<B: BookingBackend + 'static>(
    client: BookingClient<B>,
    steps: &[ScriptStep],
) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        let mut error: Option<String> = None;
        let mut hold: Option<HoldOutcome> = None;

        match step.command()? {
            Some(command) => {
                if let Err(e) = client.dispatch(command).await {
                    warn!(index, error = %e, "Step rejected");
                    error = Some(e.to_string());
                }
            }
            None => match client.submit_hold().await {
                Ok(outcome) => hold = Some(outcome),
                Err(e) => {
                    warn!(index, error = %e, "Hold not placed");
                    error = Some(e.to_string());
                }
            },
        }

        let report: StepReport<'_> = StepReport {
            index,
            step,
            error,
            hold,
            view: client.settle().await,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
