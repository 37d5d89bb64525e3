//! This is the module handling the `fetch` sub-command.
//!

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use eyre::Result;
use tracing::{info, trace};

use fr24_common::{DateWindow, DATE_FMT};
use fr24_sources::{
    write_positions, write_tagged, Fr24, HttpTransport, Sleeper, TaggedPosition, ThreadSleeper,
    Transport,
};

use crate::{Config, FetchOpts, RunMode, Status};

/// Timestamp part of the output file names
const STAMP_FMT: &str = "%Y%m%d-%H%M%S";

/// Everything a run needs, configuration merged with the command line.
///
#[derive(Debug, PartialEq)]
pub struct Run {
    pub aircraft: Vec<String>,
    pub window: DateWindow,
    pub mode: RunMode,
    pub output: PathBuf,
    pub aggregate: bool,
}

impl Run {
    /// Command-line values win over the configuration file.
    ///
    #[tracing::instrument(skip(cfg))]
    pub fn new(cfg: &Config, fopts: &FetchOpts) -> Result<Self> {
        let aircraft = if fopts.aircraft.is_empty() {
            cfg.aircraft.clone()
        } else {
            fopts.aircraft.clone()
        };
        let aircraft = aircraft
            .iter()
            .map(|r| check_registration(r))
            .collect::<Result<Vec<_>, _>>()?;
        if aircraft.is_empty() {
            return Err(Status::NoAircraft.into());
        }

        let from = fopts.begin.as_ref().or(cfg.date_from.as_ref());
        let to = fopts.end.as_ref().or(cfg.date_to.as_ref());
        let window = match (from, to) {
            (Some(from), Some(to)) => DateWindow::parse(from, to)?,
            _ => return Err(Status::MissingDates.into()),
        };

        let run = Run {
            aircraft,
            window,
            mode: fopts.mode.unwrap_or(cfg.mode),
            output: fopts.output.clone().unwrap_or_else(|| cfg.output.clone()),
            aggregate: fopts.aggregate || cfg.aggregate,
        };
        trace!("run={run:?}");
        Ok(run)
    }

    /// Fetch every aircraft and write the file(s), returns the list of files written.
    ///
    #[tracing::instrument(skip(self, fr))]
    pub fn execute<T: Transport, S: Sleeper>(
        &self,
        fr: &Fr24<T, S>,
        stamp: DateTime<Utc>,
    ) -> Result<Vec<PathBuf>> {
        let mut files = vec![];

        if self.aggregate {
            let mut all = vec![];
            for reg in &self.aircraft {
                println!("Fetching {} for {}", reg, self.window);
                let points = fr.fetch_aircraft(reg, &self.window)?;
                all.extend(points.into_iter().map(|p| TaggedPosition::new(reg, p)));
            }

            let path = output_name(&self.output, &stamp, "all", &self.window);
            let n = write_tagged(&path, all)?;
            println!("{} positions written to {}", n, path.display());
            files.push(path);
        } else {
            for reg in &self.aircraft {
                println!("Fetching {} for {}", reg, self.window);
                let points = fr.fetch_aircraft(reg, &self.window)?;

                let path = output_name(&self.output, &stamp, reg, &self.window);
                let n = write_positions(&path, points)?;
                println!("{} positions written to {}", n, path.display());
                files.push(path);
            }
        }
        Ok(files)
    }
}

/// Trim and check a registration, only `[A-Za-z0-9-]` is allowed.
///
fn check_registration(reg: &str) -> Result<String, Status> {
    let reg = reg.trim();
    if reg.is_empty() || !reg.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(Status::BadRegistration(reg.to_string()));
    }
    Ok(reg.to_string())
}

/// `{stamp}_{who}_{from}_{to}.csv` inside `dir`.
///
pub fn output_name(dir: &Path, stamp: &DateTime<Utc>, who: &str, window: &DateWindow) -> PathBuf {
    let who: String = who
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    let fname = format!(
        "{}_{}_{}_{}.csv",
        stamp.format(STAMP_FMT),
        who,
        window.from.format(DATE_FMT),
        window.to.format(DATE_FMT)
    );
    dir.join(fname)
}

/// Actual fetching of data from the API
///
#[tracing::instrument(skip(cfg))]
pub fn fetch_tracks(cfg: &Config, fopts: &FetchOpts) -> Result<Vec<PathBuf>> {
    let run = Run::new(cfg, fopts)?;

    // Fail before any network call if we have no credential
    //
    let token = run.mode.token()?;
    info!("Using {} credentials", run.mode);

    let transport = HttpTransport::new(&token, Duration::from_secs(cfg.api.timeout))?;
    let fr = Fr24::new(&cfg.api, cfg.filter, transport, ThreadSleeper);

    run.execute(&fr, Utc::now())
}
