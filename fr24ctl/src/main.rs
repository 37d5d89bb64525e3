use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::{info, trace};

use fr24_common::{init_logging, verbosity, ConfigFile};
use fr24ctl::{fetch_tracks, list_config, Config, Opts, SubCommand};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    let level = verbosity(opts.debug, opts.verbose);
    init_logging(NAME, level, opts.tree, opts.log_dir.clone())?;

    // Banner
    //
    banner()?;

    // Exit if needed
    //
    if opts.version {
        return Ok(());
    }

    handle_subcmd(&opts)
}

pub fn handle_subcmd(opts: &Opts) -> Result<()> {
    match &opts.subcmd {
        // Handle `fetch`
        //
        SubCommand::Fetch(fopts) => {
            trace!("fetch");

            let cfg = load_config(opts)?;
            let files = fetch_tracks(&cfg, fopts)?;
            info!("{} file(s) written", files.len());
        }

        // Standalone `list` command
        //
        SubCommand::List => {
            info!("Listing configuration:");

            let cfg = load_config(opts)?;
            let str = list_config(&cfg)?;
            eprintln!("{}", str);
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("Modules: ");
            eprintln!("\t{}", fr24_common::version());
            eprintln!("\t{}", fr24_sources::version());
        }
    }
    Ok(())
}

/// Load the configuration file, given or default one.
///
fn load_config(opts: &Opts) -> Result<Config> {
    let cfg = ConfigFile::<Config>::load(opts.config.as_deref())?;
    info!("Loaded {:?}", cfg.path());
    Ok(cfg.into_inner())
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{} by {}
{}
"##,
        version(),
        AUTHORS,
        crate_description!()
    ))
}
