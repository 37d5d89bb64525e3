//! Common logging initializer
//!
//! Filters come from `RUST_LOG` when set, otherwise from the level given by the caller.
//!

use eyre::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_tree::HierarchicalLayer;

/// Map the usual `-v` count into a default filter level.
///
pub fn verbosity(debug: bool, verbose: u8) -> &'static str {
    match (debug, verbose) {
        (true, _) => "debug",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    }
}

pub fn init_logging(
    name: &'static str,
    level: &str,
    use_tree: bool,
    use_file: Option<String>,
) -> Result<()> {
    // Load filters from environment
    //
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Do we want hierarchical output?
    //
    let (tree, flat) = if use_tree {
        let tree = HierarchicalLayer::new(2)
            .with_ansi(true)
            .with_span_retrace(true)
            .with_span_modes(true)
            .with_targets(true)
            .with_verbose_entry(true)
            .with_verbose_exit(true)
            .with_bracketed_fields(true)
            .with_writer(std::io::stderr);
        (Some(tree), None)
    } else {
        let flat = fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact();
        (None, Some(flat))
    };

    // Log to file?
    //
    let file = use_file.map(|dir| {
        // Basic append-only rolling file for all traces.
        //
        let file_appender = tracing_appender::rolling::hourly(dir, name);
        fmt::layer().with_ansi(false).with_writer(file_appender)
    });

    // Combine filters & exporters
    //
    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(flat)
        .with(file)
        .try_init()?;

    Ok(())
}
