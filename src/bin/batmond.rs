//! batmond - batman-adv originator telemetry daemon.
//!
//! Periodically samples the mesh originator table (`batctl o`) and
//! dispatches per-node freshness, quality, and next-hop stability metrics
//! to stdout or a file, in collectd text protocol or JSON-lines format.

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use batmon::collector::{BatctlCommand, OriginatorCollector, PassStats};
use batmon::sink::{JsonSink, MetricSink, PutvalSink};

/// Output format for dispatched samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// collectd exec-plugin text protocol.
    Putval,
    /// One JSON object per sample.
    Jsonl,
}

/// Mesh originator telemetry daemon.
#[derive(Parser)]
#[command(
    name = "batmond",
    about = "batman-adv originator telemetry daemon",
    version
)]
struct Args {
    /// Sampling interval in seconds.
    #[arg(short, long, default_value = "10")]
    interval: u64,

    /// Neighbor-table query command (program plus arguments, no shell).
    #[arg(long, default_value = BatctlCommand::DEFAULT)]
    command: String,

    /// Sample output format.
    #[arg(long, value_enum, default_value_t = Format::Putval)]
    format: Format,

    /// Append samples to this file instead of stdout.
    #[arg(short, long)]
    output: Option<String>,

    /// Host identifier used in value-list names.
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
///
/// Logs go to stderr: stdout is reserved for the sample stream.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("batmond={}", level).parse().unwrap())
        .add_directive(format!("batmon={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Describes the contents of a pass for logging.
fn describe_stats(stats: &PassStats) -> String {
    let mut parts = vec![format!("{} originators", stats.originators)];
    if stats.new > 0 {
        parts.push(format!("{} new", stats.new));
    }
    if stats.changed > 0 {
        parts.push(format!("{} hop changes", stats.changed));
    }
    if stats.untracked > 0 {
        parts.push(format!("{} untracked", stats.untracked));
    }
    parts.join(", ")
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    info!("batmond {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}s, command='{}', format={:?}, host={}",
        args.interval, args.command, args.format, args.host
    );

    let source = match BatctlCommand::from_command_line(&args.command) {
        Ok(source) => source,
        Err(e) => {
            error!("Invalid query command '{}': {}", args.command, e);
            std::process::exit(1);
        }
    };
    let mut collector = OriginatorCollector::new(source);

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                info!("Appending samples to {}", path);
                Box::new(file)
            }
            Err(e) => {
                error!("Cannot open output file {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Box::new(io::stdout()),
    };
    let mut sink: Box<dyn MetricSink> = match args.format {
        Format::Putval => Box::new(PutvalSink::new(writer, args.host.as_str(), args.interval)),
        Format::Jsonl => Box::new(JsonSink::new(writer)),
    };

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let interval = Duration::from_secs(args.interval);
    let mut pass_count: u64 = 0;

    info!("Starting sampling loop");

    while running.load(Ordering::SeqCst) {
        match collector.collect_pass(sink.as_mut()) {
            Ok(stats) => {
                pass_count += 1;
                info!(
                    "Pass #{}: {} ({} tracked total)",
                    pass_count,
                    describe_stats(&stats),
                    collector.tracked_nodes()
                );
            }
            Err(e) => {
                warn!("Sampling pass failed: {}", e);
            }
        }

        // Sleep with periodic checks for shutdown signal
        let sleep_interval = Duration::from_millis(100);
        let mut remaining = interval;
        while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
            let sleep_time = remaining.min(sleep_interval);
            std::thread::sleep(sleep_time);
            remaining = remaining.saturating_sub(sleep_time);
        }
    }

    info!("Shutdown complete");
}
