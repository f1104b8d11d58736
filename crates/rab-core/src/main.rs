//! reportabug - collect redacted diagnostics for bug reports.
//!
//! Collects runtime, platform, environment, and library information,
//! censors the username and hostname, and writes a report to stdout.

use clap::Parser;
use rab_common::{OutputFormat, SystemEnv};
use rab_core::logging::{init_logging, LogFormat};

/// Generate useful, redacted information to include when reporting a
/// bug in a library.
#[derive(Parser)]
#[command(name = "reportabug")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Library names to probe
    libraries: Vec<String>,

    /// Output format
    #[arg(long, short = 'f', default_value = "md")]
    format: OutputFormat,

    /// Extra argument passed to each library's introspection hook
    #[arg(long)]
    extra: Option<String>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet, LogFormat::from_env());

    let env = SystemEnv::new();
    let mut stdout = std::io::stdout().lock();
    if let Err(err) = rab_core::run(
        &env,
        &cli.libraries,
        cli.extra.as_deref(),
        cli.format,
        &mut stdout,
    ) {
        eprintln!("reportabug: {err}");
        std::process::exit(err.exit_code());
    }
}
