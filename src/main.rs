use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rocks_lang::rocks;

/// A tree-walk interpreter for the Rocks language.
#[derive(Parser, Debug)]
#[command(name = "rocks", version, about)]
struct Args {
    /// Script to run. Omit to start an interactive REPL.
    script: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv). Overridden by RUST_LOG if set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    let mut stdout = io::stdout();
    let mut rocks = rocks::new(&mut stdout);

    match args.script {
        Some(script) => rocks.run_file(script),
        None => rocks.run_prompt(),
    };
}
