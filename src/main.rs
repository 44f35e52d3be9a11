mod cli;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

/// Detect Met-aromatic interactions, bridges, and aromatic chain relationships
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity of the program:
    /// one status line per structure by default, -v for debug, and -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find Met-aromatic interactions
    Interactions(cli::interactions::Args),
    /// Find methionines bridging several aromatic residues
    Bridges(cli::bridges::Args),
    /// Classify relationships between bridges and aromatic chains
    Networks(cli::networks::Args),
}

fn level_filter(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::WARN;
    }
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn main() {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(level_filter(args.verbose, args.quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match &args.command {
        Commands::Interactions(args) => cli::interactions::run(args),
        Commands::Bridges(args) => cli::bridges::run(args),
        Commands::Networks(args) => cli::networks::run(args),
    }
}
