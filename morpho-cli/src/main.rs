//! morpho command-line entry point

use clap::Parser;
use morpho_cli::commands::Commands;

/// English morphological analysis from the command line
#[derive(Debug, Parser)]
#[command(name = "morpho", version, about, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli.command.execute() {
        // Hard failures report as a JSON object on stderr so scripted
        // callers can parse them the same way as regular output.
        let report = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{report}");
        std::process::exit(1);
    }
}
