use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "threadharvest")]
#[command(about = "Collect deduplicated participant records from a comment thread")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the harvest pipeline against a thread URL
    Run(RunArgs),
    /// Print the effective configuration and exit
    PrintConfig {
        /// Optional configuration file to merge before printing
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, clap::Args)]
pub struct RunArgs {
    /// URL of the post whose comment thread should be harvested
    pub url: String,

    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// DevTools websocket of an already-running browser; launches one when absent
    #[arg(long)]
    pub ws_url: Option<String>,

    /// Launch the browser with a visible window
    #[arg(long)]
    pub headed: bool,

    /// Override the incremental-load iteration cap
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Write records to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output format for the harvested records
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_shape_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn run_parses_url_and_overrides() {
        let cli = Cli::parse_from([
            "threadharvest",
            "-v",
            "run",
            "https://example.com/post/1",
            "--ws-url",
            "ws://127.0.0.1:9222/devtools/browser/abc",
            "--max-iterations",
            "10",
            "--format",
            "csv",
        ]);
        assert_eq!(cli.verbose, 1);
        let Command::Run(args) = cli.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(args.url, "https://example.com/post/1");
        assert_eq!(args.max_iterations, Some(10));
        assert!(args.ws_url.is_some());
        assert!(matches!(args.format, OutputFormat::Csv));
    }
}
