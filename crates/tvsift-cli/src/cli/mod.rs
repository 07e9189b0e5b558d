//! CLI for tvsift.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tvsift_core::config::{self, SiftConfig};

use commands::{run_check, run_completions, run_manpage, run_parse, run_sift};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tvsift")]
#[command(about = "tvsift: validate IPTV playlists and keep only fast, live streams", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/tvsift/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every configured source, validate its links and write the cleaned playlist (default).
    Run {
        /// Output playlist (overrides `output_path` from the config).
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Validate a single link and print the verdict.
    Check {
        /// Stream URL to validate.
        url: String,
        /// Header directive line, e.g. '#EXTVLCOPT:http-user-agent=Foo'.
        #[arg(long, value_name = "LINE")]
        directive: Option<String>,
    },

    /// Parse a local playlist and list the links that would be validated (no network).
    Parse {
        /// Path to the playlist file.
        path: PathBuf,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) to stdout.
    Manpage,
}

fn load_config(path: Option<&PathBuf>) -> Result<SiftConfig> {
    let cfg = match path {
        Some(p) => config::load_from_path(p)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let command = cli.command.unwrap_or(CliCommand::Run { output: None });

        match command {
            CliCommand::Completions { shell } => run_completions(shell, &mut Cli::command()),
            CliCommand::Manpage => run_manpage(Cli::command())?,
            CliCommand::Run { output } => {
                let mut cfg = load_config(cli.config.as_ref())?;
                if let Some(output) = output {
                    cfg.output_path = output;
                }
                run_sift(cfg).await?;
            }
            CliCommand::Check { url, directive } => {
                let cfg = load_config(cli.config.as_ref())?;
                run_check(&cfg, &url, directive.as_deref()).await?;
            }
            CliCommand::Parse { path } => {
                let cfg = load_config(cli.config.as_ref())?;
                run_parse(&cfg, &path)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
