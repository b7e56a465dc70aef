//! CLI command definitions and dispatch.

mod auth;
mod board;
mod comps;
mod names;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use roster_board::Board;

use crate::client::ApiClient;
use crate::config::{Config, Credentials};
use crate::error::CliError;
use crate::output::OutputFormat;

/// roster - view and rearrange the shared pairing board.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Skip confirmation prompts.
    #[arg(long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Authenticate with the board server.
    #[command(subcommand)]
    Auth(auth::AuthCommand),

    /// Show the board, the pools, or the master lists.
    #[command(subcommand)]
    Board(board::BoardCommand),

    /// Move a person or family between the pool and companionships.
    Move(board::MoveArgs),

    /// Manage companionships.
    #[command(subcommand)]
    Comps(comps::CompsCommand),

    /// Manage the master name lists.
    #[command(subcommand)]
    Names(names::NamesCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let format = match self.format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        };

        let ctx = CommandContext {
            config: Config::load()?,
            credentials: Credentials::load()?,
            format,
            assume_yes: self.yes,
        };

        match self.command {
            Commands::Auth(cmd) => cmd.run(&ctx).await,
            Commands::Board(cmd) => cmd.run(&ctx).await,
            Commands::Move(args) => args.run(&ctx).await,
            Commands::Comps(cmd) => cmd.run(&ctx).await,
            Commands::Names(cmd) => cmd.run(&ctx).await,
        }
    }
}

/// Shared context for command execution.
pub struct CommandContext {
    pub config: Config,
    pub credentials: Option<Credentials>,
    pub format: OutputFormat,
    pub assume_yes: bool,
}

impl CommandContext {
    /// Create an API client, requiring a cached PIN.
    pub fn client(&self) -> Result<ApiClient> {
        let creds = self.credentials.as_ref().ok_or(CliError::NotAuthenticated)?;
        ApiClient::new(&self.config, Some(creds))
    }

    /// Fetch the document and build a working board from it.
    pub async fn load_board(&self) -> Result<(ApiClient, Board)> {
        let client = self.client()?;
        let doc = client.fetch_document().await?;
        Ok((client, Board::from_document(doc)))
    }

    /// Push the board back to the server.
    ///
    /// A failed save is reported but not fatal: the server still holds the
    /// previous snapshot and the command's local result was already shown.
    pub async fn save_board(&self, client: &ApiClient, board: &Board) -> Result<()> {
        match client.push_document(&board.to_document()).await {
            Ok(()) => {
                println!("{}", "Saved!".green());
                Ok(())
            }
            Err(CliError::NotAuthenticated) => Err(CliError::NotAuthenticated.into()),
            Err(e) => {
                eprintln!("{} save failed: {}", "Warning:".yellow().bold(), e);
                Ok(())
            }
        }
    }

    /// Ask the user for confirmation unless `--yes` was passed.
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        print!("{} [y/N] ", prompt);
        use std::io::Write;
        std::io::stdout().flush()?;

        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;

        Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
    }
}
