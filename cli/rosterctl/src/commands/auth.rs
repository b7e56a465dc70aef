//! Authentication commands: login, logout, status.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use crate::client::ApiClient;
use crate::commands::CommandContext;
use crate::config::Credentials;
use crate::error::CliError;
use crate::output::print_success;

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Verify the shared PIN against the server and cache it.
    Login {
        /// Board PIN. Prompted for when omitted.
        #[arg(long, env = "ROSTER_PIN")]
        pin: Option<String>,
    },

    /// Forget the cached PIN.
    Logout,

    /// Show whether the cached PIN is still accepted.
    Status,
}

impl AuthCommand {
    pub async fn run(self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Login { pin } => login(ctx, pin).await,
            Self::Logout => logout(),
            Self::Status => status(ctx).await,
        }
    }
}

async fn login(ctx: &CommandContext, pin: Option<String>) -> Result<()> {
    let pin = match pin {
        Some(pin) => pin,
        None => prompt_pin()?,
    };

    if pin.trim().is_empty() {
        anyhow::bail!("PIN must not be empty");
    }

    let creds = Credentials::new(pin.trim().to_string());
    let client = ApiClient::new(&ctx.config, Some(&creds))?;

    // The server only answers /api/verify when the PIN matches.
    client.verify().await?;

    creds.save()?;
    print_success("PIN verified and cached.");

    Ok(())
}

fn logout() -> Result<()> {
    Credentials::delete()?;
    print_success("Cached PIN removed.");
    Ok(())
}

async fn status(ctx: &CommandContext) -> Result<()> {
    let Some(creds) = ctx.credentials.as_ref() else {
        println!("{}", "Not logged in.".yellow());
        return Ok(());
    };

    let client = ApiClient::new(&ctx.config, Some(creds))?;

    match client.verify().await {
        Ok(()) => {
            println!("{} {}", "Logged in to".green(), ctx.config.server_url());
            Ok(())
        }
        Err(CliError::NotAuthenticated) => {
            println!(
                "{}",
                "Cached PIN was rejected. Run `roster auth login` again.".yellow()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn prompt_pin() -> Result<String> {
    print!("Board PIN: ");
    use std::io::Write;
    std::io::stdout().flush()?;

    let mut pin = String::new();
    std::io::stdin().read_line(&mut pin)?;

    Ok(pin)
}
