//! Master-list management commands.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::board::parse_kind;
use crate::commands::CommandContext;
use crate::output::{print_info, print_success};

#[derive(Debug, Subcommand)]
pub enum NamesCommand {
    /// Add a name to a master list. New names land at the front of the pool.
    Add {
        /// Item kind: bro or fam.
        kind: String,

        /// Name to add.
        name: String,
    },

    /// Remove a name everywhere: master list, pool, and any assignment.
    Remove {
        /// Item kind: bro or fam.
        kind: String,

        /// Name to remove.
        name: String,
    },
}

impl NamesCommand {
    pub async fn run(self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Add { kind, name } => add(ctx, &kind, &name).await,
            Self::Remove { kind, name } => remove(ctx, &kind, &name).await,
        }
    }
}

async fn add(ctx: &CommandContext, kind: &str, name: &str) -> Result<()> {
    let kind = parse_kind(kind)?;
    let (client, mut board) = ctx.load_board().await?;

    if !board.add_person(name.trim(), kind)? {
        print_info(&format!("{:?} is already on the {} list.", name, kind.label()));
        return Ok(());
    }

    print_success(&format!("Added {:?} to the {} list.", name, kind.label()));
    ctx.save_board(&client, &board).await
}

async fn remove(ctx: &CommandContext, kind: &str, name: &str) -> Result<()> {
    let kind = parse_kind(kind)?;
    let (client, mut board) = ctx.load_board().await?;

    let assignments: Vec<String> = board
        .assignments_of(kind, name)
        .into_iter()
        .map(|(district, comp)| format!("{} companionship {}", district, comp))
        .collect();

    let prompt = if assignments.is_empty() {
        format!("Remove {:?} from the {} list?", name, kind.label())
    } else {
        format!(
            "{:?} is assigned in {}. Remove anyway?",
            name,
            assignments.join(", ")
        )
    };

    if !ctx.confirm(&prompt)? {
        print_info("Aborted.");
        return Ok(());
    }

    board.remove_person(name, kind)?;
    print_success(&format!("Removed {:?} from the {} list.", name, kind.label()));

    ctx.save_board(&client, &board).await
}
