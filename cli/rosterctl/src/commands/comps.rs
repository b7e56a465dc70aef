//! Companionship management commands.

use anyhow::Result;
use clap::Subcommand;
use roster_board::ItemKind;

use crate::commands::board::resolve_district;
use crate::commands::CommandContext;
use crate::output::{print_info, print_success};

#[derive(Debug, Subcommand)]
pub enum CompsCommand {
    /// Add an empty companionship to a district.
    Add {
        /// District, by name or zero-based index.
        #[arg(long)]
        district: String,
    },

    /// Delete a companionship and return its names to the pools.
    Delete {
        /// District, by name or zero-based index.
        #[arg(long)]
        district: String,

        /// Companionship index within the district.
        #[arg(long)]
        index: usize,
    },
}

impl CompsCommand {
    pub async fn run(self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Add { district } => add(ctx, &district).await,
            Self::Delete { district, index } => delete(ctx, &district, index).await,
        }
    }
}

async fn add(ctx: &CommandContext, district: &str) -> Result<()> {
    let (client, mut board) = ctx.load_board().await?;

    let district_index = resolve_district(&board, district)?;
    let comp_index = board.add_companionship(district_index)?;
    let district_name = board.districts()[district_index].name.clone();

    print_success(&format!(
        "Added companionship {} to {}.",
        comp_index, district_name
    ));
    print_info("Empty companionships are kept only once they hold a name.");

    ctx.save_board(&client, &board).await
}

async fn delete(ctx: &CommandContext, district: &str, index: usize) -> Result<()> {
    let (client, mut board) = ctx.load_board().await?;

    let district_index = resolve_district(&board, district)?;
    let district_name = board.districts()[district_index].name.clone();

    let occupied = board
        .districts()
        .get(district_index)
        .and_then(|d| d.comps.get(index))
        .map(|comp| (comp.brothers.len(), comp.families.len()))
        .unwrap_or((0, 0));

    let prompt = format!(
        "Delete companionship {} in {} holding {} brother(s) and {} family(ies)?",
        index, district_name, occupied.0, occupied.1
    );

    if !ctx.confirm(&prompt)? {
        print_info("Aborted.");
        return Ok(());
    }

    let removed = board.delete_companionship(district_index, index)?;

    if !removed.is_empty() {
        print_success(&format!(
            "Returned {} name(s) to the pools.",
            removed.slot(ItemKind::Brother).len() + removed.slot(ItemKind::Family).len()
        ));
    } else {
        print_success("Deleted empty companionship.");
    }

    ctx.save_board(&client, &board).await
}
