//! Board viewing and move commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use roster_board::{Board, ContainerRef, ItemKind, MoveOutcome};
use serde::Serialize;
use tabled::Tabled;

use crate::commands::CommandContext;
use crate::output::{print_info, print_output, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    /// Show every district and its companionships.
    Show,

    /// Show an unassigned pool.
    Pool {
        /// Item kind: bro or fam.
        kind: String,

        /// Case-insensitive substring filter.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show a master name list.
    Masters {
        /// Item kind: bro or fam.
        kind: String,
    },
}

impl BoardCommand {
    pub async fn run(self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Show => show(ctx).await,
            Self::Pool { kind, filter } => pool(ctx, &kind, filter.as_deref()).await,
            Self::Masters { kind } => masters(ctx, &kind).await,
        }
    }
}

/// Arguments for `roster move`.
#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Item kind: bro or fam.
    kind: String,

    /// Name to move.
    name: String,

    /// Destination district, by name or zero-based index.
    #[arg(long, conflicts_with = "pool")]
    district: Option<String>,

    /// Destination companionship index within the district.
    #[arg(long, requires = "district")]
    comp: Option<usize>,

    /// Move back to the unassigned pool instead.
    #[arg(long)]
    pool: bool,
}

impl MoveArgs {
    pub async fn run(self, ctx: &CommandContext) -> Result<()> {
        let kind = parse_kind(&self.kind)?;
        let (client, mut board) = ctx.load_board().await?;

        let dest = if self.pool {
            ContainerRef::Pool(kind)
        } else {
            let district = self
                .district
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Pass --district and --comp, or --pool"))?;
            let district = resolve_district(&board, district)?;
            let comp = self
                .comp
                .ok_or_else(|| anyhow::anyhow!("Pass --comp with --district"))?;

            ContainerRef::Slot {
                district,
                comp,
                kind,
            }
        };

        board.select_item(kind, &self.name)?;

        match board.move_selected_to(dest)? {
            MoveOutcome::Moved => {
                ctx.save_board(&client, &board).await?;
            }
            MoveOutcome::Rejected => {
                print_info(&format!(
                    "That slot holds {}, not {}. Nothing moved.",
                    kind.other().label(),
                    kind.label()
                ));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Tabled)]
struct CompRow {
    #[tabled(rename = "District")]
    district: String,
    #[tabled(rename = "Comp")]
    comp: usize,
    #[tabled(rename = "Brothers")]
    brothers: String,
    #[tabled(rename = "Families")]
    families: String,
}

#[derive(Debug, Serialize, Tabled)]
struct NameRow {
    #[tabled(rename = "Name")]
    name: String,
}

async fn show(ctx: &CommandContext) -> Result<()> {
    let (_, board) = ctx.load_board().await?;

    let mut rows = Vec::new();
    for district in board.districts() {
        for (index, comp) in district.comps.iter().enumerate() {
            rows.push(CompRow {
                district: district.name.clone(),
                comp: index,
                brothers: comp.brothers.join(", "),
                families: comp.families.join(", "),
            });
        }
    }

    print_output(&rows, ctx.format);

    if matches!(ctx.format, OutputFormat::Table) {
        println!(
            "\nUnassigned: {} brothers, {} families",
            board.pool(ItemKind::Brother).len(),
            board.pool(ItemKind::Family).len()
        );
    }

    Ok(())
}

async fn pool(ctx: &CommandContext, kind: &str, filter: Option<&str>) -> Result<()> {
    let kind = parse_kind(kind)?;
    let (_, board) = ctx.load_board().await?;

    let names: Vec<NameRow> = board
        .filter_pool(kind, filter.unwrap_or(""))
        .into_iter()
        .map(|name| NameRow {
            name: name.to_string(),
        })
        .collect();

    print_output(&names, ctx.format);
    Ok(())
}

async fn masters(ctx: &CommandContext, kind: &str) -> Result<()> {
    let kind = parse_kind(kind)?;
    let (_, board) = ctx.load_board().await?;

    let names: Vec<NameRow> = board
        .master(kind)
        .normalized_list()
        .iter()
        .map(|name| NameRow { name: name.clone() })
        .collect();

    print_output(&names, ctx.format);
    Ok(())
}

/// Parse an item kind from its short or long form.
pub fn parse_kind(s: &str) -> Result<ItemKind> {
    match s.to_ascii_lowercase().as_str() {
        "bro" | "brother" | "brothers" => Ok(ItemKind::Brother),
        "fam" | "family" | "families" => Ok(ItemKind::Family),
        other => anyhow::bail!("Unknown kind {:?}, expected bro or fam", other),
    }
}

/// Resolve a district given by name or zero-based index.
pub fn resolve_district(board: &Board, district: &str) -> Result<usize> {
    if let Some(index) = board.find_district(district) {
        return Ok(index);
    }

    if let Ok(index) = district.parse::<usize>() {
        if index < board.districts().len() {
            return Ok(index);
        }
    }

    let known = board
        .districts()
        .iter()
        .map(|d| d.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    anyhow::bail!("Unknown district {:?}. Known districts: {}", district, known)
}
