//! Assignment-board model for the roster pairing board.
//!
//! This library holds the in-memory board (districts, companionships, the two
//! unassigned pools, and the single-item selection) plus the persisted
//! document format it serializes to. Key concepts:
//!
//! - **Master list**: the authoritative set of known names per item kind,
//!   independent of placement.
//! - **Pool**: derived state, never stored — the normalized master list minus
//!   every name currently placed in a companionship.
//! - **Document**: the full snapshot written and read atomically per save.
//!
//! # Invariants
//!
//! - A name occupies exactly one container (pool or slot list) after every
//!   operation completes.
//! - Master lists stay unique and ordinal-sorted.
//! - Placement is type-matched: a brother never lands in a family slot.
//!
//! The crate is pure state: no I/O, no async. The HTTP service and the CLI
//! drive it.

mod board;
mod error;
mod model;
mod store;

pub use board::{unassigned, Board, ContainerRef, MoveOutcome, Selection};
pub use error::BoardError;
pub use model::{
    district_map, districts_from_value, districts_to_value, Companionship, District, Document,
    ItemKind, DEFAULT_DISTRICTS,
};
pub use store::NameStore;
