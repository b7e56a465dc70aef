use thiserror::Error;

use crate::model::ItemKind;

/// Board operation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// Names must be non-empty.
    #[error("name cannot be empty")]
    EmptyName,

    /// The named item does not exist anywhere on the board.
    #[error("unknown {kind}: {name}")]
    UnknownName { kind: ItemKind, name: String },

    /// District index out of range.
    #[error("no such district: index {0}")]
    UnknownDistrict(usize),

    /// Companionship index out of range within its district.
    #[error("no such companionship: {district}[{index}]")]
    UnknownCompanionship { district: String, index: usize },

    /// A placement was requested with nothing selected.
    #[error("nothing selected")]
    NothingSelected,
}
