use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

/// Reasons a board is refused by [`RawBoard::postprocess`](crate::RawBoard::postprocess).
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Board size {rows}x{cols} is out of range")]
    SizeOutOfRange { rows: Coord, cols: Coord },
    #[error("Mine placed in corner {0:?}")]
    MinedCorner(Coord2),
    #[error("Cell {coords:?} shows {stated} but has {actual} adjacent mines")]
    CountMismatch {
        coords: Coord2,
        stated: u8,
        actual: u8,
    },
    #[error("Board has no mines")]
    NoMines,
    #[error("Too many mines, requested {requested} but only {capacity} fit")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid cell code {0:?}")]
    InvalidCellCode(char),
    #[error("Board incomplete, loaded {loaded} of {expected} cells")]
    IncompleteBoard {
        loaded: CellCount,
        expected: CellCount,
    },
    #[error("Invalid board: {0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Cell already revealed")]
    AlreadyRevealed,
    #[error("Cell is flagged")]
    Flagged,
}

impl GameError {
    /// Whether the error rejects a player move rather than a board.
    pub const fn is_invalid_operation(self) -> bool {
        matches!(
            self,
            Self::InvalidCoords | Self::AlreadyRevealed | Self::Flagged
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
