#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Parameters of a generated board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(size, mines).validate()
    }

    /// Checks the size bounds and that `1 <= mines <= rows * cols - 4`.
    pub fn validate(self) -> Result<Self> {
        let (rows, cols) = self.size;
        if !size_in_bounds(self.size) {
            return Err(ValidationError::SizeOutOfRange { rows, cols }.into());
        }
        if self.mines == 0 {
            return Err(ValidationError::NoMines.into());
        }
        let capacity = self.mine_capacity();
        if self.mines > capacity {
            return Err(ValidationError::TooManyMines {
                requested: self.mines,
                capacity,
            }
            .into());
        }
        Ok(self)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Cells that may hold a mine, every cell but the corners.
    pub const fn mine_capacity(&self) -> CellCount {
        self.total_cells().saturating_sub(4)
    }
}
