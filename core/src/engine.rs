use alloc::vec;
use core::num::Saturating;

use crate::*;

impl Board {
    /// Reveals the cell at `coords`, cascading through empty regions.
    ///
    /// Numbered cells and mines are revealed alone. A cell without adjacent
    /// mines is revealed together with everything reachable through other
    /// such cells, plus their numbered border.
    pub fn reveal_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        let outcome = cell.reveal()?;
        let number = cell.number();
        if outcome.is_mine_hit() {
            log::debug!("Hit mine at {:?}", coords);
            return Ok(outcome);
        }

        if number == 0 {
            let opened = self.reveal_floodfill(coords);
            log::debug!("Cascade from {:?} opened {} more cells", coords, opened);
        } else {
            log::debug!("Revealed {:?}, adjacent mines: {}", coords, number);
        }

        if self.is_solved() && !self.is_lost() {
            log::debug!("Board solved");
            Ok(RevealOutcome::Won)
        } else {
            Ok(outcome)
        }
    }

    /// Reveals every unrevealed neighbor of `coords`, descending into the
    /// ones without adjacent mines. Returns how many cells were opened.
    ///
    /// Flags do not stop a cascade, flagged cells on the way are opened and
    /// lose their flag. Neighbors are visited in a fixed row-major order and
    /// the walk goes depth first, one stack frame per entered cell, so it
    /// never holds more than `rows * cols` frames.
    pub fn reveal_floodfill(&mut self, coords: Coord2) -> CellCount {
        let mut opened = Saturating(0);
        if self.validate_coords(coords).is_err() {
            return opened.0;
        }

        let mut stack = vec![self.iter_neighbors(coords)];
        while let Some(frame) = stack.last_mut() {
            let Some(pos) = frame.next() else {
                stack.pop();
                continue;
            };

            let cell = &mut self.cells[pos.to_nd_index()];
            // mines only ever border the cascaded region
            if cell.is_revealed() || cell.is_mine() {
                continue;
            }

            if cell.is_flagged() {
                log::trace!("Cascade opens flagged cell at {:?}", pos);
                cell.force_reveal();
            } else if cell.reveal().is_err() {
                continue;
            }
            opened += 1;
            log::trace!(
                "Flood opened cell at {:?}, adjacent mines: {}",
                pos,
                cell.number()
            );

            if cell.number() == 0 {
                stack.push(self.iter_neighbors(pos));
            }
        }

        opened.0
    }

    /// Toggles the flag at `coords`, returning how many mines are left unflagged.
    pub fn flag_cell(&mut self, coords: Coord2) -> Result<isize> {
        let coords = self.validate_coords(coords)?;
        let flagged = self.cells[coords.to_nd_index()].toggle_flag()?;
        log::debug!(
            "{} {:?}",
            if flagged { "Flagged" } else { "Unflagged" },
            coords
        );
        Ok(self.mines_left())
    }

    /// Mines minus flags, may go negative when flags are overused.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count() as isize)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_cells(Cell::is_flagged)
    }

    pub fn unrevealed_count(&self) -> CellCount {
        self.count_cells(|cell| !cell.is_revealed())
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_cells(Cell::is_revealed)
    }

    /// Whether every safe cell is revealed, flags are not required.
    pub fn is_solved(&self) -> bool {
        self.unrevealed_count() == self.mine_count
    }

    /// Whether any mine has been revealed.
    pub fn is_lost(&self) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.is_mine() && cell.is_revealed())
    }

    fn count_cells(&self, predicate: impl Fn(Cell) -> bool) -> CellCount {
        let count = self.cells.iter().filter(|&&cell| predicate(cell)).count();
        count.try_into().unwrap_or(CellCount::MAX)
    }
}
