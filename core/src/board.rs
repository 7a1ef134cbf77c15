use core::fmt;
use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of cells that has not been through [`RawBoard::postprocess`] yet.
///
/// Neighbor counts stored here are meaningless until validation recomputes
/// them, which is why no gameplay operation is available on this type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawBoard {
    cells: Array2<Cell>,
}

impl RawBoard {
    /// All cells unrevealed and blank.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::from_elem(size.to_nd_index(), Cell::blank()),
        }
    }

    pub fn from_cells(cells: Array2<Cell>) -> Self {
        Self { cells }
    }

    /// Consumes cell codes in row-major order until `rows * cols` valid ones
    /// were read, skipping anything outside the vocabulary.
    pub fn load<I>(size: Coord2, codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let expected = mult(size.0, size.1);
        let mut board = Self::new(size);
        let mut loaded: CellCount = 0;

        let mut slots = board.cells.iter_mut();
        let mut codes = codes.into_iter();
        while loaded < expected {
            let Some(code) = codes.next() else {
                log::debug!("Board input ended after {} of {} cells", loaded, expected);
                return Err(GameError::IncompleteBoard { loaded, expected });
            };
            match Cell::from_code(code) {
                Ok(cell) => match slots.next() {
                    Some(slot) => {
                        *slot = cell;
                        loaded += 1;
                    }
                    None => break,
                },
                Err(_) => log::trace!("Skipping invalid cell code {:?}", code),
            }
        }

        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn set(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        let slot = self
            .cells
            .get_mut(coords.to_nd_index())
            .ok_or(GameError::InvalidCoords)?;
        *slot = cell;
        Ok(())
    }

    /// Strict setter, any code outside the vocabulary is an error.
    pub fn set_code(&mut self, coords: Coord2, code: char) -> Result<()> {
        self.set(coords, Cell::from_code(code)?)
    }

    /// Validates the grid and derives every neighbor count, yielding a
    /// playable board.
    pub fn postprocess(mut self) -> Result<Board> {
        let size = self.size();
        let (rows, cols) = size;

        if !size_in_bounds(size) {
            log::debug!("Rejecting board of size {}x{}", rows, cols);
            return Err(ValidationError::SizeOutOfRange { rows, cols }.into());
        }

        if let Some(&corner) = corners(size)
            .iter()
            .find(|&&corner| self.cells[corner.to_nd_index()].is_mine())
        {
            log::debug!("Rejecting board with mine in corner {:?}", corner);
            return Err(ValidationError::MinedCorner(corner).into());
        }

        let mut mine_count: CellCount = 0;
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                let actual = count_neighbor_mines(&self.cells, coords);
                let cell = &mut self.cells[coords.to_nd_index()];

                if cell.is_mine() {
                    mine_count += 1;
                }

                if let (true, CellKind::Number(stated)) = (cell.is_revealed(), cell.kind()) {
                    if stated != actual {
                        log::debug!(
                            "Rejecting board, {:?} shows {} but has {} adjacent mines",
                            coords,
                            stated,
                            actual
                        );
                        return Err(ValidationError::CountMismatch {
                            coords,
                            stated,
                            actual,
                        }
                        .into());
                    }
                }

                cell.set_neighbor_mines(actual);
            }
        }

        if mine_count == 0 {
            log::debug!("Rejecting board without mines");
            return Err(ValidationError::NoMines.into());
        }

        log::debug!(
            "Validated {}x{} board with {} mines",
            rows,
            cols,
            mine_count
        );
        Ok(Board {
            cells: self.cells,
            mine_count,
        })
    }
}

/// Direct adjacency scan, bounds checked and without wraparound.
pub fn count_neighbor_mines(cells: &Array2<Cell>, coords: Coord2) -> u8 {
    let mut count = 0;
    for pos in cells.iter_neighbors(coords) {
        if cells[pos.to_nd_index()].is_mine() {
            count += 1;
        }
    }
    count
}

/// Validated board, the only type gameplay operations are defined on.
///
/// Deserializing goes through [`RawBoard`] and its validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    pub(crate) cells: Array2<Cell>,
    pub(crate) mine_count: CellCount,
}

impl Board {
    /// Loads and validates a board in one go.
    pub fn load<I>(size: Coord2, codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        RawBoard::load(size, codes)?.postprocess()
    }

    pub fn load_str(size: Coord2, text: &str) -> Result<Self> {
        Self::load(size, text.chars())
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        raw.postprocess()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

fn write_codes(f: &mut fmt::Formatter<'_>, cells: &Array2<Cell>) -> fmt::Result {
    for row in cells.rows() {
        for cell in row {
            write!(f, "{}", cell.code())?;
        }
        writeln!(f)?;
    }
    Ok(())
}

/// One line of cell codes per row, readable by [`Board::load`].
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_codes(f, &self.cells)
    }
}

impl fmt::Display for RawBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_codes(f, &self.cells)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    /// Recomputes every count the slow way, independent of [`count_neighbor_mines`].
    fn brute_force_counts(board: &Board) -> Array2<u8> {
        let (rows, cols) = board.size();
        let mut counts = Array2::zeros((rows as usize, cols as usize));
        for row in 0..rows as isize {
            for col in 0..cols as isize {
                let mut count = 0;
                for r in row - 1..=row + 1 {
                    for c in col - 1..=col + 1 {
                        if (r, c) == (row, col)
                            || r < 0
                            || c < 0
                            || r >= rows as isize
                            || c >= cols as isize
                        {
                            continue;
                        }
                        if board[(r as Coord, c as Coord)].is_mine() {
                            count += 1;
                        }
                    }
                }
                counts[[row as usize, col as usize]] = count;
            }
        }
        counts
    }

    #[test]
    fn postprocess_derives_neighbor_counts() {
        let board = Board::load_str(
            (4, 5),
            "XXMXX\
             XXXXX\
             XMXMX\
             XXXXX",
        )
        .unwrap();

        assert_eq!(board.mine_count(), 3);
        let expected = brute_force_counts(&board);
        for ((row, col), cell) in board.cells().indexed_iter() {
            assert_eq!(cell.neighbor_mines(), expected[[row, col]]);
        }
        assert_eq!(board[(1, 2)].neighbor_mines(), 3);
        assert_eq!(board[(0, 0)].neighbor_mines(), 0);
    }

    #[test]
    fn postprocess_overwrites_untrusted_counts() {
        let mut raw = RawBoard::new((3, 3));
        let mut cell = Cell::blank();
        cell.set_neighbor_mines(8);
        raw.set((0, 1), cell).unwrap();
        raw.set_code((1, 1), 'M').unwrap();

        let board = raw.postprocess().unwrap();
        assert_eq!(board[(0, 1)].neighbor_mines(), 1);
        assert_eq!(board[(1, 1)].neighbor_mines(), 0);
    }

    #[test]
    fn postprocess_rejects_mined_corners() {
        for corner in corners((3, 4)) {
            let mut raw = RawBoard::new((3, 4));
            raw.set_code((1, 1), 'M').unwrap();
            raw.set_code(corner, 'M').unwrap();
            assert_eq!(
                raw.postprocess(),
                Err(ValidationError::MinedCorner(corner).into())
            );
        }
    }

    #[test]
    fn postprocess_rejects_flagged_mine_in_corner() {
        let result = Board::load_str((3, 3), "XXF XMX XXX");
        assert_eq!(result, Err(ValidationError::MinedCorner((0, 2)).into()));
    }

    #[test]
    fn postprocess_rejects_empty_board() {
        let result = RawBoard::new((3, 3)).postprocess();
        assert_eq!(result, Err(ValidationError::NoMines.into()));
    }

    #[test]
    fn postprocess_rejects_out_of_range_size() {
        let mut raw = RawBoard::new((2, 5));
        raw.set_code((1, 2), 'M').unwrap();
        assert_eq!(
            raw.postprocess(),
            Err(ValidationError::SizeOutOfRange { rows: 2, cols: 5 }.into())
        );

        let raw = RawBoard::new((5, MAX_SIZE + 1));
        assert!(matches!(
            raw.postprocess(),
            Err(GameError::Validation(ValidationError::SizeOutOfRange { .. }))
        ));
    }

    #[test]
    fn postprocess_checks_revealed_digits() {
        let board = Board::load_str((3, 3), "111 1M1 111").unwrap();
        assert_eq!(board.mine_count(), 1);

        let result = Board::load_str((3, 3), "121 1M1 111");
        assert_eq!(
            result,
            Err(ValidationError::CountMismatch {
                coords: (0, 1),
                stated: 2,
                actual: 1,
            }
            .into())
        );
    }

    #[test]
    fn load_skips_invalid_characters() {
        let board = Board::load_str((3, 3), "x x x\n? x m x\n- x x x !!").unwrap();
        assert_eq!(board.mine_count(), 1);
        assert!(board[(1, 1)].is_mine());
    }

    #[test]
    fn load_stops_after_requested_cells() {
        let raw = RawBoard::load((3, 3), "XXXXMXXXXMMMM".chars()).unwrap();
        assert_eq!(raw.cell_at((2, 2)), Some(Cell::blank()));
    }

    #[test]
    fn load_reports_incomplete_board() {
        let result = Board::load_str((3, 3), "XXX XMX");
        assert_eq!(
            result,
            Err(GameError::IncompleteBoard {
                loaded: 6,
                expected: 9,
            })
        );
    }

    #[test]
    fn strict_setter_rejects_invalid_code() {
        let mut raw = RawBoard::new((3, 3));
        assert_eq!(
            raw.set_code((0, 0), 'Q'),
            Err(GameError::InvalidCellCode('Q'))
        );
        assert_eq!(raw.set_code((3, 0), 'X'), Err(GameError::InvalidCoords));
    }

    #[test]
    fn display_output_loads_back() {
        let board = Board::load_str((3, 4), "X2WX XMFX XXXX").unwrap();
        let text = board.to_string();
        assert_eq!(text, "X2WX\nXMFX\nXXXX\n");

        let reloaded = Board::load_str(board.size(), &text).unwrap();
        assert_eq!(reloaded, board);
    }

    #[test]
    fn board_serializes_with_serde() {
        let board = Board::load_str((3, 3), "XXX XMX XXX").unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn deserializing_board_runs_validation() {
        let mut cells = Array2::from_elem((3, 3), Cell::blank());
        cells[[1, 1]] = Cell::mine();
        cells[[2, 2]] = Cell::mine();
        let raw = RawBoard::from_cells(cells);
        let json = serde_json::to_string(&raw).unwrap();

        let result = serde_json::from_str::<Board>(&json);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("corner"), "unexpected error: {}", err);
    }

    #[test]
    fn raw_board_display_loads_back() {
        let raw = RawBoard::load((3, 3), "1XX XMX XX0".chars()).unwrap();
        let text = raw.to_string();
        assert_eq!(text, "1XX\nXMX\nXX0\n");

        let reloaded = RawBoard::load(raw.size(), text.chars()).unwrap();
        assert_eq!(reloaded, raw);
    }

    #[test]
    fn revealed_zero_survives_reload() {
        let board = Board::load_str((3, 4), "0XXX XXXX XXMX").unwrap();
        let reloaded = Board::load_str(board.size(), &board.to_string()).unwrap();

        assert_eq!(board[(0, 0)].kind(), CellKind::Number(0));
        assert_eq!(reloaded, board);
    }
}
