use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Smallest accepted number of rows or columns.
pub const MIN_SIZE: Coord = 3;

/// Largest accepted number of rows or columns.
pub const MAX_SIZE: Coord = 99;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub const fn size_in_bounds((rows, cols): Coord2) -> bool {
    rows >= MIN_SIZE && rows <= MAX_SIZE && cols >= MIN_SIZE && cols <= MAX_SIZE
}

/// The four corners of a board of the given size, top-left first.
pub const fn corners((rows, cols): Coord2) -> [Coord2; 4] {
    let last_row = rows.saturating_sub(1);
    let last_col = cols.saturating_sub(1);
    [(0, 0), (0, last_col), (last_row, 0), (last_row, last_col)]
}

pub fn is_corner(coords: Coord2, size: Coord2) -> bool {
    corners(size).contains(&coords)
}

/// Reads the `(rows, cols)` of a grid back into board coordinates.
pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, cols) = grid.dim();
    (
        rows.try_into().unwrap_or(Coord::MAX),
        cols.try_into().unwrap_or(Coord::MAX),
    )
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, grid_size(self))
    }
}

/// Row-major `(drow, dcol)` offsets, the fixed scan order of every neighbor walk.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (drow, dcol) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(drow)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(dcol)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[usize::from(self.index)], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighbors_are_clipped_at_edges() {
        let top_left: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();
        assert_eq!(top_left, [(0, 1), (1, 0), (1, 1)]);

        let bottom_right: Vec<_> = NeighborIter::new((2, 2), (3, 3)).collect();
        assert_eq!(bottom_right, [(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn neighbors_follow_row_major_order() {
        let center: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();
        assert_eq!(
            center,
            [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn corners_of_rectangular_board() {
        assert_eq!(corners((3, 5)), [(0, 0), (0, 4), (2, 0), (2, 4)]);
        assert!(is_corner((2, 4), (3, 5)));
        assert!(!is_corner((1, 4), (3, 5)));
    }

    #[test]
    fn size_bounds_are_inclusive() {
        assert!(size_in_bounds((MIN_SIZE, MAX_SIZE)));
        assert!(!size_in_bounds((MIN_SIZE - 1, 5)));
        assert!(!size_in_bounds((5, MAX_SIZE + 1)));
    }
}
