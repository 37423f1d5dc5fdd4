//! Grid shape solver
//!
//! Picks a column/row count for `n` equal tiles and, when the final row is
//! short, the column each of its tiles starts at so the row is centered.
//!
//! Centering a partial row on whole columns only works when the number of
//! empty cells is even. When it is odd, both axes are doubled and every tile
//! spans 2×2, which makes the empty cell count even at the cost of a coarser
//! grid. This is an approximation, not a minimal covering grid.

use serde::Serialize;

use super::mode::Orientation;

/// Column and row counts of a tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridShape {
    /// Columns in tile units
    pub columns: u32,
    /// Rows in tile units
    pub rows: u32,
    /// Whether every tile spans 2×2 cells
    pub doubled: bool,
}

impl GridShape {
    /// Solve the grid for `n` tiles
    ///
    /// Landscape viewports fix the column count first, portrait viewports the
    /// row count, so the grid leans toward the long axis. Doubling is only
    /// considered for more than two tiles.
    pub fn solve(n: u32, orientation: Orientation) -> Self {
        if n == 0 {
            return Self {
                columns: 0,
                rows: 0,
                doubled: false,
            };
        }

        let side = ceil_sqrt(n);
        let (columns, rows) = match orientation {
            Orientation::Landscape => (side, n.div_ceil(side)),
            Orientation::Portrait => (n.div_ceil(side), side),
        };

        let empty = columns * rows - n;
        Self {
            columns,
            rows,
            doubled: n > 2 && empty % 2 == 1,
        }
    }

    /// Cell span of one tile along each axis
    pub fn span(&self) -> u32 {
        if self.doubled {
            2
        } else {
            1
        }
    }

    /// Column track count after doubling
    pub fn track_columns(&self) -> u32 {
        self.columns * self.span()
    }

    /// Row track count after doubling
    pub fn track_rows(&self) -> u32 {
        self.rows * self.span()
    }

    /// Number of tile slots
    pub fn capacity(&self) -> u32 {
        self.columns * self.rows
    }

    /// First grid column (1-indexed, in tracks) of the final row when it is
    /// only partly filled by `n` tiles
    pub fn last_row_start(&self, n: u32) -> Option<u32> {
        if self.columns == 0 || self.capacity() <= n {
            return None;
        }

        let in_last_row = n.saturating_sub((self.rows - 1) * self.columns);
        let empty_tracks = self.track_columns() - in_last_row * self.span();
        Some(empty_tracks / 2 + 1)
    }

    /// Column starts for every tile, in order
    ///
    /// Tiles outside the final partial row get `None` and flow normally.
    pub fn column_starts(&self, n: u32) -> Vec<Option<u32>> {
        let mut starts = vec![None; n as usize];
        let Some(mut next) = self.last_row_start(n) else {
            return starts;
        };

        let first_in_last_row = ((self.rows - 1) * self.columns) as usize;
        for start in starts.iter_mut().skip(first_in_last_row) {
            *start = Some(next);
            next += self.span();
        }
        starts
    }
}

/// Smallest `s` with `s * s >= n`
fn ceil_sqrt(n: u32) -> u32 {
    let mut s = (n as f64).sqrt() as u32;
    while s * s < n {
        s += 1;
    }
    while s > 0 && (s - 1) * (s - 1) >= n {
        s -= 1;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_sqrt() {
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(4), 2);
        assert_eq!(ceil_sqrt(5), 3);
        assert_eq!(ceil_sqrt(9), 3);
        assert_eq!(ceil_sqrt(10), 4);
        assert_eq!(ceil_sqrt(25), 5);
    }

    #[test]
    fn test_seven_landscape() {
        let grid = GridShape::solve(7, Orientation::Landscape);

        assert_eq!(grid.columns, 3);
        assert_eq!(grid.rows, 3);
        assert!(!grid.doubled);
        assert_eq!(grid.track_columns(), 3);
    }

    #[test]
    fn test_five_landscape_doubles() {
        let grid = GridShape::solve(5, Orientation::Landscape);

        assert_eq!((grid.columns, grid.rows), (3, 2));
        assert!(grid.doubled);
        assert_eq!((grid.track_columns(), grid.track_rows()), (6, 4));
        assert_eq!(grid.span(), 2);
    }

    #[test]
    fn test_portrait_prefers_rows() {
        let grid = GridShape::solve(5, Orientation::Portrait);

        assert_eq!((grid.columns, grid.rows), (2, 3));
        assert!(grid.doubled);

        let grid = GridShape::solve(6, Orientation::Portrait);
        assert_eq!((grid.columns, grid.rows), (2, 3));
        assert!(!grid.doubled);
    }

    #[test]
    fn test_small_counts_never_double() {
        // 2 tiles in landscape: 2x1, no empty cell
        let grid = GridShape::solve(2, Orientation::Landscape);
        assert_eq!((grid.columns, grid.rows), (2, 1));
        assert!(!grid.doubled);

        let grid = GridShape::solve(1, Orientation::Portrait);
        assert_eq!((grid.columns, grid.rows), (1, 1));
        assert!(!grid.doubled);

        let grid = GridShape::solve(0, Orientation::Landscape);
        assert_eq!(grid.capacity(), 0);
    }

    #[test]
    fn test_empty_cells_even_after_doubling() {
        for n in 3..=25 {
            for orientation in [Orientation::Landscape, Orientation::Portrait] {
                let grid = GridShape::solve(n, orientation);
                let empty_tracks =
                    grid.track_columns() * grid.track_rows() - n * grid.span() * grid.span();
                assert_eq!(empty_tracks % 2, 0, "n={n} {orientation:?}");
            }
        }
    }

    #[test]
    fn test_last_row_centering_plain() {
        // 7 tiles in 3x3: last row has 1 tile, 2 empty columns -> start at 2
        let grid = GridShape::solve(7, Orientation::Landscape);
        assert_eq!(grid.last_row_start(7), Some(2));

        let starts = grid.column_starts(7);
        assert_eq!(starts[..6], [None; 6]);
        assert_eq!(starts[6], Some(2));
    }

    #[test]
    fn test_last_row_centering_doubled() {
        // 5 tiles, 3x2 doubled to 6x4 tracks; last row has 2 tiles (4 tracks)
        let grid = GridShape::solve(5, Orientation::Landscape);
        assert_eq!(grid.last_row_start(5), Some(2));

        let starts = grid.column_starts(5);
        assert_eq!(starts, vec![None, None, None, Some(2), Some(4)]);
    }

    #[test]
    fn test_full_grid_has_no_centering() {
        let grid = GridShape::solve(9, Orientation::Landscape);
        assert_eq!(grid.last_row_start(9), None);
        assert!(grid.column_starts(9).iter().all(Option::is_none));
    }
}
