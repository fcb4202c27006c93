//! Line enumeration for win detection and evaluation

/// Winning line indices on the 3x3 board
pub const TICTACTOE_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Step directions as `(row delta, col delta)`: horizontal, vertical,
/// down-right diagonal, up-right diagonal
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// A straight run of cells: start coordinates, step direction and length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    length: usize,
}

impl Window {
    /// The window starting at `(row, col)` if all of it lies on the board
    fn fitting(
        (rows, cols): (usize, usize),
        (row, col): (usize, usize),
        (dr, dc): (isize, isize),
        length: usize,
    ) -> Option<Self> {
        if length == 0 || row >= rows || col >= cols {
            return None;
        }
        let reach = length as isize - 1;
        let end_row = row.checked_add_signed(dr * reach)?;
        let end_col = col.checked_add_signed(dc * reach)?;
        (end_row < rows && end_col < cols).then_some(Self {
            row,
            col,
            dr,
            dc,
            length,
        })
    }

    /// `(row, col)` coordinates of the window, start first
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        // Both ends are on the board, so every step in between is too
        (0..self.length as isize).map(move |step| {
            (
                self.row.wrapping_add_signed(self.dr * step),
                self.col.wrapping_add_signed(self.dc * step),
            )
        })
    }
}

/// Every straight window of a fixed length on a rectangular board
pub struct LineWindows;

impl LineWindows {
    /// Enumerate all windows of `length` cells along rows, columns and both
    /// diagonal directions, without allocating.
    pub fn all(rows: usize, cols: usize, length: usize) -> impl Iterator<Item = Window> {
        (0..rows).flat_map(move |row| {
            (0..cols).flat_map(move |col| {
                DIRECTIONS.iter().filter_map(move |&step| {
                    Window::fitting((rows, cols), (row, col), step, length)
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn tictactoe_windows_match_winning_lines() {
        let windows: HashSet<Vec<usize>> = LineWindows::all(3, 3, 3)
            .map(|w| {
                let mut idx: Vec<usize> = w.cells().map(|(r, c)| r * 3 + c).collect();
                idx.sort_unstable();
                idx
            })
            .collect();
        let expected: HashSet<Vec<usize>> = TICTACTOE_LINES.iter().map(|l| l.to_vec()).collect();

        assert_eq!(windows, expected);
    }

    #[test]
    fn connect_four_window_count() {
        // 24 horizontal + 21 vertical + 12 + 12 diagonal
        assert_eq!(LineWindows::all(6, 7, 4).count(), 69);
    }

    #[test]
    fn windows_stay_on_board() {
        for window in LineWindows::all(6, 7, 4) {
            assert_eq!(window.cells().count(), 4);
            assert!(window.cells().all(|(r, c)| r < 6 && c < 7));
        }
    }

    #[test]
    fn up_right_diagonal_climbs_from_the_bottom() {
        let window = LineWindows::all(6, 7, 4)
            .find(|w| w.cells().next() == Some((5, 0)) && w.cells().nth(1) == Some((4, 1)))
            .unwrap();
        assert_eq!(
            window.cells().collect::<Vec<_>>(),
            vec![(5, 0), (4, 1), (3, 2), (2, 3)]
        );
    }

    #[test]
    fn oversized_windows_do_not_fit() {
        assert_eq!(LineWindows::all(3, 3, 4).count(), 0);
        assert_eq!(LineWindows::all(3, 3, 0).count(), 0);
    }
}
