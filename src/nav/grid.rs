use crate::calc::date_range::{self, DateDescriptor};
use crate::nav::ViewMode;
use chrono::NaiveDate;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Date(DateDescriptor),
    /// Leading padding in the first row of a month.
    Empty,
}

impl Cell {
    pub fn date(&self) -> Option<&DateDescriptor> {
        match self {
            Cell::Date(dd) => Some(dd),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// `None` components mean the cursor has not been placed yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorPosition {
    pub row: Option<usize>,
    pub column: Option<usize>,
}

impl CursorPosition {
    pub fn at(row: usize, column: usize) -> Self {
        CursorPosition {
            row: Some(row),
            column: Some(column),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// The selectable business days for a view, laid out Monday..Friday per row,
/// plus the cursor moving over them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationGrid {
    rows: Vec<Vec<Cell>>,
    cursor: CursorPosition,
}

impl NavigationGrid {
    pub fn build(mode: ViewMode, anchor: NaiveDate) -> Self {
        let rows = match mode {
            ViewMode::Day => Vec::new(),
            ViewMode::Week => vec![
                date_range::week(anchor)
                    .into_iter()
                    .map(Cell::Date)
                    .collect(),
            ],
            ViewMode::Month => month_rows(anchor),
        };
        Self::from_rows(rows)
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        NavigationGrid {
            rows,
            cursor: CursorPosition::default(),
        }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    pub fn is_cursor_at(&self, row: usize, column: usize) -> bool {
        self.cursor == CursorPosition::at(row, column)
    }

    /// The date under the cursor, if both coordinates are set.
    pub fn selected(&self) -> Option<&DateDescriptor> {
        match self.cursor {
            CursorPosition {
                row: Some(row),
                column: Some(column),
            } => self.cell(row, column).and_then(Cell::date),
            _ => None,
        }
    }

    /// Moves the cursor with wraparound. Lands on a date cell or leaves the
    /// cursor untouched when no date cell is reachable.
    pub fn move_cursor(&mut self, direction: Direction) {
        if self.rows.is_empty() {
            return;
        }
        let target = match direction {
            Direction::Right => self.step_right(),
            Direction::Left => self.step_left(),
            Direction::Up => self.step_up(),
            Direction::Down => self.step_down(),
        };
        if let Some(pos) = target.and_then(|(row, column)| self.normalize(row, column)) {
            self.cursor = pos;
        }
    }

    fn row_len(&self, row: usize) -> Option<usize> {
        self.rows.get(row).map(Vec::len).filter(|len| *len > 0)
    }

    fn is_empty_at(&self, row: usize, column: usize) -> bool {
        self.cell(row, column).is_none_or(Cell::is_empty)
    }

    fn step_right(&self) -> Option<(usize, usize)> {
        let row = self.cursor.row.unwrap_or(0);
        let len = self.row_len(row)?;
        let column = match self.cursor.column {
            Some(c) => (c + 1) % len,
            None => 0,
        };
        Some((row, column))
    }

    fn step_left(&self) -> Option<(usize, usize)> {
        let row = self.cursor.row.unwrap_or(0);
        let len = self.row_len(row)?;
        let mut column = match self.cursor.column {
            Some(c) => (c + len - 1) % len,
            None => len - 1,
        };
        for _ in 0..len {
            if !self.is_empty_at(row, column) {
                break;
            }
            column = (column + len - 1) % len;
        }
        Some((row, column))
    }

    fn step_up(&self) -> Option<(usize, usize)> {
        let count = self.rows.len();
        let row = match self.cursor.row {
            Some(r) => (r + count - 1) % count,
            None => count - 1,
        };
        self.clamped(row, self.cursor.column.unwrap_or(0))
    }

    fn step_down(&self) -> Option<(usize, usize)> {
        let count = self.rows.len();
        let row = match self.cursor.row {
            Some(r) => (r + 1) % count,
            None => 0,
        };
        self.clamped(row, self.cursor.column.unwrap_or(0))
    }

    fn clamped(&self, row: usize, column: usize) -> Option<(usize, usize)> {
        let len = self.row_len(row)?;
        Some((row, column.min(len - 1)))
    }

    /// Forward scan off empty cells; runs after every move, including the
    /// backward skip of a left move.
    fn normalize(&self, row: usize, column: usize) -> Option<CursorPosition> {
        let len = self.row_len(row)?;
        let mut column = column % len;
        for _ in 0..len {
            if !self.is_empty_at(row, column) {
                return Some(CursorPosition::at(row, column));
            }
            column = (column + 1) % len;
        }
        None
    }
}

/// Business days of the anchor's month, one row per week. The first row is
/// padded so Monday is always column 0.
fn month_rows(anchor: NaiveDate) -> Vec<Vec<Cell>> {
    let mut rows = Vec::new();
    let mut current: Vec<Cell> = Vec::new();
    for dd in date_range::month(anchor)
        .into_iter()
        .filter(|dd| !dd.is_weekend())
    {
        if rows.is_empty() && current.is_empty() {
            current.extend((0..dd.weekday).map(|_| Cell::Empty));
        }
        let friday = dd.weekday == 4;
        current.push(Cell::Date(dd));
        if friday {
            rows.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn selected_key(grid: &NavigationGrid) -> Option<String> {
        grid.selected().map(|dd| dd.key.clone())
    }

    fn week_grid() -> NavigationGrid {
        NavigationGrid::build(ViewMode::Week, d(2024, 1, 10))
    }

    /// February 2024 starts on a Thursday.
    fn february_grid() -> NavigationGrid {
        NavigationGrid::build(ViewMode::Month, d(2024, 2, 14))
    }

    fn date(y: i32, m: u32, day: u32) -> Cell {
        Cell::Date(DateDescriptor::new(d(y, m, day)))
    }

    // ── construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_day_grid_has_no_rows() {
        let grid = NavigationGrid::build(ViewMode::Day, d(2024, 1, 10));
        assert!(grid.rows().is_empty());
        assert_eq!(grid.cursor(), CursorPosition::default());
    }

    #[test]
    fn test_week_grid_is_one_row_of_five_dates() {
        let grid = week_grid();
        assert_eq!(grid.rows().len(), 1);
        assert_eq!(grid.rows()[0].len(), 5);
        assert!(grid.rows()[0].iter().all(|c| !c.is_empty()));
        assert_eq!(grid.rows()[0][0].date().unwrap().key, "08.01.2024");
    }

    #[test]
    fn test_month_grid_pads_first_row() {
        let grid = february_grid();
        let rows = grid.rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].len(), 5);
        assert!(rows[0][..3].iter().all(Cell::is_empty));
        assert_eq!(rows[0][3].date().unwrap().key, "01.02.2024");
        assert_eq!(rows[0][4].date().unwrap().key, "02.02.2024");
        assert_eq!(rows[1][0].date().unwrap().key, "05.02.2024");
        // 26.–29.02. is Monday through Thursday
        assert_eq!(rows[4].len(), 4);
        assert_eq!(rows[4][3].date().unwrap().key, "29.02.2024");
    }

    #[test]
    fn test_month_grid_starting_on_weekend_has_no_padding() {
        // June 2024 starts on a Saturday and ends on a Sunday
        let grid = NavigationGrid::build(ViewMode::Month, d(2024, 6, 20));
        let rows = grid.rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0].date().unwrap().key, "03.06.2024");
        assert!(rows.iter().all(|r| r.len() == 5));
        assert_eq!(rows[3][4].date().unwrap().key, "28.06.2024");
    }

    #[test]
    fn test_month_grid_never_contains_weekends() {
        for m in 1..=12 {
            let grid = NavigationGrid::build(ViewMode::Month, d(2025, m, 1));
            for row in grid.rows() {
                assert!(row.len() <= 5);
                for cell in row {
                    if let Some(dd) = cell.date() {
                        assert!(!dd.is_weekend());
                    }
                }
            }
            // only the first row may hold padding
            assert!(grid.rows()[1..].iter().flatten().all(|c| !c.is_empty()));
        }
    }

    #[test]
    fn test_month_grid_columns_line_up_with_weekdays() {
        let grid = NavigationGrid::build(ViewMode::Month, d(2025, 10, 1));
        for row in grid.rows() {
            for (col, cell) in row.iter().enumerate() {
                if let Some(dd) = cell.date() {
                    assert_eq!(dd.weekday as usize, col);
                }
            }
        }
    }

    // ── horizontal movement ───────────────────────────────────────────────────

    #[test]
    fn test_move_right_from_unset_selects_monday() {
        let mut grid = week_grid();
        grid.move_cursor(Direction::Right);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 0));
        assert_eq!(selected_key(&grid).as_deref(), Some("08.01.2024"));
    }

    #[test]
    fn test_move_left_from_unset_selects_friday() {
        let mut grid = week_grid();
        grid.move_cursor(Direction::Left);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 4));
    }

    #[test]
    fn test_move_right_five_times_wraps_to_start() {
        for start in 0..5 {
            let mut grid = week_grid();
            grid.move_cursor(Direction::Right);
            for _ in 0..start {
                grid.move_cursor(Direction::Right);
            }
            let origin = grid.cursor();
            for _ in 0..5 {
                grid.move_cursor(Direction::Right);
            }
            assert_eq!(grid.cursor(), origin);
        }
    }

    #[test]
    fn test_move_left_wraps_from_monday_to_friday() {
        let mut grid = week_grid();
        grid.move_cursor(Direction::Right);
        grid.move_cursor(Direction::Left);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 4));
    }

    #[test]
    fn test_move_right_skips_padding_forward() {
        let mut grid = february_grid();
        grid.move_cursor(Direction::Right);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 3));
        assert_eq!(selected_key(&grid).as_deref(), Some("01.02.2024"));
        grid.move_cursor(Direction::Right);
        grid.move_cursor(Direction::Right);
        // Friday wraps past the padding back to Thursday the 1st
        assert_eq!(grid.cursor(), CursorPosition::at(0, 3));
    }

    #[test]
    fn test_move_left_skips_padding_backward_then_wraps() {
        let mut grid = february_grid();
        grid.move_cursor(Direction::Right);
        grid.move_cursor(Direction::Left);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 4));
        assert_eq!(selected_key(&grid).as_deref(), Some("02.02.2024"));
        grid.move_cursor(Direction::Left);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 3));
    }

    #[test]
    fn test_gap_is_skipped_in_both_directions() {
        // Left skips the gap backward itself; right relies on normalization.
        let mut grid = NavigationGrid::from_rows(vec![vec![
            date(2024, 1, 8),
            Cell::Empty,
            date(2024, 1, 10),
        ]]);
        grid.move_cursor(Direction::Left);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 2));
        grid.move_cursor(Direction::Left);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 0));
        grid.move_cursor(Direction::Right);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 2));
        grid.move_cursor(Direction::Right);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 0));
    }

    // ── vertical movement ─────────────────────────────────────────────────────

    #[test]
    fn test_move_up_from_unset_selects_last_row() {
        let mut grid = february_grid();
        grid.move_cursor(Direction::Up);
        assert_eq!(grid.cursor(), CursorPosition::at(4, 0));
        assert_eq!(selected_key(&grid).as_deref(), Some("26.02.2024"));
    }

    #[test]
    fn test_move_down_from_unset_normalizes_into_first_row() {
        let mut grid = february_grid();
        grid.move_cursor(Direction::Down);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 3));
    }

    #[test]
    fn test_move_down_wraps_to_first_row() {
        let mut grid = february_grid();
        grid.move_cursor(Direction::Up);
        grid.move_cursor(Direction::Down);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 3));
    }

    #[test]
    fn test_move_down_clamps_column_to_short_row() {
        let mut grid = february_grid();
        grid.move_cursor(Direction::Left); // Friday 2nd
        for _ in 0..3 {
            grid.move_cursor(Direction::Down);
        }
        assert_eq!(selected_key(&grid).as_deref(), Some("23.02.2024"));
        grid.move_cursor(Direction::Down);
        assert_eq!(grid.cursor(), CursorPosition::at(4, 3));
        assert_eq!(selected_key(&grid).as_deref(), Some("29.02.2024"));
    }

    #[test]
    fn test_move_up_into_padding_moves_forward() {
        let mut grid = february_grid();
        grid.move_cursor(Direction::Down);
        grid.move_cursor(Direction::Down);
        grid.move_cursor(Direction::Left);
        grid.move_cursor(Direction::Left);
        assert_eq!(selected_key(&grid).as_deref(), Some("06.02.2024"));
        grid.move_cursor(Direction::Up);
        assert_eq!(selected_key(&grid).as_deref(), Some("01.02.2024"));
    }

    #[test]
    fn test_vertical_moves_in_week_grid_stay_put() {
        let mut grid = week_grid();
        grid.move_cursor(Direction::Right);
        grid.move_cursor(Direction::Right);
        grid.move_cursor(Direction::Down);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 1));
        grid.move_cursor(Direction::Up);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 1));
    }

    // ── degenerate grids ──────────────────────────────────────────────────────

    #[test]
    fn test_moves_on_empty_grid_are_noops() {
        let mut grid = NavigationGrid::from_rows(Vec::new());
        for dir in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
            grid.move_cursor(dir);
            assert_eq!(grid.cursor(), CursorPosition::default());
        }
    }

    #[test]
    fn test_moves_on_zero_length_row_are_noops() {
        let mut grid = NavigationGrid::from_rows(vec![Vec::new()]);
        for dir in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
            grid.move_cursor(dir);
            assert_eq!(grid.cursor(), CursorPosition::default());
        }
    }

    #[test]
    fn test_moves_on_all_empty_row_terminate() {
        let mut grid =
            NavigationGrid::from_rows(vec![vec![Cell::Empty, Cell::Empty, Cell::Empty]]);
        for dir in [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ] {
            grid.move_cursor(dir);
            assert_eq!(grid.cursor(), CursorPosition::default());
        }
        assert!(grid.selected().is_none());
    }

    #[test]
    fn test_move_into_all_empty_row_keeps_previous_cursor() {
        let mut grid = NavigationGrid::from_rows(vec![
            vec![date(2024, 1, 8)],
            vec![Cell::Empty, Cell::Empty],
        ]);
        grid.move_cursor(Direction::Right);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 0));
        grid.move_cursor(Direction::Down);
        assert_eq!(grid.cursor(), CursorPosition::at(0, 0));
    }

    // ── select ────────────────────────────────────────────────────────────────

    #[test]
    fn test_select_without_cursor_is_none() {
        assert!(week_grid().selected().is_none());
    }

    #[test]
    fn test_select_returns_cell_under_cursor() {
        let mut grid = week_grid();
        grid.move_cursor(Direction::Left);
        let dd = grid.selected().unwrap();
        assert_eq!(dd.key, "12.01.2024");
        assert_eq!(dd.weekday, 4);
    }
}
