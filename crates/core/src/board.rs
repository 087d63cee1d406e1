//! board representation - width x height cells, row 0 is the floor
//! column heights and row widths are cached and kept in step with the cells
//! one-level transactions: place() opens a window, commit()/undo() closes it

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::{error, trace};

use crate::Piece;

/// Outcome of [`Board::place`]. Declaration order is load-bearing:
/// anything `>= OutOfBounds` is a failed placement.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlaceResult {
    Ok = 0,
    RowFilled = 1,
    OutOfBounds = 2,
    BadCollision = 3,
}

impl PlaceResult {
    #[inline]
    pub fn is_failure(self) -> bool {
        self >= PlaceResult::OutOfBounds
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("place() while a placement is pending; commit() or undo() first")]
    PlaceWhileUncommitted,
    #[error("board has {height} rows but {rows} were given")]
    TooManyRows { rows: usize, height: usize },
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unexpected cell {cell:?} in row {row}")]
    InvalidCell { row: usize, cell: char },
}

/// Cells plus the derived arrays. Column-major: cell (x, y) lives at `x * height + y`.
#[derive(Clone, PartialEq, Eq, Debug)]
struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    heights: Vec<usize>,
    widths: Vec<usize>,
}

impl Grid {
    fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
            heights: vec![0; width],
            widths: vec![0; height],
        }
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    #[inline(always)]
    fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Fill an empty cell and update both derived arrays in O(1).
    #[inline]
    fn fill(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        self.cells[idx] = true;
        self.widths[y] += 1;
        if self.heights[x] < y + 1 {
            self.heights[x] = y + 1;
        }
    }

    fn recompute(&mut self) {
        self.widths.iter_mut().for_each(|w| *w = 0);
        for x in 0..self.width {
            let column = &self.cells[x * self.height..(x + 1) * self.height];
            self.heights[x] = column.iter().rposition(|&c| c).map_or(0, |y| y + 1);
            for (y, &filled) in column.iter().enumerate() {
                if filled {
                    self.widths[y] += 1;
                }
            }
        }
    }

    #[inline]
    fn is_row_full(&self, y: usize) -> bool {
        self.width > 0 && self.widths[y] == self.width
    }

    /// Compact the surviving rows downward, two-pointer style.
    fn clear_full_rows(&mut self) -> usize {
        let mut write = 0;
        for read in 0..self.height {
            if self.is_row_full(read) {
                continue;
            }
            if write != read {
                for x in 0..self.width {
                    let from = self.index(x, read);
                    let to = self.index(x, write);
                    self.cells[to] = self.cells[from];
                }
            }
            write += 1;
        }

        let cleared = self.height - write;
        if cleared > 0 {
            for y in write..self.height {
                for x in 0..self.width {
                    let idx = self.index(x, y);
                    self.cells[idx] = false;
                }
            }
            self.recompute();
        }
        cleared
    }
}

/// Board with one-level undo.
///
/// The live grid is what queries see. `saved` is the snapshot taken at the
/// last commit boundary; `undo()` copies it back over the live grid. Between a
/// `place()` and the matching `commit()`/`undo()` the board is uncommitted and
/// a second `place()` is refused.
///
/// Equality looks at the live cells and the committed flag only. Two
/// uncommitted boards with the same cells are equal even when `undo()` would
/// take them to different places.
#[derive(Clone, Debug)]
pub struct Board {
    live: Grid,
    saved: Grid,
    committed: bool,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        // a committed board's snapshot always matches its live grid
        self.committed == other.committed && self.live == other.live
    }
}

impl Eq for Board {}

impl Board {
    /// Empty, committed board.
    pub fn new(width: usize, height: usize) -> Self {
        let live = Grid::empty(width, height);
        Self {
            saved: live.clone(),
            live,
            committed: true,
        }
    }

    /// Build a committed board from rows listed bottom first.
    ///
    /// `#` or `+` marks a filled cell, `.` or a space an empty one. Rows not
    /// given stay empty.
    pub fn from_rows<S: AsRef<str>>(
        width: usize,
        height: usize,
        rows: &[S],
    ) -> Result<Self, BoardError> {
        if rows.len() > height {
            return Err(BoardError::TooManyRows {
                rows: rows.len(),
                height,
            });
        }

        let mut grid = Grid::empty(width, height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(BoardError::RaggedRow {
                    row: y,
                    found,
                    expected: width,
                });
            }
            for (x, cell) in row.chars().enumerate() {
                match cell {
                    '#' | '+' => grid.fill(x, y),
                    '.' | ' ' => {}
                    other => return Err(BoardError::InvalidCell { row: y, cell: other }),
                }
            }
        }

        Ok(Self {
            saved: grid.clone(),
            live: grid,
            committed: true,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.live.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.live.height
    }

    #[inline]
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Cell read. Anything outside the board reads as filled.
    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        match self.checked(i64::from(x), i64::from(y)) {
            Some((x, y)) => self.live.get(x, y),
            None => true,
        }
    }

    /// y of the highest filled cell plus one; 0 for an empty column.
    #[inline]
    pub fn column_height(&self, x: usize) -> usize {
        self.live.heights[x]
    }

    /// Filled cells in row `y`.
    #[inline]
    pub fn row_width(&self, y: usize) -> usize {
        self.live.widths[y]
    }

    #[inline]
    pub fn heights(&self) -> &[usize] {
        &self.live.heights
    }

    #[inline]
    pub fn row_widths(&self) -> &[usize] {
        &self.live.widths
    }

    pub fn max_height(&self) -> usize {
        self.live.heights.iter().copied().max().unwrap_or(0)
    }

    /// Row where `piece` comes to rest when dropped straight down at `x`.
    ///
    /// O(piece width): each column only needs its height and the skirt.
    /// Columns past the right edge are ignored.
    pub fn drop_height(&self, piece: &Piece, x: usize) -> usize {
        piece
            .skirt()
            .iter()
            .enumerate()
            .filter(|&(i, _)| !piece.is_gap_column(i))
            .filter_map(|(i, &lowest)| {
                self.live
                    .heights
                    .get(x + i)
                    .map(|&h| h.saturating_sub(lowest as usize))
            })
            .max()
            .unwrap_or(0)
    }

    /// Copy the body of `piece` into the grid with its origin at (x, y).
    ///
    /// Opens a transaction: the caller must follow up with exactly one of
    /// `commit()` or `undo()`. On `OutOfBounds` or `BadCollision` the cells
    /// written so far stay written, and `undo()` is the way back.
    pub fn place(&mut self, piece: &Piece, x: i32, y: i32) -> Result<PlaceResult, BoardError> {
        if !self.committed {
            error!(x, y, "place() on an uncommitted board");
            return Err(BoardError::PlaceWhileUncommitted);
        }
        self.committed = false;

        let mut row_filled = false;
        for p in piece.body() {
            let cell = (i64::from(x) + i64::from(p.x), i64::from(y) + i64::from(p.y));
            let Some((px, py)) = self.checked(cell.0, cell.1) else {
                return Ok(PlaceResult::OutOfBounds);
            };
            if self.live.get(px, py) {
                return Ok(PlaceResult::BadCollision);
            }
            self.live.fill(px, py);
            row_filled |= self.live.is_row_full(py);
        }

        Ok(if row_filled {
            PlaceResult::RowFilled
        } else {
            PlaceResult::Ok
        })
    }

    /// Remove every full row, dropping the rows above. Returns rows removed.
    ///
    /// Works in either state. On a committed board the snapshot follows the
    /// cleared grid, so a later `undo()` never resurrects the rows.
    pub fn clear_rows(&mut self) -> usize {
        let cleared = self.live.clear_full_rows();
        if cleared > 0 {
            trace!(cleared, committed = self.committed, "rows cleared");
            if self.committed {
                self.saved.clone_from(&self.live);
            }
        }
        cleared
    }

    /// Roll back to the last commit. No-op when already committed.
    pub fn undo(&mut self) {
        if !self.committed {
            self.live.clone_from(&self.saved);
            self.committed = true;
        }
    }

    /// Accept the current grid as the new baseline. No-op when already committed.
    pub fn commit(&mut self) {
        if !self.committed {
            self.saved.clone_from(&self.live);
            self.committed = true;
        }
    }

    #[inline]
    fn checked(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.live.width && y < self.live.height).then_some((x, y))
    }

    fn row_string(&self, y: usize, filled: char, empty: char) -> String {
        (0..self.width())
            .map(|x| if self.live.get(x, y) { filled } else { empty })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height()).rev() {
            writeln!(f, "|{}|", self.row_string(y, '+', ' '))?;
        }
        write!(f, "{}", "-".repeat(self.width() + 2))
    }
}

/// Serialized as its rows, bottom first, `#` filled and `.` empty.
impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rows: Vec<String> = (0..self.height())
            .map(|y| self.row_string(y, '#', '.'))
            .collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows: Vec<String> = Vec::deserialize(deserializer)?;
        let width = rows.first().map_or(0, |row| row.chars().count());
        Board::from_rows(width, rows.len(), rows.as_slice()).map_err(de::Error::custom)
    }
}
