use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Floor,
    Seat,
}

impl TryFrom<char> for Cell {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '.' => Ok(Cell::Floor),
            'L' => Ok(Cell::Seat),
            other => Err(Error::InvalidSeatChar(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Direction {
    pub fn all() -> &'static [Direction] {
        static ALL_DIRS: Lazy<[Direction; 8]> = Lazy::new(|| {
            [
                Direction::TopLeft,
                Direction::Top,
                Direction::TopRight,
                Direction::Left,
                Direction::Right,
                Direction::BottomLeft,
                Direction::Bottom,
                Direction::BottomRight,
            ]
        });

        ALL_DIRS.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub r: usize,
    pub c: usize,
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    /// Position next to this one along `dir`, None if it would step off the top or left edge.
    /// Steps off the bottom or right edge are left to the grid lookups to reject.
    pub fn along_dir(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::TopLeft if self.r > 0 && self.c > 0 => {
                Some(Position::new(self.r - 1, self.c - 1))
            }
            Direction::Top if self.r > 0 => Some(Position::new(self.r - 1, self.c)),
            Direction::TopRight if self.r > 0 => Some(Position::new(self.r - 1, self.c + 1)),
            Direction::Left if self.c > 0 => Some(Position::new(self.r, self.c - 1)),
            Direction::Right => Some(Position::new(self.r, self.c + 1)),
            Direction::BottomLeft if self.c > 0 => Some(Position::new(self.r + 1, self.c - 1)),
            Direction::Bottom => Some(Position::new(self.r + 1, self.c)),
            Direction::BottomRight => Some(Position::new(self.r + 1, self.c + 1)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    cells: Vec<Cell>,
    row_n: usize,
    col_n: usize,
}

impl Layout {
    pub fn cell(&self, pos: &Position) -> Option<&Cell> {
        self.pos_to_ind(pos).map(|ind| &self.cells[ind])
    }

    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.row_n, self.col_n)
    }

    pub fn seat_n(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Seat).count()
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let col_n = self.col_n;
        (0..self.row_n).flat_map(move |r| (0..col_n).map(move |c| Position::new(r, c)))
    }

    fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if pos.r >= self.row_n || pos.c >= self.col_n {
            None
        } else {
            Some(pos.r * self.col_n + pos.c)
        }
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = LayoutBuilder::new();
        for l in s.lines() {
            builder.push_row(l)?;
        }

        builder.build()
    }
}

pub struct LayoutBuilder {
    cells: Vec<Cell>,
    row_n: usize,
    col_n: Option<usize>,
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            row_n: 0,
            col_n: None,
        }
    }

    pub fn push_row(&mut self, row_text: &str) -> Result<(), Error> {
        let row = row_text
            .chars()
            .map(Cell::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        self.push_cells(row)
    }

    pub(crate) fn push_cells(&mut self, row: Vec<Cell>) -> Result<(), Error> {
        let this_col_n = row.len();
        let expect_col_n = *self.col_n.get_or_insert(this_col_n);
        if expect_col_n != this_col_n {
            return Err(Error::InconsistentRow(this_col_n, expect_col_n));
        }

        self.cells.extend(row);
        self.row_n += 1;
        Ok(())
    }

    pub fn build(self) -> Result<Layout, Error> {
        let col_n = self.col_n.unwrap_or(0);
        if self.row_n == 0 || col_n == 0 {
            return Err(Error::EmptyLayout);
        }

        Ok(Layout {
            cells: self.cells,
            row_n: self.row_n,
            col_n,
        })
    }
}
