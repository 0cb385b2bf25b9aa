use std::{
    error,
    fmt::Display,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use clap::Parser;
use log::debug;

pub mod layout;
pub mod rule;
pub mod seat_map;

pub use layout::{Cell, Direction, Layout, LayoutBuilder, Position};
pub use rule::{
    ChgForOccupiedN, Env8Neighbors, LineOfSight, NeighborCounter, NeighborRule, SeatRule,
};
pub use seat_map::{Occupancy, SeatMap};

#[derive(Debug)]
pub enum Error {
    IOError(io::Error),
    InconsistentRow(usize, usize), // (element count of current row, expect count of elements in earlier row).
    InvalidSeatChar(char),
    EmptyLayout,
    NotConverged(usize), // Maximum count of changing steps allowed.
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IOError(ioe) => write!(f, "I/O error: {}", ioe),
            Error::InconsistentRow(cur_count, expect_count) => write!(
                f,
                "Given row({} elements), expect row which have {} elements.",
                cur_count, expect_count
            ),
            Error::InvalidSeatChar(c) => write!(f, "Invalid character({}) for seat", c),
            Error::EmptyLayout => write!(f, "Given seats layout has no tile."),
            Error::NotConverged(max_steps) => write!(
                f,
                "Seats still change after {} step(s), give up.",
                max_steps
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
    /// Fail if seats still change after this many steps.
    #[arg(long)]
    pub max_steps: Option<usize>,
}

pub fn read_layout<P: AsRef<Path>>(path: P) -> Result<Layout, Error> {
    let file = File::open(path).map_err(Error::IOError)?;
    let reader = BufReader::new(file);
    let mut builder = LayoutBuilder::new();
    for l in reader.lines() {
        let s = l.map_err(Error::IOError)?;
        builder.push_row(&s)?;
    }

    let layout = builder.build()?;
    debug!(
        "Read seats layout of {}x{} tiles, {} seat(s).",
        layout.row_n(),
        layout.col_n(),
        layout.seat_n()
    );
    Ok(layout)
}

/// Runs a fresh seat map of `layout` under `rule` until no seat changes, returns the count of occupied seats then.
pub fn simulate(layout: &Layout, rule: NeighborRule) -> usize {
    let mut seat_map = SeatMap::new(layout.clone());
    seat_map.stabilize(rule.counter(), &rule.seat_rule());
    seat_map.occupied_n()
}
