use std::fmt::Display;

use log::{debug, trace};

use crate::{
    layout::{Cell, Layout, LayoutBuilder, Position},
    rule::{NeighborCounter, SeatRule},
    Error,
};

/// Which seats are taken, laid over a layout of the same size. Floor is never occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    occupied: Vec<bool>,
    row_n: usize,
    col_n: usize,
}

impl Occupancy {
    fn empty(row_n: usize, col_n: usize) -> Self {
        Self {
            occupied: vec![false; row_n * col_n],
            row_n,
            col_n,
        }
    }

    pub fn is_occupied(&self, pos: &Position) -> bool {
        self.pos_to_ind(pos).is_some_and(|ind| self.occupied[ind])
    }

    pub fn count(&self) -> usize {
        self.occupied.iter().filter(|o| **o).count()
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.row_n, self.col_n)
    }

    fn set(&mut self, pos: &Position, occupied: bool) {
        if let Some(ind) = self.pos_to_ind(pos) {
            self.occupied[ind] = occupied;
        }
    }

    fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if pos.r >= self.row_n || pos.c >= self.col_n {
            None
        } else {
            Some(pos.r * self.col_n + pos.c)
        }
    }
}

/// A seats layout with two occupancy buffers, one read and one written by each step.
#[derive(Debug, Clone)]
pub struct SeatMap {
    layout: Layout,
    occ_bufs: [Occupancy; 2],
    cur_buf_ind: usize,
}

impl SeatMap {
    pub fn new(layout: Layout) -> Self {
        let occ = Occupancy::empty(layout.row_n(), layout.col_n());
        Self {
            layout,
            occ_bufs: [occ.clone(), occ],
            cur_buf_ind: 0,
        }
    }

    /// Loads a state in the middle of a simulation, `#` is an occupied seat.
    pub fn from_snapshot(text: &str) -> Result<Self, Error> {
        let mut builder = LayoutBuilder::new();
        let mut occupied = Vec::new();
        for row_text in text.lines() {
            let row = row_text
                .chars()
                .map(|c| match c {
                    '#' => Ok((Cell::Seat, true)),
                    other => Cell::try_from(other).map(|cell| (cell, false)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            occupied.extend(row.iter().map(|(_, o)| *o));
            builder.push_cells(row.into_iter().map(|(cell, _)| cell).collect())?;
        }

        let layout = builder.build()?;
        let occ = Occupancy {
            occupied,
            row_n: layout.row_n(),
            col_n: layout.col_n(),
        };
        Ok(Self {
            layout,
            occ_bufs: [occ.clone(), occ],
            cur_buf_ind: 0,
        })
    }

    /// Computes the whole next occupancy from the current one, returns the count of seats changed.
    pub fn step<N, R>(&mut self, counter: &N, rule: &R) -> usize
    where
        N: NeighborCounter + ?Sized,
        R: SeatRule + ?Sized,
    {
        let layout = &self.layout;
        let (r_buf, w_buf) = Self::rw_buf(&mut self.occ_bufs, self.cur_buf_ind);
        let mut chg_count = 0;
        for pos in layout.positions() {
            match layout.cell(&pos) {
                Some(Cell::Seat) => {
                    let occupied = r_buf.is_occupied(&pos);
                    let neigh_occ_count = counter.occupied_neighbors(layout, r_buf, &pos);
                    let next = rule.next(occupied, neigh_occ_count);
                    if next != occupied {
                        chg_count += 1;
                    }
                    w_buf.set(&pos, next);
                }
                _ => w_buf.set(&pos, false),
            }
        }
        self.swap_buf();

        trace!("Step changed {} seat(s).", chg_count);
        chg_count
    }

    /// Steps until seats stop changing, returns the count of steps which changed anything.
    pub fn stabilize<N, R>(&mut self, counter: &N, rule: &R) -> usize
    where
        N: NeighborCounter + ?Sized,
        R: SeatRule + ?Sized,
    {
        let mut step_count = 0;
        while self.step(counter, rule) > 0 {
            step_count += 1;
        }

        debug!(
            "Stabilized after {} step(s), {} seat(s) occupied.",
            step_count,
            self.occupied_n()
        );
        step_count
    }

    /// Like `stabilize`, but fails once more than `max_steps` steps have changed seats.
    pub fn stabilize_within<N, R>(
        &mut self,
        counter: &N,
        rule: &R,
        max_steps: Option<usize>,
    ) -> Result<usize, Error>
    where
        N: NeighborCounter + ?Sized,
        R: SeatRule + ?Sized,
    {
        let Some(max_steps) = max_steps else {
            return Ok(self.stabilize(counter, rule));
        };

        let mut step_count = 0;
        while self.step(counter, rule) > 0 {
            step_count += 1;
            if step_count > max_steps {
                return Err(Error::NotConverged(max_steps));
            }
        }

        debug!(
            "Stabilized after {} step(s), {} seat(s) occupied.",
            step_count,
            self.occupied_n()
        );
        Ok(step_count)
    }

    pub fn neighbor_count<N: NeighborCounter + ?Sized>(
        &self,
        counter: &N,
        pos: &Position,
    ) -> usize {
        counter.occupied_neighbors(&self.layout, self.occupancy(), pos)
    }

    pub fn occupied_n(&self) -> usize {
        self.occupancy().count()
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occ_bufs[self.cur_buf_ind]
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn dims(&self) -> (usize, usize) {
        self.layout.dims()
    }

    fn rw_buf(bufs: &mut [Occupancy; 2], cur_buf_ind: usize) -> (&Occupancy, &mut Occupancy) {
        let (left, right) = bufs.split_at_mut(1);
        if cur_buf_ind == 0 {
            (&left[0], &mut right[0])
        } else {
            (&right[0], &mut left[0])
        }
    }

    fn swap_buf(&mut self) {
        self.cur_buf_ind = 1 - self.cur_buf_ind;
    }
}

impl Display for SeatMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let occupancy = self.occupancy();
        for r in 0..self.layout.row_n() {
            for c in 0..self.layout.col_n() {
                let pos = Position::new(r, c);
                let ch = match self.layout.cell(&pos) {
                    Some(Cell::Seat) if occupancy.is_occupied(&pos) => '#',
                    Some(Cell::Seat) => 'L',
                    _ => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
