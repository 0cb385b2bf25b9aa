use crate::{
    layout::{Cell, Direction, Layout, Position},
    seat_map::Occupancy,
};

/// Counts the occupied seats a seat at `pos` takes into account.
pub trait NeighborCounter {
    fn occupied_neighbors(&self, layout: &Layout, occupancy: &Occupancy, pos: &Position)
        -> usize;
}

/// The 8 tiles around a seat, nothing beyond the edges.
pub struct Env8Neighbors;

impl NeighborCounter for Env8Neighbors {
    fn occupied_neighbors(
        &self,
        _layout: &Layout,
        occupancy: &Occupancy,
        pos: &Position,
    ) -> usize {
        Direction::all()
            .iter()
            .filter_map(|dir| pos.along_dir(*dir))
            .filter(|p| occupancy.is_occupied(p))
            .count()
    }
}

/// The first seat visible in each of the 8 directions, looking across floor.
pub struct LineOfSight;

impl LineOfSight {
    fn first_seat_along(layout: &Layout, pos: &Position, dir: Direction) -> Option<Position> {
        let mut cur_pos = *pos;
        loop {
            cur_pos = cur_pos.along_dir(dir)?;
            if *layout.cell(&cur_pos)? == Cell::Seat {
                return Some(cur_pos);
            }
        }
    }
}

impl NeighborCounter for LineOfSight {
    fn occupied_neighbors(
        &self,
        layout: &Layout,
        occupancy: &Occupancy,
        pos: &Position,
    ) -> usize {
        Direction::all()
            .iter()
            .filter_map(|dir| Self::first_seat_along(layout, pos, *dir))
            .filter(|p| occupancy.is_occupied(p))
            .count()
    }
}

/// Decides the next state of a seat from its current state and count of occupied neighbors.
pub trait SeatRule {
    fn next(&self, occupied: bool, occupied_neighbors: usize) -> bool;
}

/// Take an empty seat nobody is around, leave an occupied one once `tolerance` neighbors are occupied.
#[derive(Debug, Clone, Copy)]
pub struct ChgForOccupiedN {
    tolerance: usize,
}

impl ChgForOccupiedN {
    pub fn new(tolerance: usize) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> usize {
        self.tolerance
    }
}

impl SeatRule for ChgForOccupiedN {
    fn next(&self, occupied: bool, occupied_neighbors: usize) -> bool {
        match (occupied, occupied_neighbors) {
            (false, 0) => true,
            (true, n) if n >= self.tolerance => false,
            (org_state, _) => org_state,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborRule {
    Adjacent,
    LineOfSight,
}

impl NeighborRule {
    pub fn counter(&self) -> &'static dyn NeighborCounter {
        match self {
            NeighborRule::Adjacent => &Env8Neighbors,
            NeighborRule::LineOfSight => &LineOfSight,
        }
    }

    pub fn tolerance(&self) -> usize {
        match self {
            NeighborRule::Adjacent => 4,
            NeighborRule::LineOfSight => 5,
        }
    }

    pub fn seat_rule(&self) -> ChgForOccupiedN {
        ChgForOccupiedN::new(self.tolerance())
    }
}
