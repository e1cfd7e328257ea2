use rand::Rng;

use crate::error::{Error, Result};
use crate::grid::Grid;

/// One of the four cardinal directions of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::South, Heading::East, Heading::West];

    /// Unit vector (dx, dy). y grows downward.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Heading::North => (0, -1),
            Heading::South => (0, 1),
            Heading::East => (1, 0),
            Heading::West => (-1, 0),
        }
    }

    /// Apply the rotation matrix for +90 degrees: (x, y) -> (-y, x).
    fn quarter_turn(self) -> Self {
        match self {
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
            Heading::North => Heading::East,
        }
    }
}

/// The instruction pointer: a position in the grid and a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    x: usize,
    y: usize,
    heading: Heading,
}

impl Default for Pointer {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            heading: Heading::East,
        }
    }
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// Pick one of the four headings uniformly at random.
    pub fn randomize_heading<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.heading = Heading::ALL[rng.gen_range(0..Heading::ALL.len())];
    }

    /// Rotate the heading by `degrees`, which must be a multiple of 90.
    /// Positive angles turn east toward south.
    pub fn rotate(&mut self, degrees: i32) -> Result<()> {
        if degrees % 90 != 0 {
            return Err(Error::InvalidRotation(degrees));
        }
        for _ in 0..(degrees / 90).rem_euclid(4) {
            self.heading = self.heading.quarter_turn();
        }
        Ok(())
    }

    /// Step one cell along the heading, wrapping the axis of travel within
    /// the grid's current bounds. x wraps by the length of the row being
    /// left; a vertical move keeps the column even across shorter rows.
    /// Never grows the grid.
    pub fn advance(&mut self, grid: &Grid) {
        let (rows, row_len) = grid.dimensions_at(self.y);
        match self.heading.delta() {
            (dx, 0) => self.x = wrap(self.x, dx, row_len),
            (_, dy) => self.y = wrap(self.y, dy, rows),
        }
    }
}

/// `(pos + delta) mod bound`, with an empty axis collapsing to 0.
fn wrap(pos: usize, delta: i64, bound: usize) -> usize {
    if bound == 0 {
        return 0;
    }
    (pos as i64 + delta).rem_euclid(bound as i64) as usize
}
