use crate::error::{Error, Result};

/// Byte a freshly grown cell holds.
pub const BLANK: u8 = b' ';

/// The program space: rows of bytes, split from the source on `\n`.
///
/// Rows may differ in length. `read` and `write` grow the grid toward
/// larger coordinates on demand and never shrink it. Pointer movement
/// only wraps within the current bounds (see [`Grid::dimensions_at`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<u8>>,
}

impl Grid {
    pub fn new(source: &[u8]) -> Self {
        let rows = source.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect();
        Self { rows }
    }

    /// Read the cell at (x, y), growing the grid to include it.
    pub fn read(&mut self, x: i64, y: i64) -> Result<u8> {
        let (col, row) = self.grow_to(x, y)?;
        Ok(self.rows[row][col])
    }

    /// Store the low byte of `val` at (x, y), growing the grid to include it.
    pub fn write(&mut self, x: i64, y: i64, val: i64) -> Result<()> {
        let (col, row) = self.grow_to(x, y)?;
        self.rows[row][col] = val as u8;
        Ok(())
    }

    /// Read without growing. Cells outside the grid read as blank.
    pub fn peek(&self, x: usize, y: usize) -> u8 {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(BLANK)
    }

    /// Current row count and the length of row `y` (0 if it does not exist).
    pub fn dimensions_at(&self, y: usize) -> (usize, usize) {
        (self.rows.len(), self.rows.get(y).map_or(0, Vec::len))
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    fn grow_to(&mut self, x: i64, y: i64) -> Result<(usize, usize)> {
        let out_of_range = || Error::OutOfRange { x, y };
        let col = usize::try_from(x).map_err(|_| out_of_range())?;
        let row = usize::try_from(y).map_err(|_| out_of_range())?;

        if row >= self.rows.len() {
            let len = row.checked_add(1).ok_or_else(out_of_range)?;
            self.rows
                .try_reserve(len - self.rows.len())
                .map_err(|_| out_of_range())?;
            self.rows.resize_with(len, Vec::new);
        }
        let cells = &mut self.rows[row];
        if col >= cells.len() {
            let len = col.checked_add(1).ok_or_else(out_of_range)?;
            cells.try_reserve(len - cells.len()).map_err(|_| out_of_range())?;
            cells.resize(len, BLANK);
        }
        Ok((col, row))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn reads_never_shrink(
            source in prop::collection::vec(any::<u8>(), 0..64),
            coords in prop::collection::vec((0i64..32, 0i64..32), 1..16)
        ) {
            let mut grid = Grid::new(&source);
            for (x, y) in coords {
                let before: Vec<usize> = grid.rows().iter().map(Vec::len).collect();
                grid.read(x, y).unwrap();
                let after: Vec<usize> = grid.rows().iter().map(Vec::len).collect();
                prop_assert!(after.len() >= before.len());
                for (b, a) in before.iter().zip(&after) {
                    prop_assert!(a >= b);
                }
                let (rows, len) = grid.dimensions_at(y as usize);
                prop_assert!(rows > y as usize);
                prop_assert!(len > x as usize);
            }
        }
    }
}
