/// Return the smallest `s` such that `s * s >= count`. An empty set needs no
/// grid at all, so `grid_side(0)` is 0
pub fn grid_side(count: usize) -> usize {
    let s = count.isqrt();
    if s * s < count { s + 1 } else { s }
}

/// A square arrangement of `count` items, filled row by row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    side: usize,
    count: usize,
}

impl Grid {
    pub fn new(count: usize) -> Self {
        Self {
            side: grid_side(count),
            count,
        }
    }

    /// the number of rows, which is also the number of columns
    pub fn side(&self) -> usize {
        self.side
    }

    /// the number of items placed in the grid, not the number of cells
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// the (row, column) of item `index`, or None if there is no such item
    pub fn cell(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.count).then(|| (index / self.side, index % self.side))
    }

    /// iterate over every cell in the grid in row-major order, yielding the
    /// row, column, and the index of the item in that cell. cells past the
    /// last item yield None
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Option<usize>)> {
        let Self { side, count } = *self;
        // side * side can exceed usize::MAX even though count cannot
        (0..side).flat_map(move |row| {
            (0..side).map(move |col| {
                let item = row
                    .checked_mul(side)
                    .and_then(|i| i.checked_add(col))
                    .filter(|&i| i < count);
                (row, col, item)
            })
        })
    }
}
