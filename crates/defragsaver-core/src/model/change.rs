/// Diff units emitted by the engine and consumed by the renderer.
use super::Cell;
use std::ops::Range;

/// A contiguous range `[start, start + len)` that was just set to `cell`.
///
/// Every change the engine emits is already clamped to the grid, so
/// `start + len <= total cells` always holds. Changes must be applied in
/// the order they were returned; later ones may overwrite earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentChange {
    pub start: usize,
    pub len: usize,
    pub cell: Cell,
}

impl SegmentChange {
    pub fn new(start: usize, len: usize, cell: Cell) -> Self {
        Self { start, len, cell }
    }

    /// Exclusive end index.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Apply this change to a shadow copy of the grid.
    ///
    /// Clamped to `cells.len()` so a stale change from before a resize
    /// cannot panic.
    pub fn apply_to(&self, cells: &mut [Cell]) {
        let end = self.end().min(cells.len());
        if self.start < end {
            cells[self.start..end].fill(self.cell);
        }
    }
}

/// The most recent relocation (or ambient nudge), kept for the status text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LastMove {
    pub from: usize,
    pub to: usize,
    pub len: usize,
}
