/// Simulation engine: owns the grid and advances the animation.
///
/// The host calls [`DefragEngine::reset`] whenever the surface size changes,
/// then [`DefragEngine::step`] once per frame. Each step returns the ordered
/// list of [`SegmentChange`]s needed to bring a renderer's copy of the grid
/// up to date; applying them in order to a shadow copy reproduces the
/// engine's grid exactly.
///
/// All randomness flows through a single engine-owned `rand::Rng`, so two
/// engines built from the same seed produce identical grids and identical
/// change streams.
pub mod layout;

use crate::model::size::{format_clusters, format_count};
use crate::model::{Cell, LastMove, SegmentChange};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Busy runs are faded back to `Regular` on every Nth tick.
const BUSY_FADE_INTERVAL: u64 = 10;
/// Random probes per fade pass.
const BUSY_FADE_ATTEMPTS: usize = 12;
const BUSY_RUN_CAP: usize = 2_000;

/// New fragmentation is injected on every Nth tick.
const INJECT_INTERVAL: u64 = 240;
const INJECT_MAX_LEN: usize = 900;
const INJECT_MIN_LEN: usize = 40;
/// Injected stripes starting beyond this share of the disk are dropped.
const INJECT_LIMIT_PERCENT: usize = 86;

const FRAGMENT_PROBES: usize = 400;
const FRAGMENT_RUN_CAP: usize = 6_000;
const FRAGMENT_MIN_RUN: usize = 8;
const GAP_PROBES: usize = 120;
const GAP_RUN_CAP: usize = 8_000;
const GAP_MIN_LEN: usize = 20;
const MOVE_MIN_LEN: usize = 80;
const MOVE_MAX_LEN: usize = 1_200;

const NUDGE_MIN_LEN: usize = 30;
const NUDGE_MAX_LEN: usize = 260;

/// Ticks per full cycle of the fake progress percentage.
const PROGRESS_CYCLE: u64 = 6_000;

/// Static colour legend shown on the second status line.
pub const LEGEND: &str =
    "red = fragmented  blue = contiguous  white = writing  dark = free  teal = space hog  purple = MFT  grey = unmovable";

/// Draw a length in `[min(min_len, max_len), max_len]`, inclusive.
///
/// Returns 0 when `max_len` is 0. Every capped random length in the engine
/// goes through here so no stripe ever exceeds its caller's ceiling.
pub fn sample_length<R: Rng + ?Sized>(rng: &mut R, min_len: usize, max_len: usize) -> usize {
    if max_len == 0 {
        return 0;
    }
    rng.random_range(min_len.min(max_len)..=max_len)
}

/// A maximal run of same-state cells found by a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub len: usize,
}

/// A completed relocation of fragmented data into a free gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relocation {
    pub from: usize,
    pub to: usize,
    pub len: usize,
}

/// The disk map simulation.
#[derive(Debug, Clone)]
pub struct DefragEngine<R = SmallRng> {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    rng: R,
    ticks: u64,
    last_move: LastMove,
    /// Approximate; adjusted opportunistically and never recounted.
    fragmented_segments: u64,
}

impl DefragEngine<SmallRng> {
    /// Create an engine with a seeded `SmallRng` and a 1×1 grid.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DefragEngine<R> {
    /// Create an engine drawing from the given random stream.
    ///
    /// The grid starts as a single `Regular` cell; call [`reset`](Self::reset)
    /// before rendering.
    pub fn with_rng(rng: R) -> Self {
        Self {
            width: 1,
            height: 1,
            cells: vec![Cell::Regular],
            rng,
            ticks: 0,
            last_move: LastMove::default(),
            fragmented_segments: 0,
        }
    }

    /// Regenerate the grid for the given dimensions (clamped up to 1).
    ///
    /// Replaces the grid and every counter. Any `SegmentChange` produced
    /// before this call is invalid afterwards.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.ticks = 0;
        self.last_move = LastMove::default();
        self.fragmented_segments = 0;
        self.cells = vec![Cell::Regular; self.width * self.height];
        layout::generate(self);
    }

    /// Advance the simulation by `steps` ticks.
    ///
    /// Returns every change produced, in emission order. An empty list
    /// means nothing needs redrawing.
    pub fn step(&mut self, steps: u32) -> Vec<SegmentChange> {
        let mut changes = Vec::new();
        for _ in 0..steps {
            self.tick(&mut changes);
        }
        changes
    }

    /// Read one cell. Out-of-range indices read as [`Cell::Unknown`].
    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        self.cells.get(index).copied().unwrap_or(Cell::Unknown)
    }

    /// The two status-bar lines: progress and last move, then fragmentation
    /// count and colour legend.
    pub fn status_lines(&self) -> [String; 2] {
        // Truncated to tenths; rounding would show 100.0% at the end of a cycle.
        let tenths = self.ticks % PROGRESS_CYCLE * 1_000 / PROGRESS_CYCLE;
        let first = format!(
            "Defragmenting... {}.{}% complete | last move: {} from {} to {}",
            tenths / 10,
            tenths % 10,
            format_clusters(self.last_move.len),
            format_count(self.last_move.from as u64),
            format_count(self.last_move.to as u64),
        );
        let second = format!(
            "Fragmented segments: {} | {LEGEND}",
            format_count(self.fragmented_segments)
        );
        [first, second]
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: the grid holds at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The whole grid, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn fragmented_segments(&self) -> u64 {
        self.fragmented_segments
    }

    #[inline]
    pub fn last_move(&self) -> LastMove {
        self.last_move
    }

    // ── Tick ────────────────────────────────────────────────────────────

    fn tick(&mut self, out: &mut Vec<SegmentChange>) {
        self.ticks += 1;

        if self.ticks % BUSY_FADE_INTERVAL == 0 {
            self.fade_busy(BUSY_FADE_ATTEMPTS, out);
        }

        if self.ticks % INJECT_INTERVAL == 0 {
            self.inject_fragmentation(out);
        }

        if self.relocate(out).is_none() {
            self.nudge(out);
        }
    }

    // ── Painting ────────────────────────────────────────────────────────

    /// Write `cell` over `[start, start + len)`, clamped to the grid.
    ///
    /// Returns the clamped change, or `None` if nothing was written.
    fn paint(&mut self, start: usize, len: usize, cell: Cell) -> Option<SegmentChange> {
        let total = self.cells.len();
        let end = start.saturating_add(len).min(total);
        if start >= end {
            return None;
        }
        self.cells[start..end].fill(cell);
        Some(SegmentChange::new(start, end - start, cell))
    }

    /// Random row and column, returned as a flat start index plus the
    /// number of cells left before the row's right edge.
    fn random_row_start(&mut self) -> (usize, usize) {
        let row = self.rng.random_range(0..self.height);
        let col = self.rng.random_range(0..self.width);
        (row * self.width + col, self.width - col)
    }

    #[inline]
    fn random_index(&mut self) -> usize {
        self.rng.random_range(0..self.cells.len())
    }

    /// Length of the run of `cell` starting at `start`, capped at `cap`.
    fn run_len_from(&self, start: usize, cell: Cell, cap: usize) -> usize {
        self.cells[start..]
            .iter()
            .take(cap)
            .take_while(|&&c| c == cell)
            .count()
    }

    /// First index of the run of `cell` that contains `index`.
    fn run_start_of(&self, index: usize, cell: Cell) -> usize {
        let mut start = index;
        while start > 0 && self.cells[start - 1] == cell {
            start -= 1;
        }
        start
    }

    // ── Busy fade ───────────────────────────────────────────────────────

    /// Fade up to `max_segments` randomly probed `Busy` runs back to
    /// `Regular`. A probe that misses a `Busy` cell is simply spent.
    fn fade_busy(&mut self, max_segments: usize, out: &mut Vec<SegmentChange>) {
        for _ in 0..max_segments {
            let index = self.random_index();
            if self.cells[index] != Cell::Busy {
                continue;
            }
            let run = self.run_len_from(index, Cell::Busy, BUSY_RUN_CAP);
            out.extend(self.paint(index, run, Cell::Regular));
        }
    }

    // ── Fragmentation injection ─────────────────────────────────────────

    /// Scatter 2–5 fresh fragmented stripes so the map never settles.
    fn inject_fragmentation(&mut self, out: &mut Vec<SegmentChange>) {
        let limit = self.cells.len() * INJECT_LIMIT_PERCENT / 100;
        let count = self.rng.random_range(2..6);
        for _ in 0..count {
            let (start, remaining) = self.random_row_start();
            let len = sample_length(
                &mut self.rng,
                INJECT_MIN_LEN,
                remaining.min(INJECT_MAX_LEN),
            );
            if start > limit || len == 0 {
                continue;
            }
            if let Some(change) = self.paint(start, len, Cell::Fragmented) {
                self.fragmented_segments += 1;
                out.push(change);
            }
        }
    }

    // ── Relocation ──────────────────────────────────────────────────────

    /// Probe for a `Fragmented` cell and return its whole run.
    ///
    /// Runs shorter than the animation minimum are not worth moving.
    pub(crate) fn find_fragmented_run(&mut self) -> Option<Run> {
        let mut hit = None;
        for _ in 0..FRAGMENT_PROBES {
            let index = self.random_index();
            if self.cells[index] == Cell::Fragmented {
                hit = Some(index);
                break;
            }
        }
        let start = self.run_start_of(hit?, Cell::Fragmented);
        let len = self.run_len_from(start, Cell::Fragmented, FRAGMENT_RUN_CAP);
        (len >= FRAGMENT_MIN_RUN).then_some(Run { start, len })
    }

    /// Probe `[0, before)` for an `Empty` run of at least `min_len` cells.
    ///
    /// Returns a destination start inside the gap chosen so that `min_len`
    /// cells from it still fit inside the gap.
    pub(crate) fn find_gap(&mut self, before: usize, min_len: usize) -> Option<usize> {
        if before == 0 {
            return None;
        }
        for _ in 0..GAP_PROBES {
            let probe = self.rng.random_range(0..before);
            if self.cells[probe] != Cell::Empty {
                continue;
            }
            let start = self.run_start_of(probe, Cell::Empty);
            let len = self.run_len_from(start, Cell::Empty, GAP_RUN_CAP);
            if len >= min_len {
                let offset = self.rng.random_range(0..=len - min_len);
                return Some(start + offset);
            }
        }
        None
    }

    /// Move the head of one fragmented run into an earlier free gap.
    ///
    /// The source becomes `Regular` and the destination `Busy` within the
    /// same tick. Returns `None` when no run or gap was found.
    fn relocate(&mut self, out: &mut Vec<SegmentChange>) -> Option<Relocation> {
        let run = self.find_fragmented_run()?;
        let ceiling = run.len.min(MOVE_MAX_LEN);
        let to = self.find_gap(run.start, GAP_MIN_LEN.max(ceiling))?;

        let len = run
            .len
            .min(sample_length(&mut self.rng, MOVE_MIN_LEN, ceiling));
        out.extend(self.paint(run.start, len, Cell::Regular));
        out.extend(self.paint(to, len, Cell::Busy));

        self.fragmented_segments = self.fragmented_segments.saturating_sub(1);
        self.last_move = LastMove {
            from: run.start,
            to,
            len,
        };
        trace!(from = run.start, to, len, "relocated fragmented run");

        Some(Relocation {
            from: run.start,
            to,
            len,
        })
    }

    // ── Ambient nudge ───────────────────────────────────────────────────

    /// A small cosmetic write so every tick shows some motion.
    ///
    /// Never starts on the MFT zone.
    fn nudge(&mut self, out: &mut Vec<SegmentChange>) {
        let (start, remaining) = self.random_row_start();
        let len = sample_length(&mut self.rng, NUDGE_MIN_LEN, remaining.min(NUDGE_MAX_LEN));
        if self.cells[start] == Cell::MftReserved {
            return;
        }
        if let Some(change) = self.paint(start, len, Cell::Busy) {
            self.last_move = LastMove {
                from: start,
                to: start,
                len: change.len,
            };
            out.push(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(width: usize, height: usize, fill: Cell) -> DefragEngine {
        let mut engine = DefragEngine::new(7);
        engine.width = width;
        engine.height = height;
        engine.cells = vec![fill; width * height];
        engine
    }

    #[test]
    fn test_sample_length_bounds() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1_000 {
            let len = sample_length(&mut rng, 40, 600);
            assert!((40..=600).contains(&len));
        }
    }

    #[test]
    fn test_sample_length_ceiling_below_floor() {
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..200 {
            assert!(sample_length(&mut rng, 40, 5) <= 5);
        }
        assert_eq!(sample_length(&mut rng, 40, 0), 0);
    }

    #[test]
    fn test_paint_clamps_and_skips_empty() {
        let mut engine = engine_with(10, 1, Cell::Regular);
        let change = engine.paint(8, 50, Cell::Busy).unwrap();
        assert_eq!(change, SegmentChange::new(8, 2, Cell::Busy));
        assert!(engine.paint(10, 5, Cell::Busy).is_none());
        assert!(engine.paint(3, 0, Cell::Busy).is_none());
    }

    #[test]
    fn test_fade_busy_clears_whole_forward_run() {
        let mut engine = engine_with(10, 1, Cell::Busy);
        let mut out = Vec::new();
        // Every cell is busy, so the single probe always hits.
        engine.fade_busy(1, &mut out);
        assert_eq!(out.len(), 1);
        let change = out[0];
        assert_eq!(change.cell, Cell::Regular);
        assert_eq!(change.end(), 10);
        assert!(engine.cells[change.range()].iter().all(|&c| c == Cell::Regular));
    }

    #[test]
    fn test_fade_busy_ignores_non_busy() {
        let mut engine = engine_with(20, 5, Cell::Regular);
        let mut out = Vec::new();
        engine.fade_busy(BUSY_FADE_ATTEMPTS, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_find_fragmented_run_walks_to_start() {
        let mut engine = engine_with(100, 1, Cell::Regular);
        engine.cells[40..70].fill(Cell::Fragmented);
        let run = engine.find_fragmented_run().unwrap();
        assert_eq!(run, Run { start: 40, len: 30 });
    }

    #[test]
    fn test_find_fragmented_run_rejects_short_runs() {
        let mut engine = engine_with(50, 1, Cell::Fragmented);
        engine.cells.fill(Cell::Regular);
        engine.cells[10..15].fill(Cell::Fragmented);
        assert!(engine.find_fragmented_run().is_none());
    }

    #[test]
    fn test_find_gap_stays_inside_gap() {
        let mut engine = engine_with(200, 1, Cell::Regular);
        engine.cells[20..60].fill(Cell::Empty);
        for _ in 0..50 {
            let to = engine.find_gap(150, 25).unwrap();
            assert!((20..=35).contains(&to), "destination {to} does not fit");
        }
        assert!(engine.find_gap(150, 41).is_none());
        assert!(engine.find_gap(0, 1).is_none());
    }

    #[test]
    fn test_relocate_moves_into_earlier_gap() {
        let mut engine = engine_with(400, 1, Cell::Regular);
        engine.cells[10..110].fill(Cell::Empty);
        engine.cells[300..350].fill(Cell::Fragmented);
        engine.fragmented_segments = 1;

        let mut out = Vec::new();
        let moved = engine.relocate(&mut out).unwrap();
        assert_eq!(moved.from, 300);
        assert!(moved.to >= 10 && moved.to + moved.len <= 110);
        assert_eq!(moved.len, 50);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], SegmentChange::new(300, 50, Cell::Regular));
        assert_eq!(out[1], SegmentChange::new(moved.to, 50, Cell::Busy));
        assert_eq!(engine.fragmented_segments, 0);
        assert_eq!(
            engine.last_move,
            LastMove {
                from: 300,
                to: moved.to,
                len: 50
            }
        );
    }

    #[test]
    fn test_relocate_needs_gap_before_run() {
        let mut engine = engine_with(400, 1, Cell::Regular);
        engine.cells[0..100].fill(Cell::Fragmented);
        engine.cells[200..400].fill(Cell::Empty);
        let mut out = Vec::new();
        assert!(engine.relocate(&mut out).is_none());
        assert!(out.is_empty());
    }

    #[test]
    fn test_nudge_never_starts_on_mft() {
        let mut engine = engine_with(50, 4, Cell::MftReserved);
        let mut out = Vec::new();
        for _ in 0..100 {
            engine.nudge(&mut out);
        }
        assert!(out.is_empty());
        assert!(engine.cells.iter().all(|&c| c == Cell::MftReserved));
    }

    #[test]
    fn test_nudge_stays_within_row() {
        let mut engine = engine_with(50, 4, Cell::Regular);
        let mut out = Vec::new();
        for _ in 0..100 {
            engine.nudge(&mut out);
        }
        for change in out {
            assert_eq!(change.start / 50, (change.end() - 1) / 50);
            assert!(change.len <= NUDGE_MAX_LEN);
        }
    }

    #[test]
    fn test_inject_respects_tail_limit() {
        let mut engine = engine_with(100, 100, Cell::Regular);
        let mut out = Vec::new();
        for _ in 0..50 {
            engine.inject_fragmentation(&mut out);
        }
        let limit = engine.cells.len() * INJECT_LIMIT_PERCENT / 100;
        assert!(!out.is_empty());
        assert!(out.iter().all(|c| c.start <= limit && c.cell == Cell::Fragmented));
        assert_eq!(engine.fragmented_segments, out.len() as u64);
        for change in &out {
            assert_eq!(change.start / 100, (change.end() - 1) / 100, "{change:?} wraps");
            assert!(change.len <= INJECT_MAX_LEN);
        }
    }

    #[test]
    fn test_relocate_counter_saturates_at_zero() {
        let mut engine = engine_with(400, 1, Cell::Regular);
        engine.cells[0..100].fill(Cell::Empty);
        engine.cells[200..260].fill(Cell::Fragmented);
        engine.fragmented_segments = 0;

        let mut out = Vec::new();
        assert!(engine.relocate(&mut out).is_some());
        assert_eq!(engine.fragmented_segments, 0);
    }

    #[test]
    fn test_status_lines_never_reach_hundred_percent() {
        let mut engine = engine_with(10, 10, Cell::Regular);
        for ticks in [5_994, 5_996, 5_997, 5_999] {
            engine.ticks = ticks;
            let [first, _] = engine.status_lines();
            assert!(first.contains("99.9%"), "{first}");
        }
        engine.ticks = 5_999;
        let first = &engine.status_lines()[0];
        let pct: f64 = first["Defragmenting... ".len()..first.find('%').unwrap()]
            .parse()
            .unwrap();
        assert!(pct < 100.0);
    }

    #[test]
    fn test_status_lines_progress_wraps() {
        let mut engine = engine_with(10, 10, Cell::Regular);
        engine.ticks = PROGRESS_CYCLE + 3_000;
        let [first, second] = engine.status_lines();
        assert!(first.contains("50.0%"), "{first}");
        assert!(second.starts_with("Fragmented segments: 0"));
        assert!(second.contains("dark = free"), "{second}");
    }
}
