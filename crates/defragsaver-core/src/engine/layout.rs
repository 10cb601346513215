/// Initial disk layout: the procedurally generated map shown after a reset.
///
/// Layers are painted in a fixed order, each over the previous ones:
///
/// 1. everything `Regular`
/// 2. the last 18% `Empty` (unused tail)
/// 3. one `MftReserved` stripe at 6%
/// 4. one `SpaceHog` stripe at 72%
/// 5. 40 `Unmovable` stripes in the first 35%
/// 6. up to 140 `Fragmented` stripes, one row each
/// 7. 120 `Empty` holes, one row each
///
/// The MFT zone is laid down once and later layers paint around it, so the
/// reserved stripe is always intact right after a reset.
use super::{sample_length, DefragEngine};
use crate::model::Cell;
use rand::Rng;
use tracing::debug;

const EMPTY_TAIL_START_PERCENT: usize = 82;
const MFT_START_PERCENT: usize = 6;
const MFT_MIN_LEN: usize = 800;
const SPACE_HOG_START_PERCENT: usize = 72;
const SPACE_HOG_MIN_LEN: usize = 2_000;

const UNMOVABLE_STRIPES: usize = 40;
const UNMOVABLE_REGION_PERCENT: usize = 35;
const UNMOVABLE_MIN_LEN: usize = 120;
const UNMOVABLE_MAX_LEN: usize = 1_200;

const FRAGMENT_CANDIDATES: usize = 140;
const FRAGMENT_MIN_LEN: usize = 40;
const FRAGMENT_MAX_LEN: usize = 600;

const HOLES: usize = 120;
const HOLE_MIN_LEN: usize = 10;
const HOLE_MAX_LEN: usize = 200;

/// Paint the initial layers onto a grid that is already all `Regular`.
pub(crate) fn generate<R: Rng>(engine: &mut DefragEngine<R>) {
    let total = engine.cells.len();

    let tail = total * EMPTY_TAIL_START_PERCENT / 100;
    fill(&mut engine.cells, tail, total - tail, Cell::Empty);

    let mft_len = MFT_MIN_LEN.max(total / 400);
    fill(
        &mut engine.cells,
        total * MFT_START_PERCENT / 100,
        mft_len,
        Cell::MftReserved,
    );

    let hog_len = SPACE_HOG_MIN_LEN.max(total / 120);
    fill(
        &mut engine.cells,
        total * SPACE_HOG_START_PERCENT / 100,
        hog_len,
        Cell::SpaceHog,
    );

    let unmovable_region = (total * UNMOVABLE_REGION_PERCENT / 100).max(1);
    for _ in 0..UNMOVABLE_STRIPES {
        let start = engine.rng.random_range(0..unmovable_region);
        let len = engine
            .rng
            .random_range(UNMOVABLE_MIN_LEN..UNMOVABLE_MAX_LEN);
        fill_around_mft(&mut engine.cells, start, len, Cell::Unmovable);
    }

    for _ in 0..FRAGMENT_CANDIDATES {
        let (start, len) = row_stripe(engine, FRAGMENT_MIN_LEN, FRAGMENT_MAX_LEN);
        if engine.cells[start] == Cell::MftReserved {
            continue;
        }
        if fill_around_mft(&mut engine.cells, start, len, Cell::Fragmented) {
            engine.fragmented_segments += 1;
        }
    }

    // Holes also skip the MFT stripe, which must survive a reset whole.
    for _ in 0..HOLES {
        let (start, len) = row_stripe(engine, HOLE_MIN_LEN, HOLE_MAX_LEN);
        fill_around_mft(&mut engine.cells, start, len, Cell::Empty);
    }

    debug!(
        width = engine.width,
        height = engine.height,
        fragmented = engine.fragmented_segments,
        "generated disk layout"
    );
}

/// Random stripe `(start, len)` that ends on or before its row's right edge.
fn row_stripe<R: Rng>(engine: &mut DefragEngine<R>, min_len: usize, max_len: usize) -> (usize, usize) {
    let (start, remaining) = engine.random_row_start();
    let len = sample_length(&mut engine.rng, min_len, remaining.min(max_len));
    (start, len)
}

/// Clamp `[start, start + len)` to the grid; returns the clamped range end,
/// or `None` if the range is empty.
fn clamp(cells: &[Cell], start: usize, len: usize) -> Option<usize> {
    let end = start.saturating_add(len).min(cells.len());
    (start < end).then_some(end)
}

fn fill(cells: &mut [Cell], start: usize, len: usize, cell: Cell) {
    if let Some(end) = clamp(cells, start, len) {
        cells[start..end].fill(cell);
    }
}

/// Like [`fill`] but leaves `MftReserved` cells untouched.
///
/// Returns `true` if the clamped range was non-empty.
fn fill_around_mft(cells: &mut [Cell], start: usize, len: usize, cell: Cell) -> bool {
    let Some(end) = clamp(cells, start, len) else {
        return false;
    };
    for c in &mut cells[start..end] {
        if *c != Cell::MftReserved {
            *c = cell;
        }
    }
    true
}
