/// End-to-end engine tests.
///
/// These drive the public `DefragEngine` API exactly the way a renderer
/// does: reset once, then step repeatedly while mirroring the grid in a
/// shadow buffer built only from `cell_at` and the returned changes.
use defragsaver_core::model::Cell;
use defragsaver_core::DefragEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Copy the grid through the per-index accessor, the way a full redraw does.
fn snapshot(engine: &DefragEngine<impl rand::Rng>) -> Vec<Cell> {
    (0..engine.len()).map(|i| engine.cell_at(i)).collect()
}

fn fresh(width: usize, height: usize) -> DefragEngine {
    let mut engine = DefragEngine::new(0xD15C_DEF4);
    engine.reset(width, height);
    engine
}

/// Pull the first `NN.N%` number out of a status line.
fn percent_in(line: &str) -> f64 {
    let end = line.find('%').expect("status line has no percentage");
    let start = line[..end]
        .rfind(|c: char| !(c.is_ascii_digit() || c == '.'))
        .map_or(0, |i| i + 1);
    line[start..end].parse().expect("percentage is not numeric")
}

// ── Reset ────────────────────────────────────────────────────────────────────

/// Every dimension combination yields exactly `width * height` cells.
#[test]
fn reset_produces_full_grid() {
    let mut engine = DefragEngine::new(1);
    for (w, h) in [(1, 1), (7, 3), (100, 50), (320, 200), (1, 2_000)] {
        engine.reset(w, h);
        assert_eq!(engine.len(), w * h);
        assert_eq!(engine.width(), w);
        assert_eq!(engine.height(), h);
        assert_eq!(snapshot(&engine).len(), w * h);
    }
}

/// Zero dimensions are clamped up to one rather than rejected.
#[test]
fn reset_clamps_zero_dimensions() {
    let mut engine = DefragEngine::new(1);
    engine.reset(0, 0);
    assert_eq!((engine.width(), engine.height(), engine.len()), (1, 1, 1));
    engine.reset(0, 9);
    assert_eq!(engine.len(), 9);
}

/// Two engines with the same seed generate the same map.
#[test]
fn reset_is_deterministic_for_a_seed() {
    let mut a = DefragEngine::new(99);
    let mut b = DefragEngine::new(99);
    a.reset(160, 90);
    b.reset(160, 90);
    assert_eq!(a.cells(), b.cells());
    assert_eq!(a.fragmented_segments(), b.fragmented_segments());

    let mut c = DefragEngine::new(100);
    c.reset(160, 90);
    assert_ne!(a.cells(), c.cells());
}

/// Any `rand::Rng` can drive the engine.
#[test]
fn engine_accepts_a_substituted_stream() {
    let mut a = DefragEngine::with_rng(StdRng::seed_from_u64(5));
    let mut b = DefragEngine::with_rng(StdRng::seed_from_u64(5));
    a.reset(64, 48);
    b.reset(64, 48);
    assert_eq!(a.step(300), b.step(300));
    assert_eq!(a.cells(), b.cells());
}

/// The MFT zone for a 100×50 grid starts at 6% and is 800 clusters long.
#[test]
fn mft_zone_is_intact_after_reset() {
    let engine = fresh(100, 50);
    for i in 300..1_100 {
        assert_eq!(engine.cell_at(i), Cell::MftReserved, "index {i}");
    }
}

/// Reset clears the tick counter and last move.
#[test]
fn reset_clears_counters() {
    let mut engine = fresh(100, 50);
    engine.step(500);
    assert_eq!(engine.ticks(), 500);
    engine.reset(80, 40);
    assert_eq!(engine.ticks(), 0);
    assert_eq!(engine.last_move().len, 0);
}

// ── Step ─────────────────────────────────────────────────────────────────────

/// `step(0)` changes nothing and reports nothing.
#[test]
fn step_zero_is_a_noop() {
    let mut engine = fresh(100, 50);
    let before = engine.cells().to_vec();
    assert!(engine.step(0).is_empty());
    assert_eq!(engine.cells(), &before[..]);
    assert_eq!(engine.ticks(), 0);
}

/// Every emitted change lies inside the grid and is non-empty.
#[test]
fn changes_are_clamped_to_grid() {
    for (w, h) in [(100, 50), (13, 7), (1, 1), (500, 3)] {
        let mut engine = fresh(w, h);
        let total = w * h;
        for _ in 0..20 {
            for change in engine.step(37) {
                assert!(change.len > 0);
                assert!(change.end() <= total, "{change:?} exceeds {total}");
            }
        }
    }
}

/// Applying the returned changes in order to a shadow copy reproduces the
/// engine's grid exactly, step after step.
#[test]
fn changes_fully_describe_the_delta() {
    let mut engine = fresh(120, 80);
    let mut shadow = snapshot(&engine);

    for frame in 0..200 {
        for change in engine.step(13) {
            change.apply_to(&mut shadow);
        }
        assert_eq!(shadow, engine.cells(), "diverged at frame {frame}");
    }
}

/// The same holds across a busy-fade and an injection tick.
#[test]
fn shadow_survives_fade_and_injection_ticks() {
    let mut engine = fresh(200, 100);
    let mut shadow = snapshot(&engine);
    for change in engine.step(240) {
        change.apply_to(&mut shadow);
    }
    assert_eq!(engine.ticks(), 240);
    assert_eq!(shadow, engine.cells());
}

/// Steps produce visible motion: busy highlights appear and fade.
#[test]
fn steps_produce_busy_writes() {
    let mut engine = fresh(100, 50);
    let changes = engine.step(500);
    assert!(!changes.is_empty());
    assert!(changes.iter().any(|c| c.cell == Cell::Busy));
    assert!(changes.iter().any(|c| c.cell == Cell::Regular));
}

/// A relocation turns its source `Regular` and its destination `Busy`
/// within the same step.
#[test]
fn relocation_is_atomic_within_a_step() {
    let mut engine = fresh(200, 100);
    for _ in 0..100 {
        let changes = engine.step(1);
        let moved = engine.last_move();
        if moved.from == moved.to || changes.len() < 2 {
            continue;
        }
        let n = changes.len();
        let (src, dst) = (changes[n - 2], changes[n - 1]);
        if src.cell != Cell::Regular || dst.cell != Cell::Busy {
            continue;
        }
        assert_eq!(src.start, moved.from);
        assert_eq!(dst.start, moved.to);
        assert!(dst.start < src.start, "destination must precede source");
        assert!(dst.range().all(|i| engine.cell_at(i) == Cell::Busy));
        return;
    }
    panic!("no relocation observed in 100 ticks");
}

// ── Status ───────────────────────────────────────────────────────────────────

/// After 1000 ticks there are two lines and a percentage in `[0, 100)`.
#[test]
fn status_lines_after_steps() {
    let mut engine = fresh(100, 50);
    engine.step(1_000);
    let lines = engine.status_lines();
    assert_eq!(lines.len(), 2);
    let pct = percent_in(&lines[0]);
    assert!((0.0..100.0).contains(&pct), "percentage {pct} out of range");
    assert!((pct - 1_000.0 / 6_000.0 * 100.0).abs() < 0.1);
    assert!(lines[1].contains("Fragmented segments"));
}

/// Formatting the status does not mutate anything.
#[test]
fn status_lines_are_pure() {
    let mut engine = fresh(100, 50);
    engine.step(10);
    let before = engine.cells().to_vec();
    let first = engine.status_lines();
    let second = engine.status_lines();
    assert_eq!(first, second);
    assert_eq!(engine.cells(), &before[..]);
    assert_eq!(engine.ticks(), 10);
}

/// Out-of-range reads are harmless.
#[test]
fn cell_at_out_of_range_is_unknown() {
    let engine = fresh(10, 10);
    assert_eq!(engine.cell_at(100), Cell::Unknown);
    assert_eq!(engine.cell_at(usize::MAX), Cell::Unknown);
}
