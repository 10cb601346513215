//! DefragSaver application icon generator.
//!
//! Produces a procedural icon: a rounded dark tile holding a miniature
//! disk map (a few rows of coloured clusters with one white "write" run).
//! Rendered at any resolution as RGBA pixel data for the window icon.

use crate::theme;
use defragsaver_core::model::Cell;

/// The miniature map, one row per line. Each character is a cluster.
///
/// `.` empty, `r` regular, `f` fragmented, `b` busy, `m` MFT, `u` unmovable.
const PATTERN: [&str; 6] = [
    "rrmmmrrf",
    "rfrrbbbr",
    "urrffrr.",
    "rr.rrfrr",
    "frr..rrr",
    "rrrf....",
];

/// Generate a DefragSaver icon as egui `IconData`.
pub fn generate_icon(size: u32) -> egui::IconData {
    egui::IconData {
        rgba: render_icon(size),
        width: size,
        height: size,
    }
}

/// Render the icon into an RGBA pixel buffer (top-to-bottom row order).
pub fn render_icon(size: u32) -> Vec<u8> {
    let s = size as f32;
    let mut pixels = vec![0u8; (size * size * 4) as usize];

    let corner = s * 0.16;
    let margin = s * 0.12;
    let cols = PATTERN[0].len() as f32;
    let rows = PATTERN.len() as f32;
    let pitch_x = (s - 2.0 * margin) / cols;
    let pitch_y = (s - 2.0 * margin) / rows;
    let gap = (s * 0.02).max(1.0);
    let tile = [0x10, 0x10, 0x1c];

    for y in 0..size {
        for x in 0..size {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            if !inside_rounded(px, py, s, corner) {
                continue;
            }

            let mut rgb = tile;
            let gx = (px - margin) / pitch_x;
            let gy = (py - margin) / pitch_y;
            if gx >= 0.0 && gy >= 0.0 && gx < cols && gy < rows {
                let in_gap_x = (px - margin) - gx.floor() * pitch_x > pitch_x - gap;
                let in_gap_y = (py - margin) - gy.floor() * pitch_y > pitch_y - gap;
                if !in_gap_x && !in_gap_y {
                    let ch = PATTERN[gy as usize].as_bytes()[gx as usize];
                    let c = theme::cell_color(cell_for(ch));
                    rgb = [c.r(), c.g(), c.b()];
                }
            }

            let i = ((y * size + x) * 4) as usize;
            pixels[i..i + 3].copy_from_slice(&rgb);
            pixels[i + 3] = 0xff;
        }
    }
    pixels
}

fn cell_for(ch: u8) -> Cell {
    match ch {
        b'.' => Cell::Empty,
        b'f' => Cell::Fragmented,
        b'b' => Cell::Busy,
        b'm' => Cell::MftReserved,
        b'u' => Cell::Unmovable,
        _ => Cell::Regular,
    }
}

/// Point-in-rounded-square test for a `size`×`size` tile.
fn inside_rounded(px: f32, py: f32, size: f32, radius: f32) -> bool {
    let cx = px.clamp(radius, size - radius);
    let cy = py.clamp(radius, size - radius);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size() {
        for size in [16, 32, 64] {
            assert_eq!(render_icon(size).len(), (size * size * 4) as usize);
        }
    }

    #[test]
    fn test_corners_are_transparent_and_centre_is_opaque() {
        let size = 64;
        let px = render_icon(size);
        assert_eq!(px[3], 0, "top-left corner should be transparent");
        let centre = ((size / 2 * size + size / 2) * 4 + 3) as usize;
        assert_eq!(px[centre], 0xff);
    }

    #[test]
    fn test_pattern_rows_have_equal_width() {
        assert!(PATTERN.iter().all(|row| row.len() == PATTERN[0].len()));
    }
}
