//! Build script -- generates the application icon and embeds the Windows
//! application manifest and icon resource.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let icon_path = "assets/icon.ico";
    if !std::path::Path::new(icon_path).exists() {
        std::fs::create_dir_all("assets").ok();
        let ico = encode_ico(&[48, 32, 16]);
        if let Err(e) = std::fs::write(icon_path, ico) {
            println!("cargo:warning=Failed to write icon: {e}");
        }
    }

    // Only embed resources on Windows.
    if std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() == "windows" {
        let mut res = winresource::WindowsResource::new();
        res.set("FileDescription", "DefragSaver Screensaver");
        res.set_manifest(
            r#"
<assembly xmlns="urn:schemas-microsoft-com:asm.v1" manifestVersion="1.0">
  <trustInfo xmlns="urn:schemas-microsoft-com:asm.v3">
    <security>
      <requestedPrivileges>
        <requestedExecutionLevel level="asInvoker" uiAccess="false"/>
      </requestedPrivileges>
    </security>
  </trustInfo>
  <application xmlns="urn:schemas-microsoft-com:asm.v3">
    <windowsSettings>
      <dpiAwareness xmlns="http://schemas.microsoft.com/SMI/2016/WindowsSettings">PerMonitorV2</dpiAwareness>
    </windowsSettings>
  </application>
</assembly>
"#,
        );

        if std::path::Path::new(icon_path).exists() {
            res.set_icon(icon_path);
        }

        if let Err(e) = res.compile() {
            println!("cargo:warning=Failed to compile Windows resources: {e}");
        }
    }
}

// ════════════════════════════════════════════════════════════════
// Icon rendering (self-contained: no workspace crate deps)
// ════════════════════════════════════════════════════════════════

/// Miniature disk map; mirrors `crates/defragsaver-gui/src/icon.rs`.
const PATTERN: [&str; 6] = [
    "rrmmmrrf",
    "rfrrbbbr",
    "urrffrr.",
    "rr.rrfrr",
    "frr..rrr",
    "rrrf....",
];

fn cluster_rgb(ch: u8) -> [u8; 3] {
    match ch {
        b'.' => [0x18, 0x18, 0x24],
        b'f' => [0xe0, 0x40, 0x40],
        b'b' => [0xff, 0xff, 0xff],
        b'm' => [0x9b, 0x5c, 0xd6],
        b'u' => [0x8a, 0x8a, 0x96],
        _ => [0x2f, 0x6f, 0xd8],
    }
}

/// Multi-resolution ICO: header, one directory entry per size, then the
/// 32-bit BMP payloads in the same order.
fn encode_ico(sizes: &[u32]) -> Vec<u8> {
    let payloads: Vec<(u32, Vec<u8>)> = sizes
        .iter()
        .map(|&size| (size, bmp_payload(&render_rgba(size), size)))
        .collect();

    let mut ico = Vec::new();
    for word in [0u16, 1, sizes.len() as u16] {
        ico.extend_from_slice(&word.to_le_bytes());
    }

    let mut offset = 6 + 16 * payloads.len();
    for (size, bmp) in &payloads {
        let dim = if *size >= 256 { 0 } else { *size as u8 };
        ico.extend_from_slice(&[dim, dim, 0, 0]);
        ico.extend_from_slice(&1u16.to_le_bytes());
        ico.extend_from_slice(&32u16.to_le_bytes());
        ico.extend_from_slice(&(bmp.len() as u32).to_le_bytes());
        ico.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += bmp.len();
    }
    for (_, bmp) in payloads {
        ico.extend(bmp);
    }
    ico
}

/// BITMAPINFOHEADER + bottom-up BGRA pixels + 1-bpp AND mask.
fn bmp_payload(rgba: &[u8], size: u32) -> Vec<u8> {
    let mut bmp = Vec::new();
    bmp.extend_from_slice(&40u32.to_le_bytes());
    bmp.extend_from_slice(&(size as i32).to_le_bytes());
    // Height is doubled in ICO entries to cover the AND mask.
    bmp.extend_from_slice(&(size as i32 * 2).to_le_bytes());
    bmp.extend_from_slice(&1u16.to_le_bytes());
    bmp.extend_from_slice(&32u16.to_le_bytes());
    bmp.extend_from_slice(&[0u8; 24]);

    for y in (0..size).rev() {
        for x in 0..size {
            let i = ((y * size + x) * 4) as usize;
            bmp.extend_from_slice(&[rgba[i + 2], rgba[i + 1], rgba[i], rgba[i + 3]]);
        }
    }

    let row_bytes = (size.div_ceil(32) * 4) as usize;
    for y in (0..size).rev() {
        let mut row = vec![0u8; row_bytes];
        for x in 0..size {
            if rgba[((y * size + x) * 4 + 3) as usize] < 128 {
                row[(x / 8) as usize] |= 0x80 >> (x % 8);
            }
        }
        bmp.extend_from_slice(&row);
    }
    bmp
}

fn render_rgba(size: u32) -> Vec<u8> {
    let s = size as f32;
    let radius = s * 0.16;
    let margin = s * 0.12;
    let cols = PATTERN[0].len() as f32;
    let rows = PATTERN.len() as f32;
    let pitch_x = (s - 2.0 * margin) / cols;
    let pitch_y = (s - 2.0 * margin) / rows;
    let gap = (s * 0.02).max(1.0);

    let mut out = vec![0u8; (size * size * 4) as usize];
    for y in 0..size {
        for x in 0..size {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            let cx = px.clamp(radius, s - radius);
            let cy = py.clamp(radius, s - radius);
            if (px - cx).powi(2) + (py - cy).powi(2) > radius * radius {
                continue;
            }

            let mut rgb = [0x10, 0x10, 0x1c];
            let (lx, ly) = (px - margin, py - margin);
            if lx >= 0.0 && ly >= 0.0 && lx < cols * pitch_x && ly < rows * pitch_y {
                let col = ((lx / pitch_x) as usize).min(PATTERN[0].len() - 1);
                let row = ((ly / pitch_y) as usize).min(PATTERN.len() - 1);
                let in_gap = lx - col as f32 * pitch_x > pitch_x - gap
                    || ly - row as f32 * pitch_y > pitch_y - gap;
                if !in_gap {
                    rgb = cluster_rgb(PATTERN[row].as_bytes()[col]);
                }
            }

            let i = ((y * size + x) * 4) as usize;
            out[i..i + 3].copy_from_slice(&rgb);
            out[i + 3] = 0xff;
        }
    }
    out
}
