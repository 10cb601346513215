/// Display formatting for cluster counts and their byte equivalents.
///
/// The simulated disk uses a fixed cluster size so the status line can
/// report relocations in bytes as well as clusters.

/// Bytes represented by one cell.
pub const CLUSTER_BYTES: u64 = 4096;

/// Format a byte count with a binary unit (KB = 1024).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    // Two decimals from GB upward, one below.
    if unit >= 2 {
        format!("{value:.2} {}", UNITS[unit])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Format a count with thousand separators.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a run of clusters as `"1,234 clusters (4.8 MB)"`.
pub fn format_clusters(clusters: usize) -> String {
    let clusters = clusters as u64;
    let noun = if clusters == 1 { "cluster" } else { "clusters" };
    format!(
        "{} {noun} ({})",
        format_count(clusters),
        format_size(clusters * CLUSTER_BYTES)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_048_576), "1.0 MB");
        assert_eq!(format_size(1_073_741_824), "1.00 GB");
        assert_eq!(format_size(1_099_511_627_776), "1.00 TB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(123_456), "123,456");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_clusters() {
        assert_eq!(format_clusters(1), "1 cluster (4.0 KB)");
        assert_eq!(format_clusters(256), "256 clusters (1.0 MB)");
        assert_eq!(format_clusters(1_200), "1,200 clusters (4.7 MB)");
    }
}
