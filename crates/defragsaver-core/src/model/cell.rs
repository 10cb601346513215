/// A single cluster on the simulated disk surface.
///
/// Cells are stored in a flat `Vec<Cell>` indexed by `row * width + column`.
/// The tag is purely descriptive: the host maps it to a colour, the engine
/// never does.
use serde::{Deserialize, Serialize};

/// Semantic state of one cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Free space.
    Empty,
    /// Contiguous file data.
    #[default]
    Regular,
    /// One very large contiguous file.
    SpaceHog,
    /// File data that still needs to be defragmented.
    Fragmented,
    /// System data the defragmenter may not touch (page file, boot sector).
    Unmovable,
    /// Cluster currently being written.
    Busy,
    /// Space reserved for the Master File Table.
    MftReserved,
    /// Unclassified.
    Unknown,
}

impl Cell {
    /// Every variant, in declaration order.
    pub const ALL: [Cell; 8] = [
        Cell::Empty,
        Cell::Regular,
        Cell::SpaceHog,
        Cell::Fragmented,
        Cell::Unmovable,
        Cell::Busy,
        Cell::MftReserved,
        Cell::Unknown,
    ];

    /// Short human-readable name for legends and tooltips.
    pub fn label(self) -> &'static str {
        match self {
            Cell::Empty => "free space",
            Cell::Regular => "contiguous",
            Cell::SpaceHog => "space hog",
            Cell::Fragmented => "fragmented",
            Cell::Unmovable => "unmovable",
            Cell::Busy => "writing",
            Cell::MftReserved => "MFT zone",
            Cell::Unknown => "unknown",
        }
    }
}
