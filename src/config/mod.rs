#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_HEADER_FILE: &str = "example_data/plate_header.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "example_data/plate_layout.txt";

/// How the plate grid sits inside the first sheet of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// First row holds column titles (1..12) and is skipped.
    pub header_row: bool,
    /// First column holds row letters (A..H) and is skipped.
    pub row_labels: bool,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            header_row: true,
            row_labels: false,
        }
    }
}

impl GridLayout {
    /// Sheet dimensions (rows, columns) including header and label cells.
    pub fn sheet_size(&self) -> (usize, usize) {
        (
            crate::domain::model::PLATE_ROWS + usize::from(self.header_row),
            crate::domain::model::PLATE_COLUMNS + usize::from(self.row_labels),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    #[serde(flatten)]
    pub layout: GridLayout,
    /// Persist the tabular CSV next to the source file.
    pub save_tabular: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            layout: GridLayout::default(),
            save_tabular: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<RgbColor> for [u8; 3] {
    fn from(c: RgbColor) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Rendered the way the instrument software expects it, quotes included.
impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"RGB({},{},{})\"", self.r, self.g, self.b)
    }
}

/// Metadata stamped onto every occupied well of the instrument file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub reporter: String,
    pub quencher: String,
    pub task: String,
    pub sample_color: RgbColor,
    pub target_color: RgbColor,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            reporter: "FAM".to_string(),
            quencher: "NFQ-MGB".to_string(),
            task: "UNKNOWN".to_string(),
            sample_color: RgbColor::new(0, 139, 69),
            target_color: RgbColor::new(0, 139, 69),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub header_file: PathBuf,
    pub output_file: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            header_file: PathBuf::from(DEFAULT_HEADER_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}
