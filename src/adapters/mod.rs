// Adapters layer: concrete grid readers and file storage behind the domain ports.

pub mod csv_grid;
pub mod memory;
pub mod storage;
pub mod workbook;

pub use csv_grid::CsvGridSource;
pub use memory::MemoryGrid;
pub use storage::LocalStorage;
pub use workbook::WorkbookGridSource;

use crate::config::GridLayout;
use crate::domain::ports::GridSource;
use std::path::Path;

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xls", "xlsx", "xlsm", "xlsb", "ods"];

pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Picks the reader for a layout file from its extension; anything that is
/// not a workbook is read as CSV.
pub fn source_for_path(path: &Path, layout: GridLayout) -> Box<dyn GridSource> {
    if is_workbook(path) {
        Box::new(WorkbookGridSource::new(path, layout))
    } else {
        Box::new(CsvGridSource::new(path, layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_workbook() {
        assert!(is_workbook(Path::new("plate.xlsx")));
        assert!(is_workbook(Path::new("plate.XLS")));
        assert!(is_workbook(Path::new("dir/plate.ods")));
        assert!(!is_workbook(Path::new("plate.csv")));
        assert!(!is_workbook(Path::new("plate")));
    }
}
