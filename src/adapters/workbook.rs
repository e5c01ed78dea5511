use crate::config::GridLayout;
use crate::domain::ports::GridSource;
use crate::utils::error::{PlateError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::PathBuf;

/// First sheet of an Excel or OpenDocument workbook.
#[derive(Debug, Clone)]
pub struct WorkbookGridSource {
    path: PathBuf,
    layout: GridLayout,
}

impl WorkbookGridSource {
    pub fn new(path: impl Into<PathBuf>, layout: GridLayout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }
}

/// Lays the used cells out from A1. Workbooks do not store trailing blank
/// cells, so the grid is padded to at least `min_size` (rows, columns).
fn range_to_rows(range: &Range<Data>, min_size: (usize, usize)) -> Vec<Vec<String>> {
    let (row0, col0) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));
    let (height, width) = range.get_size();

    let rows = min_size.0.max(row0 + height);
    let cols = min_size.1.max(col0 + width);
    let mut grid = vec![vec![String::new(); cols]; rows];

    for (r, c, value) in range.used_cells() {
        grid[row0 + r][col0 + c] = value.to_string();
    }
    grid
}

impl GridSource for WorkbookGridSource {
    fn read_rows(&self) -> Result<Vec<Vec<String>>> {
        tracing::debug!("Reading workbook grid from {}", self.path.display());
        let mut workbook = open_workbook_auto(&self.path)?;

        let sheet_name = workbook.sheet_names().first().cloned().unwrap_or_default();
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| {
                PlateError::format(format!("workbook {} has no sheets", self.path.display()))
            })??;
        tracing::debug!("Using sheet '{}' ({:?} cells)", sheet_name, range.get_size());

        Ok(range_to_rows(&range, self.layout.sheet_size()))
    }

    fn layout(&self) -> GridLayout {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_offset_and_padding() {
        let mut range: Range<Data> = Range::new((1, 2), (2, 3));
        range.set_value((1, 2), Data::String("S1\nR1".to_string()));
        range.set_value((2, 3), Data::Float(4.0));

        let rows = range_to_rows(&range, (9, 12));
        assert_eq!(rows.len(), 9);
        assert!(rows.iter().all(|r| r.len() == 12));
        assert_eq!(rows[1][2], "S1\nR1");
        assert_eq!(rows[2][3], "4");
        assert_eq!(rows[0][0], "");
    }

    #[test]
    fn test_empty_range_is_all_blank() {
        let range: Range<Data> = Range::empty();
        let rows = range_to_rows(&range, (9, 12));
        assert_eq!(rows.len(), 9);
        assert!(rows.iter().flatten().all(|c| c.is_empty()));
    }
}
