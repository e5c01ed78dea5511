use crate::config::GridLayout;
use crate::domain::model::{PLATE_COLUMNS, PLATE_ROWS, WELL_COUNT};
use crate::utils::error::{PlateError, Result};
use std::path::Path;

/// Anything that can hand over a plate layout as rows of cell text.
pub trait GridSource {
    /// Raw sheet rows, top to bottom, before any header or label stripping.
    fn read_rows(&self) -> Result<Vec<Vec<String>>>;

    fn layout(&self) -> GridLayout;

    /// The 96 cell strings in row-major well order.
    fn read_grid(&self) -> Result<Vec<String>> {
        shape_grid(self.read_rows()?, self.layout())
    }
}

pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let data = self.read_file(path)?;
        String::from_utf8(data).map_err(|e| {
            PlateError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

/// Strips the header row and label column, drops blank overflow and checks
/// what remains is exactly 8x12.
pub fn shape_grid(rows: Vec<Vec<String>>, layout: GridLayout) -> Result<Vec<String>> {
    let skip_rows = usize::from(layout.header_row);
    let skip_cols = usize::from(layout.row_labels);

    let mut grid: Vec<Vec<String>> = rows
        .into_iter()
        .skip(skip_rows)
        .map(|row| {
            let mut cells: Vec<String> = row.into_iter().skip(skip_cols).collect();
            while cells.len() > PLATE_COLUMNS && cells.last().is_some_and(|c| c.trim().is_empty()) {
                cells.pop();
            }
            cells
        })
        .collect();

    while grid.len() > PLATE_ROWS
        && grid
            .last()
            .is_some_and(|row| row.iter().all(|c| c.trim().is_empty()))
    {
        grid.pop();
    }

    if grid.len() != PLATE_ROWS {
        return Err(PlateError::format(format!(
            "expected {} plate rows, found {}",
            PLATE_ROWS,
            grid.len()
        )));
    }

    if let Some((idx, row)) = grid
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != PLATE_COLUMNS)
    {
        return Err(PlateError::format(format!(
            "plate row {} has {} cells, expected {}",
            idx + 1,
            row.len(),
            PLATE_COLUMNS
        )));
    }

    let cells: Vec<String> = grid.into_iter().flatten().collect();
    tracing::debug!("Shaped grid into {} cells", cells.len());
    debug_assert_eq!(cells.len(), WELL_COUNT);
    Ok(cells)
}
