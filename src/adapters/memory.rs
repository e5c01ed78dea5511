use crate::config::GridLayout;
use crate::domain::ports::GridSource;
use crate::utils::error::Result;

/// Grid already held in memory, e.g. built by a caller or a test.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    rows: Vec<Vec<String>>,
    layout: GridLayout,
}

impl MemoryGrid {
    pub fn new(rows: Vec<Vec<String>>, layout: GridLayout) -> Self {
        Self { rows, layout }
    }

    /// Bare 8x12 grid with no header row or label column.
    pub fn from_cells<S: AsRef<str>>(rows: &[Vec<S>]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|c| c.as_ref().to_string()).collect())
            .collect();
        Self::new(
            rows,
            GridLayout {
                header_row: false,
                row_labels: false,
            },
        )
    }
}

impl GridSource for MemoryGrid {
    fn read_rows(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.rows.clone())
    }

    fn layout(&self) -> GridLayout {
        self.layout
    }
}
