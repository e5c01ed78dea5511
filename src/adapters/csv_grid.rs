use crate::config::GridLayout;
use crate::domain::ports::GridSource;
use crate::utils::error::Result;
use std::io::Read;
use std::path::PathBuf;

/// Plate grid stored as comma-separated text. Quoted cells may span lines.
#[derive(Debug, Clone)]
pub struct CsvGridSource {
    path: PathBuf,
    layout: GridLayout,
}

impl CsvGridSource {
    pub fn new(path: impl Into<PathBuf>, layout: GridLayout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }
}

/// Reads every record as-is; records may differ in length.
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

impl GridSource for CsvGridSource {
    fn read_rows(&self) -> Result<Vec<Vec<String>>> {
        tracing::debug!("Reading CSV grid from {}", self.path.display());
        let file = std::fs::File::open(&self.path)?;
        read_csv_rows(std::io::BufReader::new(file))
    }

    fn layout(&self) -> GridLayout {
        self.layout
    }
}
