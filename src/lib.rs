pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{CsvGridSource, LocalStorage, MemoryGrid, WorkbookGridSource};
pub use config::{ExportConfig, FileConfig, GridLayout, ImportOptions, RgbColor};
pub use crate::core::{
    etl::{ConversionReport, PlateEngine},
    exporter::PlateExporter,
    importer::{ImportOutcome, PlateImporter},
};
pub use domain::model::{PlateRow, TabularPlate, WellEntry, WellId, WELL_COUNT};
pub use domain::ports::{GridSource, Storage};
pub use utils::error::{PlateError, Result};
