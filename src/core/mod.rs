pub mod etl;
pub mod exporter;
pub mod importer;

pub use crate::domain::model::{PlateRow, TabularPlate, WellEntry, WellId};
pub use crate::domain::ports::{GridSource, Storage};
pub use crate::utils::error::Result;
