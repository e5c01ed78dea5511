use crate::adapters::source_for_path;
use crate::config::ImportOptions;
use crate::domain::model::{TabularPlate, WellId};
use crate::domain::ports::{GridSource, Storage};
use crate::utils::error::{PlateError, Result};
use std::path::{Path, PathBuf};

/// Result of importing a layout file.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub plate: TabularPlate,
    /// Where the tabular CSV was saved, if it was.
    pub tabular_path: Option<PathBuf>,
}

/// Turns a plate grid into a [`TabularPlate`].
#[derive(Debug, Clone, Default)]
pub struct PlateImporter {
    options: ImportOptions,
}

impl PlateImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn import_plate<G: GridSource + ?Sized>(&self, source: &G) -> Result<TabularPlate> {
        let cells = source.read_grid()?;

        let pairs = cells
            .iter()
            .zip(WellId::all())
            .map(|(cell, well)| {
                split_cell(cell).map_err(|e| match e {
                    PlateError::FormatError { message } => {
                        PlateError::format(format!("well {}: {}", well, message))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let plate = TabularPlate::from_pairs(pairs)?;
        if plate.occupied_count() == 0 {
            tracing::warn!("Imported plate has no occupied wells");
        }
        tracing::debug!("Imported {} occupied wells", plate.occupied_count());
        Ok(plate)
    }

    /// Imports a layout file, choosing the reader from its extension, and
    /// saves the tabular CSV beside it when `save_tabular` is on.
    pub fn import_file<S: Storage>(&self, path: &Path, storage: &S) -> Result<ImportOutcome> {
        let source = source_for_path(path, self.options.layout);
        let plate = self.import_plate(&*source)?;

        let tabular_path = if self.options.save_tabular {
            let target = tabular_path_for(path);
            let text = plate.to_csv_string()?;
            storage.write_file(&target, text.as_bytes())?;
            tracing::info!("Saved tabular plate to {}", target.display());
            Some(target)
        } else {
            None
        };

        Ok(ImportOutcome {
            plate,
            tabular_path,
        })
    }
}

/// `"Sample\nReplicate"` into its two parts. A cell without a newline is
/// all sample; more than one newline is rejected.
pub fn split_cell(cell: &str) -> Result<(String, String)> {
    let mut parts = cell.split('\n');
    let sample = parts.next().unwrap_or_default();
    let replicate = parts.next().unwrap_or_default();

    if parts.next().is_some() {
        return Err(PlateError::format(format!(
            "cell {:?} has more than one line break",
            cell
        )));
    }

    Ok((
        sample.strip_suffix('\r').unwrap_or(sample).to_string(),
        replicate.to_string(),
    ))
}

/// `<stem>.csv` beside the layout, or `<stem>.tabular.csv` if the layout is
/// itself that CSV.
pub fn tabular_path_for(path: &Path) -> PathBuf {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        path.with_extension("tabular.csv")
    } else {
        path.with_extension("csv")
    }
}
