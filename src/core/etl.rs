use crate::config::toml_config::TomlConfig;
use crate::config::FileConfig;
use crate::core::exporter::PlateExporter;
use crate::core::importer::PlateImporter;
use crate::domain::model::WELL_COUNT;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub output_path: PathBuf,
    pub tabular_path: Option<PathBuf>,
    pub occupied_wells: usize,
}

/// Layout file in, instrument file out.
pub struct PlateEngine<S: Storage> {
    importer: PlateImporter,
    exporter: PlateExporter,
    files: FileConfig,
    storage: S,
}

impl<S: Storage> PlateEngine<S> {
    pub fn new(importer: PlateImporter, exporter: PlateExporter, files: FileConfig, storage: S) -> Self {
        Self {
            importer,
            exporter,
            files,
            storage,
        }
    }

    pub fn from_config(config: TomlConfig, storage: S) -> Self {
        Self::new(
            PlateImporter::new(config.import),
            PlateExporter::new(config.export),
            config.files,
            storage,
        )
    }

    pub fn run(&self, input: &Path) -> Result<ConversionReport> {
        tracing::info!("Importing plate layout from {}", input.display());
        let outcome = self.importer.import_file(input, &self.storage)?;
        let occupied_wells = outcome.plate.occupied_count();
        tracing::info!("Imported {} wells ({} occupied)", WELL_COUNT, occupied_wells);

        tracing::info!(
            "Exporting plate setup with header {}",
            self.files.header_file.display()
        );
        self.exporter.write_plate(
            &outcome.plate,
            &self.files.header_file,
            &self.files.output_file,
            &self.storage,
        )?;

        Ok(ConversionReport {
            output_path: self.files.output_file.clone(),
            tabular_path: outcome.tabular_path,
            occupied_wells,
        })
    }
}
