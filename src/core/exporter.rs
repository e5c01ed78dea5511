use crate::config::ExportConfig;
use crate::domain::model::{PlateRow, TabularPlate, WellEntry};
use crate::domain::ports::Storage;
use crate::utils::error::{PlateError, Result};
use std::path::Path;

/// Builds the instrument plate-setup file from a [`TabularPlate`].
#[derive(Debug, Clone, Default)]
pub struct PlateExporter {
    config: ExportConfig,
}

impl PlateExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// `number` is the 1-based position on the plate. Unoccupied wells get
    /// blank metadata; occupied wells get the configured values.
    pub fn build_row(&self, number: usize, entry: &WellEntry) -> PlateRow {
        let fill = |value: String| {
            if entry.is_occupied() {
                value
            } else {
                String::new()
            }
        };

        PlateRow {
            well: number,
            well_position: entry.well.to_string(),
            sample_name: entry.sample.clone(),
            sample_color: fill(self.config.sample_color.to_string()),
            biogroup_name: None,
            biogroup_color: None,
            target_name: entry.replicate.clone(),
            target_color: fill(self.config.target_color.to_string()),
            task: fill(self.config.task.clone()),
            reporter: fill(self.config.reporter.clone()),
            quencher: fill(self.config.quencher.clone()),
            quantity: None,
            comments: None,
        }
    }

    pub fn build_rows(&self, plate: &TabularPlate) -> Vec<PlateRow> {
        plate
            .iter()
            .enumerate()
            .map(|(idx, entry)| self.build_row(idx + 1, entry))
            .collect()
    }

    /// Tab-separated body with a column header line and no quoting.
    pub fn render_body(&self, plate: &TabularPlate) -> Result<String> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        for row in self.build_rows(plate) {
            wtr.serialize(row)?;
        }

        let buf = wtr
            .into_inner()
            .map_err(|e| PlateError::IoError(std::io::Error::other(e.to_string())))?;
        String::from_utf8(buf).map_err(|e| PlateError::format(e.to_string()))
    }

    /// Header text, one newline, then the rendered body.
    pub fn create_plate(&self, plate: &TabularPlate, header_text: &str) -> Result<String> {
        let body = self.render_body(plate)?;
        let mut content = String::with_capacity(header_text.len() + 1 + body.len());
        content.push_str(header_text);
        content.push('\n');
        content.push_str(&body);
        Ok(content)
    }

    /// Reads the header template and writes the finished file, replacing any
    /// existing one.
    pub fn write_plate<S: Storage>(
        &self,
        plate: &TabularPlate,
        header_path: &Path,
        output_path: &Path,
        storage: &S,
    ) -> Result<()> {
        let header_text = storage.read_to_string(header_path)?;
        let content = self.create_plate(plate, &header_text)?;
        storage.write_file(output_path, content.as_bytes())?;

        tracing::info!(
            "Wrote plate setup for {} occupied wells to {}",
            plate.occupied_count(),
            output_path.display()
        );
        Ok(())
    }
}
