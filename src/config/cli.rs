use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "plate-setup")]
#[command(about = "Convert 96-well plate layouts into qPCR instrument plate files")]
pub struct CliConfig {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Read a plate grid and write it as a Well,Sample,Replicate table
    Import {
        /// Layout file (.csv, .xls, .xlsx, .xlsm, .xlsb, .ods)
        input: PathBuf,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Build the instrument file from a tabular CSV
    Export {
        /// Tabular CSV produced by `import`
        tabular: PathBuf,

        #[command(flatten)]
        files: FileArgs,
    },

    /// Import a layout and export the instrument file in one go
    Convert {
        input: PathBuf,

        #[command(flatten)]
        grid: GridArgs,

        #[command(flatten)]
        files: FileArgs,
    },
}

#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// Do not save the tabular CSV next to the input
    #[arg(long)]
    pub no_save: bool,

    /// The first row of the sheet is plate data, not column titles
    #[arg(long)]
    pub no_header_row: bool,

    /// The first column of the sheet holds row letters A-H
    #[arg(long)]
    pub row_labels: bool,
}

#[derive(Debug, Clone, Args)]
pub struct FileArgs {
    /// Header template prepended to the output
    #[arg(long)]
    pub header: Option<PathBuf>,

    /// Instrument file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CliConfig {
    /// Loads the TOML file if given and applies command-line overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        match &self.command {
            Command::Import { grid, .. } => grid.apply(&mut config),
            Command::Export { files, .. } => files.apply(&mut config),
            Command::Convert { grid, files, .. } => {
                grid.apply(&mut config);
                files.apply(&mut config);
            }
        }

        Ok(config)
    }
}

impl GridArgs {
    fn apply(&self, config: &mut TomlConfig) {
        if self.no_save {
            config.import.save_tabular = false;
        }
        if self.no_header_row {
            config.import.layout.header_row = false;
        }
        if self.row_labels {
            config.import.layout.row_labels = true;
        }
    }
}

impl FileArgs {
    fn apply(&self, config: &mut TomlConfig) {
        if let Some(header) = &self.header {
            config.files.header_file = header.clone();
        }
        if let Some(output) = &self.output {
            config.files.output_file = output.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_convert_overrides() {
        let cli = CliConfig::parse_from([
            "plate-setup",
            "convert",
            "layout.xlsx",
            "--no-save",
            "--row-labels",
            "--header",
            "h.txt",
            "-o",
            "out.txt",
        ]);
        let config = cli.resolve().unwrap();

        assert!(!config.import.save_tabular);
        assert!(config.import.layout.row_labels);
        assert!(config.import.layout.header_row);
        assert_eq!(config.files.header_file, Path::new("h.txt"));
        assert_eq!(config.files.output_file, Path::new("out.txt"));
    }

    #[test]
    fn test_import_keeps_default_files() {
        let cli = CliConfig::parse_from(["plate-setup", "-v", "import", "plate.csv"]);
        assert!(cli.verbose);
        let config = cli.resolve().unwrap();
        assert!(config.import.save_tabular);
        assert_eq!(
            config.files.header_file,
            Path::new(crate::config::DEFAULT_HEADER_FILE)
        );
    }
}
