use crate::config::{ExportConfig, FileConfig, ImportOptions};
use crate::utils::error::{PlateError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// `plate-setup.toml`: every table and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub import: ImportOptions,
    pub export: ExportConfig,
    pub files: FileConfig,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content)
            .map_err(|e| PlateError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("files.header_file", &self.files.header_file.to_string_lossy())?;
        validation::validate_path("files.output_file", &self.files.output_file.to_string_lossy())?;

        validation::validate_field_text("export.reporter", &self.export.reporter)?;
        validation::validate_field_text("export.quencher", &self.export.quencher)?;
        validation::validate_field_text("export.task", &self.export.task)?;

        if self.files.header_file == self.files.output_file {
            return Err(PlateError::InvalidConfigValueError {
                field: "files.output_file".to_string(),
                value: self.files.output_file.display().to_string(),
                reason: "Output file would overwrite the header template".to_string(),
            });
        }

        Ok(())
    }
}
