use analysis::{ConnectedComponentCounter, LaplacianVariant, PercentileThresholder, PipelineBuilder};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;


#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}


/// Settings for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory receiving the stage images and the chain code
    pub output_dir: PathBuf,
    /// Darkest fraction of pixels used by the percentile threshold
    #[schemars(range(min = 0.0, max = 1.0))]
    pub background_fraction: f64,
    /// One box-filter output per window size
    pub box_sizes: Vec<u32>,
    pub laplacian: LaplacianVariant,
    /// Objects smaller than this many pixels are not counted
    pub min_object_area: usize,
    /// Run independent stages concurrently
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            background_fraction: PercentileThresholder::DEFAULT_BACKGROUND_FRACTION,
            box_sizes: PipelineBuilder::DEFAULT_BOX_SIZES.to_vec(),
            laplacian: LaplacianVariant::default(),
            min_object_area: ConnectedComponentCounter::DEFAULT_MIN_AREA,
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CliError::UnsupportedFileFormat),
        }
    }

    /// Save configuration to a TOML file
    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CliError> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Save configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CliError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Convert configuration to JSON string
    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    /// Pipeline builder carrying these settings
    pub fn to_builder(&self) -> PipelineBuilder {
        PipelineBuilder::new()
            .with_background_fraction(self.background_fraction)
            .with_box_sizes(self.box_sizes.iter().copied())
            .with_laplacian(self.laplacian)
            .with_min_object_area(self.min_object_area)
            .parallel(self.parallel)
    }
}
