use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::bbox::Bbox;
use crate::export::DEFAULT_NODATA;
use crate::readers::VariableNames;

pub mod error;
pub use error::ConfigError;

#[derive(Debug, Clone)]
pub struct Config {
    input_pattern: String,
    output_directory: PathBuf,
    variables: VariableNames,
    bbox: Option<Bbox>,
    nodata: f64,
}

// Validates the glob pattern and the no-data value at load time so that the
// batch run never starts on a config it cannot finish.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            input_pattern: String,
            output_directory: PathBuf,
            variables: Option<VariableNames>,
            bbox: Option<Bbox>,
            nodata: Option<f64>,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        if helper.input_pattern.trim().is_empty() {
            return Err(D::Error::custom(ConfigError::EmptyPattern));
        }

        glob::Pattern::new(&helper.input_pattern)
            .map_err(|e| D::Error::custom(ConfigError::Pattern(e)))?;

        let nodata = helper.nodata.unwrap_or(DEFAULT_NODATA);
        if !nodata.is_finite() {
            return Err(D::Error::custom(ConfigError::Nodata(nodata)));
        }

        Ok(Config {
            input_pattern: helper.input_pattern,
            output_directory: helper.output_directory,
            variables: helper.variables.unwrap_or_default(),
            bbox: helper.bbox,
            nodata,
        })
    }
}

impl Config {
    pub fn new<P: Into<PathBuf>>(input_pattern: &str, output_directory: P) -> Self {
        Self {
            input_pattern: input_pattern.to_string(),
            output_directory: output_directory.into(),
            variables: VariableNames::default(),
            bbox: None,
            nodata: DEFAULT_NODATA,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn with_bbox(mut self, bbox: Bbox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn input_pattern(&self) -> &str {
        &self.input_pattern
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn variables(&self) -> &VariableNames {
        &self.variables
    }

    pub fn bbox(&self) -> Option<&Bbox> {
        self.bbox.as_ref()
    }

    pub fn nodata(&self) -> f64 {
        self.nodata
    }

    /// Files matching `input_pattern`, sorted. Unreadable entries are skipped.
    pub fn input_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let mut files: Vec<PathBuf> = glob::glob(&self.input_pattern)?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    log::warn!("Skipping unreadable input: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();
        files.sort();
        Ok(files)
    }
}
