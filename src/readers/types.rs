use std::fmt;

use ndarray::Array2;

use crate::error::InvalidInputError;
use crate::grid::Grid;

pub trait DataReader {
    fn read_variable(&self, name: &str) -> Result<Array2<f64>, ReadError>;
}

#[derive(Debug)]
pub enum ReadError {
    Gdal(gdal::errors::GdalError),
    NetCDF(String),
    Input(InvalidInputError),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Gdal(e) => write!(f, "GDAL error: {}", e),
            ReadError::NetCDF(msg) => write!(f, "NetCDF error: {}", msg),
            ReadError::Input(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ReadError {}

impl From<gdal::errors::GdalError> for ReadError {
    fn from(err: gdal::errors::GdalError) -> ReadError {
        ReadError::Gdal(err)
    }
}

impl From<InvalidInputError> for ReadError {
    fn from(err: InvalidInputError) -> ReadError {
        ReadError::Input(err)
    }
}

/// Names of the netCDF variables holding one wind scene.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct VariableNames {
    pub lon: String,
    pub lat: String,
    pub speed: String,
    pub direction: String,
}

impl Default for VariableNames {
    // Sentinel-1 OWI level-2 naming
    fn default() -> Self {
        Self {
            lon: "owiLon".to_string(),
            lat: "owiLat".to_string(),
            speed: "owiWindSpeed".to_string(),
            direction: "owiWindDirection".to_string(),
        }
    }
}

/// Grid plus the speed and direction fields defined on it.
#[derive(Debug, Clone)]
pub struct WindScene {
    pub grid: Grid,
    pub speed: Array2<f64>,
    pub direction: Array2<f64>,
}

impl WindScene {
    pub fn new(
        grid: Grid,
        speed: Array2<f64>,
        direction: Array2<f64>,
    ) -> Result<Self, InvalidInputError> {
        grid.check_field(&speed)?;
        grid.check_field(&direction)?;
        Ok(Self {
            grid,
            speed,
            direction,
        })
    }
}

impl fmt::Display for WindScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.grid.dim();
        let valid: Vec<f64> = self
            .speed
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .collect();

        let min_value = valid.iter().copied().fold(f64::NAN, f64::min);
        let max_value = valid.iter().copied().fold(f64::NAN, f64::max);

        write!(
            f,
            "Rows: {}\nCols: {}\nValid speeds: {}\nMin speed: {}\nMax speed: {}",
            rows,
            cols,
            valid.len(),
            min_value,
            max_value,
        )
    }
}
