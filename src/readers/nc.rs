use std::path::{Path, PathBuf};

use gdal::Dataset;
use ndarray::Array2;

use super::utils::{is_netcdf, netcdf_subdataset};
use super::{DataReader, ReadError, VariableNames, WindScene};
use crate::grid::Grid;

/// Reads 2D variables of a netCDF file through GDAL's netCDF driver.
pub struct NcReader {
    pub file_name: PathBuf,
}

impl NcReader {
    pub fn new<P: AsRef<Path>>(file_name: P) -> Result<Self, ReadError> {
        let file_name = file_name.as_ref().to_path_buf();
        if !is_netcdf(&file_name) {
            return Err(ReadError::NetCDF(format!(
                "not a netCDF file: {}",
                file_name.display()
            )));
        }
        Ok(Self { file_name })
    }

    pub fn read_scene(&self, names: &VariableNames) -> Result<WindScene, ReadError> {
        let lon = self.read_variable(&names.lon)?;
        let lat = self.read_variable(&names.lat)?;
        let speed = self.read_variable(&names.speed)?;
        let direction = self.read_variable(&names.direction)?;

        let grid = Grid::new(lon, lat)?;
        let scene = WindScene::new(grid, speed, direction)?;
        log::debug!("Scene {}:\n{}", self.file_name.display(), scene);
        Ok(scene)
    }
}

impl DataReader for NcReader {
    /// Scale and offset are applied; the no-data value becomes NaN.
    fn read_variable(&self, name: &str) -> Result<Array2<f64>, ReadError> {
        let subdataset = netcdf_subdataset(&self.file_name, name);
        log::debug!("Opening {}", subdataset);

        let dataset = Dataset::open(&subdataset)?;
        let (width, height) = dataset.raster_size();
        let band = dataset.rasterband(1)?;

        let buffer = band.read_as::<f64>((0, 0), (width, height), (width, height), None)?;
        let scale = band.scale().unwrap_or(1.0);
        let offset = band.offset().unwrap_or(0.0);
        let missing_value = band.no_data_value();

        let values: Vec<f64> = buffer
            .data()
            .iter()
            .map(|&raw| {
                if missing_value.is_some_and(|mv| raw == mv) {
                    f64::NAN
                } else {
                    raw * scale + offset
                }
            })
            .collect();

        log::info!("Read {} ({} x {})", name, height, width);

        Array2::from_shape_vec((height, width), values)
            .map_err(|e| ReadError::NetCDF(format!("{}: {}", name, e)))
    }
}
