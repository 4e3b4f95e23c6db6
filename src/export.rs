//! GeoTiff and JSON outputs of processed scenes.

use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use gdal::DriverManager;
use gdal::raster::Buffer;
use gdal::spatial_ref::SpatialRef;
use ndarray::{ArrayBase, Data, Ix2, s};
use serde::Serialize;

use crate::error::InvalidInputError;
use crate::georef::{Gcp, geotransform_from_gcps};

pub const DEFAULT_NODATA: f64 = -9999.0;

#[derive(Debug)]
pub enum ExportError {
    Gdal(gdal::errors::GdalError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Input(InvalidInputError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Gdal(e) => write!(f, "GDAL error: {}", e),
            ExportError::Io(e) => write!(f, "I/O error: {}", e),
            ExportError::Json(e) => write!(f, "Failed to write JSON: {}", e),
            ExportError::Input(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<gdal::errors::GdalError> for ExportError {
    fn from(err: gdal::errors::GdalError) -> ExportError {
        ExportError::Gdal(err)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> ExportError {
        ExportError::Io(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> ExportError {
        ExportError::Json(err)
    }
}

impl From<InvalidInputError> for ExportError {
    fn from(err: InvalidInputError) -> ExportError {
        ExportError::Input(err)
    }
}

fn remove_existing(path: &Path) -> Result<(), ExportError> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Raster rows in image order: the last grid row comes first.
fn image_rows<S>(field: &ArrayBase<S, Ix2>, nodata: f64) -> Vec<f32>
where
    S: Data<Elem = f64>,
{
    field
        .slice(s![..;-1, ..])
        .iter()
        .map(|&v| if v.is_nan() { nodata as f32 } else { v as f32 })
        .collect()
}

/// Writes `field` as a single-band Float32 GeoTiff in EPSG:4326, placed by the
/// corner GCPs of its grid. NaN cells are written as `nodata`.
pub fn write_geotiff<S>(
    field: &ArrayBase<S, Ix2>,
    gcps: &[Gcp; 4],
    path: &Path,
    nodata: f64,
) -> Result<(), ExportError>
where
    S: Data<Elem = f64>,
{
    let (rows, cols) = field.dim();
    if gcps[1].pixel_x as usize + 1 != cols || gcps[2].pixel_y as usize + 1 != rows {
        return Err(InvalidInputError::ShapeMismatch {
            expected: vec![gcps[2].pixel_y as usize + 1, gcps[1].pixel_x as usize + 1],
            found: vec![rows, cols],
        }
        .into());
    }

    let geo_transform = geotransform_from_gcps(gcps)?;

    log::info!("Output file: {}", path.display());
    remove_existing(path)?;

    log::debug!("Mapping of 4 corners:");
    for gcp in gcps {
        log::debug!(
            "  ({}, {}) -> {:.6}, {:.6}",
            gcp.pixel_x,
            gcp.pixel_y,
            gcp.lon,
            gcp.lat
        );
    }

    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut dataset = driver.create_with_band_type::<f32, _>(path, cols, rows, 1)?;
    dataset.set_geo_transform(&geo_transform)?;
    dataset.set_spatial_ref(&SpatialRef::from_epsg(4326)?)?;

    let mut band = dataset.rasterband(1)?;
    band.set_no_data_value(Some(nodata))?;

    let mut buffer = Buffer::new((cols, rows), image_rows(field, nodata));
    band.write((0, 0), (cols, rows), &mut buffer)?;

    Ok(())
}

/// Pretty-printed JSON report next to the rasters.
pub fn write_summary<T: Serialize>(report: &T, path: &Path) -> Result<(), ExportError> {
    log::info!("Output file: {}", path.display());
    remove_existing(path)?;

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
