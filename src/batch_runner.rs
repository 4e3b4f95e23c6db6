use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use serde::Serialize;

use crate::bbox::Bbox;
use crate::config::Config;
use crate::error::InvalidInputError;
use crate::export::{ExportError, write_geotiff, write_summary};
use crate::georef::{Gcp, grid_corner_gcps};
use crate::kinematics::speed_direction_to_components;
use crate::readers::{WindScene, read_wind_scene};
use crate::stats::RegionSummary;
use crate::subset::select_speed_direction_in_box;

/// Everything derived from one scene before it is written out.
#[derive(Debug, Clone)]
pub struct SceneProducts {
    pub gcps: [Gcp; 4],
    pub u: Array2<f64>,
    pub v: Array2<f64>,
    pub region: Option<RegionSummary>,
}

impl SceneProducts {
    /// Normalizes the scene longitudes in place before deriving anything.
    pub fn derive(scene: &mut WindScene, bbox: Option<&Bbox>) -> Result<Self, InvalidInputError> {
        scene.grid.normalize_longitude();

        let gcps = grid_corner_gcps(&scene.grid)?;
        let (u, v) = speed_direction_to_components(&scene.speed, &scene.direction)?;

        let region = match bbox {
            Some(bbox) => {
                let (speed, direction) = select_speed_direction_in_box(
                    &scene.grid,
                    &scene.speed,
                    &scene.direction,
                    bbox,
                )?;
                Some(RegionSummary::from_samples(&speed, &direction)?)
            }
            None => None,
        };

        Ok(Self { gcps, u, v, region })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneReport {
    pub input: PathBuf,
    pub rows: usize,
    pub cols: usize,
    pub corners: [Gcp; 4],
    pub bbox: Option<Bbox>,
    pub region: Option<RegionSummary>,
    pub outputs: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct BatchRunner {
    config: Config,
}

impl BatchRunner {
    pub fn new(config: Config) -> Self {
        BatchRunner { config }
    }

    pub fn process(&self) -> Result<Vec<SceneReport>, Box<dyn Error>> {
        let inputs = self.config.input_files()?;
        log::info!(
            "Found {} input files for {}",
            inputs.len(),
            self.config.input_pattern()
        );

        fs::create_dir_all(self.config.output_directory())?;

        let mut reports = Vec::with_capacity(inputs.len());
        for input in &inputs {
            log::info!("Processing: {}", input.display());
            let mut scene = read_wind_scene(input, self.config.variables())?;
            reports.push(self.write_scene(input, &mut scene)?);
        }

        Ok(reports)
    }

    pub fn write_scene(
        &self,
        input: &Path,
        scene: &mut WindScene,
    ) -> Result<SceneReport, ExportError> {
        let products = SceneProducts::derive(scene, self.config.bbox())?;
        let (rows, cols) = scene.grid.dim();

        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scene".to_string());
        let out_dir = self.config.output_directory();
        let nodata = self.config.nodata();

        let mut outputs = Vec::new();
        for (suffix, field) in [
            ("wspd", &scene.speed),
            ("u", &products.u),
            ("v", &products.v),
        ] {
            let path = out_dir.join(format!("{}_{}.tif", stem, suffix));
            write_geotiff(field, &products.gcps, &path, nodata)?;
            outputs.push(path);
        }

        if let Some(region) = &products.region {
            log::info!(
                "{}: {} samples in region, mean speed {:.2} m/s, direction std {:.1} deg",
                stem,
                region.count,
                region.speed_mean,
                region.direction_std
            );
        }

        let mut report = SceneReport {
            input: input.to_path_buf(),
            rows,
            cols,
            corners: products.gcps,
            bbox: self.config.bbox().copied(),
            region: products.region,
            outputs,
        };

        if report.bbox.is_some() {
            let summary_path = out_dir.join(format!("{}_summary.json", stem));
            report.outputs.push(summary_path.clone());
            write_summary(&report, &summary_path)?;
        }

        Ok(report)
    }
}
