//! Anchoring of unprojected lon/lat grids into EPSG:4326.
//!
//! Raster row 0 is the *last* row of the geographic grid, so the corner
//! ground-control points are taken as:
//!
//! | pixel     | coordinate               |
//! |-----------|--------------------------|
//! | (0, 0)    | `lon[-1, 0], lat[-1, 0]` |
//! | (nx, 0)   | `lon[-1,-1], lat[-1,-1]` |
//! | (0, ny)   | `lon[0, 0], lat[0, 0]`   |
//! | (nx, ny)  | `lon[0,-1], lat[0,-1]`   |
//!
//! with `nx = cols - 1` and `ny = rows - 1`.

use serde::Serialize;

use crate::error::InvalidInputError;
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gcp {
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub lon: f64,
    pub lat: f64,
    pub elevation: f64,
}

pub fn grid_corner_gcps(grid: &Grid) -> Result<[Gcp; 4], InvalidInputError> {
    if grid.is_empty() {
        return Err(InvalidInputError::EmptyGrid);
    }

    let (rows, cols) = grid.dim();
    let (last_row, last_col) = (rows - 1, cols - 1);
    let (nx, ny) = (last_col as f64, last_row as f64);

    let gcp = |pixel_x: f64, pixel_y: f64, row: usize, col: usize| Gcp {
        pixel_x,
        pixel_y,
        lon: grid.lon()[[row, col]],
        lat: grid.lat()[[row, col]],
        elevation: 0.0,
    };

    Ok([
        gcp(0.0, 0.0, last_row, 0),
        gcp(nx, 0.0, last_row, last_col),
        gcp(0.0, ny, 0, 0),
        gcp(nx, ny, 0, last_col),
    ])
}

/// Least-squares affine fit of the corner GCPs, in GDAL geotransform order
/// (`[x0, dx/dpx, dx/dpy, y0, dy/dpx, dy/dpy]`).
///
/// Exact when the grid is itself affine; otherwise the residual is spread
/// evenly over the four corners.
pub fn geotransform_from_gcps(gcps: &[Gcp; 4]) -> Result<[f64; 6], InvalidInputError> {
    let [p00, p10, p01, p11] = gcps;
    let nx = p10.pixel_x;
    let ny = p01.pixel_y;

    if nx <= 0.0 || ny <= 0.0 {
        return Err(InvalidInputError::DegenerateGrid {
            rows: ny as usize + 1,
            cols: nx as usize + 1,
        });
    }

    // The corners form a rectangle in pixel space, so the normal equations
    // decouple into per-axis differences.
    let fit = |v00: f64, v10: f64, v01: f64, v11: f64| -> (f64, f64, f64) {
        let along_x = ((v10 - v00) + (v11 - v01)) / (2.0 * nx);
        let along_y = ((v01 - v00) + (v11 - v10)) / (2.0 * ny);
        let mean = (v00 + v10 + v01 + v11) / 4.0;
        let origin = mean - along_x * nx / 2.0 - along_y * ny / 2.0;
        (origin, along_x, along_y)
    };

    let (x0, x_px, x_py) = fit(p00.lon, p10.lon, p01.lon, p11.lon);
    let (y0, y_px, y_py) = fit(p00.lat, p10.lat, p01.lat, p11.lat);

    Ok([x0, x_px, x_py, y0, y_px, y_py])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    fn unit_grid() -> Grid {
        Grid::new(
            array![[0.0, 1.0], [0.0, 1.0]],
            array![[1.0, 1.0], [0.0, 0.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_corner_mapping() {
        let gcps = grid_corner_gcps(&unit_grid()).unwrap();
        let mapped: Vec<_> = gcps
            .iter()
            .map(|g| ((g.pixel_x, g.pixel_y), (g.lon, g.lat)))
            .collect();

        assert_eq!(
            mapped,
            vec![
                ((0.0, 0.0), (0.0, 0.0)),
                ((1.0, 0.0), (1.0, 0.0)),
                ((0.0, 1.0), (0.0, 1.0)),
                ((1.0, 1.0), (1.0, 1.0)),
            ]
        );
        assert!(gcps.iter().all(|g| g.elevation == 0.0));
    }

    #[test]
    fn test_corner_mapping_rectangular_grid() {
        // 3 rows, 4 columns, row 0 is the northern edge
        let lon = Array2::from_shape_fn((3, 4), |(_, c)| 10.0 + c as f64);
        let lat = Array2::from_shape_fn((3, 4), |(r, _)| 50.0 - r as f64);
        let grid = Grid::new(lon, lat).unwrap();
        let gcps = grid_corner_gcps(&grid).unwrap();

        assert_eq!((gcps[0].lon, gcps[0].lat), (10.0, 48.0));
        assert_eq!((gcps[1].pixel_x, gcps[1].pixel_y), (3.0, 0.0));
        assert_eq!((gcps[1].lon, gcps[1].lat), (13.0, 48.0));
        assert_eq!((gcps[2].pixel_x, gcps[2].pixel_y), (0.0, 2.0));
        assert_eq!((gcps[2].lon, gcps[2].lat), (10.0, 50.0));
        assert_eq!((gcps[3].lon, gcps[3].lat), (13.0, 50.0));
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::new(Array2::zeros((0, 3)), Array2::zeros((0, 3))).unwrap();
        assert_eq!(grid_corner_gcps(&grid), Err(InvalidInputError::EmptyGrid));
    }

    #[test]
    fn test_geotransform_of_affine_grid() {
        let gt = geotransform_from_gcps(&grid_corner_gcps(&unit_grid()).unwrap()).unwrap();
        let expected = [0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        for (a, b) in gt.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12, "{gt:?}");
        }
    }

    #[test]
    fn test_geotransform_reproduces_affine_corners() {
        // Slightly rotated grid
        let lon = Array2::from_shape_fn((5, 7), |(r, c)| -3.0 + 0.25 * c as f64 + 0.01 * r as f64);
        let lat = Array2::from_shape_fn((5, 7), |(r, c)| 42.0 - 0.2 * r as f64 + 0.02 * c as f64);
        let gcps = grid_corner_gcps(&Grid::new(lon, lat).unwrap()).unwrap();
        let gt = geotransform_from_gcps(&gcps).unwrap();

        for g in &gcps {
            let x = gt[0] + g.pixel_x * gt[1] + g.pixel_y * gt[2];
            let y = gt[3] + g.pixel_x * gt[4] + g.pixel_y * gt[5];
            assert!((x - g.lon).abs() < 1e-9 && (y - g.lat).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_row_is_degenerate() {
        let grid = Grid::new(array![[0.0, 1.0, 2.0]], array![[5.0, 5.0, 5.0]]).unwrap();
        let gcps = grid_corner_gcps(&grid).unwrap();
        assert_eq!(
            geotransform_from_gcps(&gcps),
            Err(InvalidInputError::DegenerateGrid { rows: 1, cols: 3 })
        );
    }
}
