//! Extraction of grid cells and point records within a region of interest.

use ndarray::{Array2, ArrayBase, Data, Ix1, Ix2, Zip};

use crate::bbox::Bbox;
use crate::error::{InvalidInputError, ensure_same_shape};
use crate::grid::Grid;
use crate::stats::nan_mean_of;

/// `true` for every cell whose centre lies inside `bbox`.
pub fn box_mask(grid: &Grid, bbox: &Bbox) -> Array2<bool> {
    Zip::from(grid.lon())
        .and(grid.lat())
        .map_collect(|&lon, &lat| bbox.contains(lon, lat))
}

fn select_masked<S>(field: &ArrayBase<S, Ix2>, mask: &Array2<bool>) -> Vec<f64>
where
    S: Data<Elem = f64>,
{
    field
        .iter()
        .zip(mask.iter())
        .filter_map(|(&value, &inside)| inside.then_some(value))
        .collect()
}

/// Values of `field` at the cells inside `bbox`, in row-major order.
pub fn select_in_box<S>(
    grid: &Grid,
    field: &ArrayBase<S, Ix2>,
    bbox: &Bbox,
) -> Result<Vec<f64>, InvalidInputError>
where
    S: Data<Elem = f64>,
{
    grid.check_field(field)?;
    Ok(select_masked(field, &box_mask(grid, bbox)))
}

/// Speed and direction inside `bbox`, selected with one shared mask so that
/// the i-th speed and the i-th direction come from the same cell.
pub fn select_speed_direction_in_box<S1, S2>(
    grid: &Grid,
    speed: &ArrayBase<S1, Ix2>,
    direction: &ArrayBase<S2, Ix2>,
    bbox: &Bbox,
) -> Result<(Vec<f64>, Vec<f64>), InvalidInputError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    grid.check_field(speed)?;
    grid.check_field(direction)?;

    let mask = box_mask(grid, bbox);
    Ok((select_masked(speed, &mask), select_masked(direction, &mask)))
}

/// Whether the mean position of a point record (e.g. a moored buoy) is in `bbox`.
///
/// NaN positions are ignored; a record with no valid position is never inside.
pub fn point_in_box<S1, S2>(
    lon: &ArrayBase<S1, Ix1>,
    lat: &ArrayBase<S2, Ix1>,
    bbox: &Bbox,
) -> Result<bool, InvalidInputError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    ensure_same_shape(lon.shape(), lat.shape())?;

    Ok(bbox.contains(nan_mean_of(lon.iter()), nan_mean_of(lat.iter())))
}
