//! Conversions between wind speed/direction and zonal/meridional components.
//!
//! Directions follow the meteorological convention: degrees clockwise from true
//! north, pointing to where the wind blows *from*. A northerly wind (0 degrees)
//! therefore has a negative meridional component.

use ndarray::{Array, ArrayBase, Data, Dimension, Zip};

use crate::error::{InvalidInputError, ensure_same_shape};

/// Speeds below this threshold (m/s) are treated as land in SAR wind products.
pub const LAND_SPEED_THRESHOLD: f64 = 0.001;

/// `(u, v)` for a single sample.
///
/// Negative speeds are not rejected; they flip the sign of both components.
pub fn wind_components(speed: f64, direction_deg: f64) -> (f64, f64) {
    let (sin, cos) = direction_deg.to_radians().sin_cos();
    (-speed * sin, -speed * cos)
}

/// Meteorological direction of a single `(u, v)` pair.
///
/// Only results at or above 360 are wrapped back; nothing is lifted from below 0.
pub fn wind_direction(u: f64, v: f64) -> f64 {
    let direction = 270.0 - v.atan2(u).to_degrees();
    if direction >= 360.0 {
        direction - 360.0
    } else {
        direction
    }
}

pub fn wind_speed(u: f64, v: f64) -> f64 {
    u.hypot(v)
}

pub fn speed_direction_to_components<S1, S2, D>(
    speed: &ArrayBase<S1, D>,
    direction_deg: &ArrayBase<S2, D>,
) -> Result<(Array<f64, D>, Array<f64, D>), InvalidInputError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    ensure_same_shape(speed.shape(), direction_deg.shape())?;

    let u = Zip::from(speed)
        .and(direction_deg)
        .map_collect(|&s, &d| wind_components(s, d).0);
    let v = Zip::from(speed)
        .and(direction_deg)
        .map_collect(|&s, &d| wind_components(s, d).1);

    Ok((u, v))
}

pub fn components_to_direction<S1, S2, D>(
    u: &ArrayBase<S1, D>,
    v: &ArrayBase<S2, D>,
) -> Result<Array<f64, D>, InvalidInputError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    ensure_same_shape(u.shape(), v.shape())?;
    Ok(Zip::from(u).and(v).map_collect(|&u, &v| wind_direction(u, v)))
}

/// 1.0 over sea, NaN over land (speed below [`LAND_SPEED_THRESHOLD`]).
pub fn land_mask<S, D>(speed: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    speed.mapv(|s| if s < LAND_SPEED_THRESHOLD { f64::NAN } else { 1.0 })
}
