//! Circular and NaN-aware linear statistics of wind fields.

use ndarray::{Array, ArrayBase, Axis, Data, Dimension, RemoveAxis};
use serde::Serialize;

use crate::error::{InvalidInputError, ensure_same_shape};

/// Empirical correction factor of the Yamartino (1984) estimator.
const YAMARTINO_COEFFICIENT: f64 = 0.1547;

/// Yamartino standard deviation, in degrees, of directions given in degrees.
///
/// NaN samples are skipped; an empty or all-NaN input yields NaN.
pub fn yamartino_std<I>(directions_deg: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0usize;
    let mut sin_sum = 0.0;
    let mut cos_sum = 0.0;

    for theta in directions_deg.into_iter().map(f64::to_radians) {
        let (sin, cos) = theta.sin_cos();
        if sin.is_nan() || cos.is_nan() {
            continue;
        }
        sin_sum += sin;
        cos_sum += cos;
        count += 1;
    }

    if count == 0 {
        return f64::NAN;
    }

    let sin_mean = sin_sum / count as f64;
    let cos_mean = cos_sum / count as f64;

    // Rounding can push the radicand slightly below zero
    let epsilon = (1.0 - sin_mean.powi(2) - cos_mean.powi(2)).max(0.0).sqrt();

    (epsilon.asin() * (1.0 + YAMARTINO_COEFFICIENT * epsilon.powi(3))).to_degrees()
}

fn check_axis(ndim: usize, axis: Axis) -> Result<(), InvalidInputError> {
    if axis.index() >= ndim {
        return Err(InvalidInputError::AxisOutOfBounds {
            axis: axis.index(),
            ndim,
        });
    }
    Ok(())
}

/// Circular standard deviation of directions along `axis`.
pub fn direction_std<S, D>(
    direction_deg: &ArrayBase<S, D>,
    axis: Axis,
) -> Result<Array<f64, D::Smaller>, InvalidInputError>
where
    S: Data<Elem = f64>,
    D: Dimension + RemoveAxis,
{
    check_axis(direction_deg.ndim(), axis)?;
    Ok(direction_deg.map_axis(axis, |lane| yamartino_std(lane.iter().copied())))
}

pub(crate) fn nan_mean_of<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

fn nan_std_of<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a f64> + Clone,
{
    let mean = nan_mean_of(values.clone());
    if mean.is_nan() {
        return f64::NAN;
    }

    let (sum_sq, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| {
            (sum + (v - mean).powi(2), count + 1)
        });

    (sum_sq / count as f64).sqrt()
}

/// Mean along `axis`, ignoring NaN samples.
pub fn nan_mean<S, D>(
    field: &ArrayBase<S, D>,
    axis: Axis,
) -> Result<Array<f64, D::Smaller>, InvalidInputError>
where
    S: Data<Elem = f64>,
    D: Dimension + RemoveAxis,
{
    check_axis(field.ndim(), axis)?;
    Ok(field.map_axis(axis, |lane| nan_mean_of(lane.iter())))
}

/// Population standard deviation along `axis`, ignoring NaN samples.
pub fn nan_std<S, D>(
    field: &ArrayBase<S, D>,
    axis: Axis,
) -> Result<Array<f64, D::Smaller>, InvalidInputError>
where
    S: Data<Elem = f64>,
    D: Dimension + RemoveAxis,
{
    check_axis(field.ndim(), axis)?;
    Ok(field.map_axis(axis, |lane| nan_std_of(lane.iter())))
}

/// Wind statistics of the samples collected within a region of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub count: usize,
    pub speed_mean: f64,
    pub speed_std: f64,
    pub direction_std: f64,
}

impl RegionSummary {
    pub fn from_samples(speed: &[f64], direction_deg: &[f64]) -> Result<Self, InvalidInputError> {
        ensure_same_shape(&[speed.len()], &[direction_deg.len()])?;

        Ok(Self {
            count: speed.iter().filter(|v| !v.is_nan()).count(),
            speed_mean: nan_mean_of(speed),
            speed_std: nan_std_of(speed),
            direction_std: yamartino_std(direction_deg.iter().copied()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, array};

    fn yamartino_reference(directions: &[f64]) -> f64 {
        let n = directions.len() as f64;
        let sa = directions.iter().map(|d| d.to_radians().sin()).sum::<f64>() / n;
        let ca = directions.iter().map(|d| d.to_radians().cos()).sum::<f64>() / n;
        let eps = (1.0 - sa * sa - ca * ca).max(0.0).sqrt();
        (eps.asin() * (1.0 + 0.1547 * eps.powi(3))).to_degrees()
    }

    #[test]
    fn test_uniform_directions() {
        let dirs = [0.0, 90.0, 180.0, 270.0];
        let std = yamartino_std(dirs);
        assert!((std - yamartino_reference(&dirs)).abs() < 1e-9, "{std}");
        assert!((std - 90.0 * 1.1547).abs() < 1e-3, "{std}");
    }

    #[test]
    fn test_constant_direction_has_zero_spread() {
        let std = yamartino_std([123.0; 10]);
        assert!(std.abs() < 1e-5, "{std}");
    }

    #[test]
    fn test_spread_across_north() {
        // 350 and 10 are 20 degrees apart, not 340
        let dirs = [350.0, 10.0];
        let std = yamartino_std(dirs);
        assert!((std - yamartino_reference(&dirs)).abs() < 1e-9);
        assert!(std > 9.0 && std < 11.0, "{std}");
    }

    #[test]
    fn test_nan_handling() {
        let with_nan = yamartino_std([10.0, f64::NAN, 30.0]);
        assert!((with_nan - yamartino_reference(&[10.0, 30.0])).abs() < 1e-9);
        assert!(yamartino_std([f64::NAN, f64::NAN]).is_nan());
        assert!(yamartino_std(std::iter::empty()).is_nan());
    }

    #[test]
    fn test_direction_std_along_axis() {
        let dirs = array![[0.0, 90.0, 180.0, 270.0], [45.0, 45.0, 45.0, 45.0]];

        let by_row = direction_std(&dirs, Axis(1)).unwrap();
        assert_eq!(by_row.len(), 2);
        assert!((by_row[0] - yamartino_reference(&[0.0, 90.0, 180.0, 270.0])).abs() < 1e-9);
        assert!(by_row[1].abs() < 1e-5);

        let by_col = direction_std(&dirs, Axis(0)).unwrap();
        assert_eq!(by_col.len(), 4);
        assert!((by_col[0] - yamartino_reference(&[0.0, 45.0])).abs() < 1e-9);

        assert_eq!(
            direction_std(&dirs, Axis(2)),
            Err(InvalidInputError::AxisOutOfBounds { axis: 2, ndim: 2 })
        );
    }

    #[test]
    fn test_time_axis_statistics() {
        // (time, rows, cols)
        let mut speed = Array3::<f64>::zeros((3, 1, 2));
        speed[[0, 0, 0]] = 2.0;
        speed[[1, 0, 0]] = 4.0;
        speed[[2, 0, 0]] = f64::NAN;
        for t in 0..3 {
            speed[[t, 0, 1]] = f64::NAN;
        }

        let mean = nan_mean(&speed, Axis(0)).unwrap();
        let std = nan_std(&speed, Axis(0)).unwrap();
        assert_eq!(mean.shape(), &[1, 2]);
        assert_eq!(mean[[0, 0]], 3.0);
        assert_eq!(std[[0, 0]], 1.0);
        assert!(mean[[0, 1]].is_nan());
        assert!(std[[0, 1]].is_nan());
    }

    #[test]
    fn test_region_summary() {
        let summary =
            RegionSummary::from_samples(&[2.0, 4.0, f64::NAN], &[90.0, 90.0, 90.0]).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.speed_mean, 3.0);
        assert_eq!(summary.speed_std, 1.0);
        assert!(summary.direction_std.abs() < 1e-5);

        assert!(RegionSummary::from_samples(&[1.0], &[]).is_err());
    }
}
