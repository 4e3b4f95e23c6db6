//! Geographic grids of cell-centre coordinates.

use ndarray::{Array, Array2, ArrayBase, Data, DataMut, Dimension};

use crate::error::{InvalidInputError, ensure_same_shape};

/// Paired longitude/latitude arrays of shape `(rows, cols)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    lon: Array2<f64>,
    lat: Array2<f64>,
}

impl Grid {
    pub fn new(lon: Array2<f64>, lat: Array2<f64>) -> Result<Self, InvalidInputError> {
        ensure_same_shape(lon.shape(), lat.shape())?;
        Ok(Self { lon, lat })
    }

    pub fn lon(&self) -> &Array2<f64> {
        &self.lon
    }

    pub fn lat(&self) -> &Array2<f64> {
        &self.lat
    }

    /// `(rows, cols)`
    pub fn dim(&self) -> (usize, usize) {
        self.lon.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }

    pub fn check_field<S>(
        &self,
        field: &ArrayBase<S, ndarray::Ix2>,
    ) -> Result<(), InvalidInputError>
    where
        S: Data<Elem = f64>,
    {
        ensure_same_shape(self.lon.shape(), field.shape())
    }

    /// Brings longitudes from `[0, 360)` into `(-180, 180]`, in place.
    pub fn normalize_longitude(&mut self) {
        normalize_longitude(&mut self.lon);
    }

    /// Closed ring of `(lon, lat)` corners around the tile.
    pub fn outline(&self) -> Result<[(f64, f64); 5], InvalidInputError> {
        if self.is_empty() {
            return Err(InvalidInputError::EmptyGrid);
        }
        let (rows, cols) = self.dim();
        let corner = |r: usize, c: usize| (self.lon[[r, c]], self.lat[[r, c]]);
        Ok([
            corner(0, 0),
            corner(rows - 1, 0),
            corner(rows - 1, cols - 1),
            corner(0, cols - 1),
            corner(0, 0),
        ])
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    if lon > 180.0 && lon.is_finite() {
        lon - 360.0 * ((lon - 180.0) / 360.0).ceil()
    } else {
        lon
    }
}

/// Subtracts whole turns from every longitude above 180 degrees.
///
/// Values at or below 180 (including NaN and infinities) are left untouched, so
/// applying it twice gives the same result as applying it once.
pub fn normalize_longitude<S, D>(lon: &mut ArrayBase<S, D>)
where
    S: DataMut<Elem = f64>,
    D: Dimension,
{
    lon.mapv_inplace(wrap_longitude);
}

/// Copying variant of [`normalize_longitude`].
pub fn normalized_longitude<S, D>(lon: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    lon.mapv(wrap_longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    #[test]
    fn test_grid_rejects_mismatched_shapes() {
        let lon = Array2::<f64>::zeros((2, 3));
        let lat = Array2::<f64>::zeros((3, 2));
        assert_eq!(
            Grid::new(lon, lat),
            Err(InvalidInputError::ShapeMismatch {
                expected: vec![2, 3],
                found: vec![3, 2],
            })
        );
    }

    #[test]
    fn test_check_field() {
        let grid = Grid::new(Array2::zeros((2, 2)), Array2::zeros((2, 2))).unwrap();
        assert!(grid.check_field(&Array2::<f64>::zeros((2, 2))).is_ok());
        assert!(grid.check_field(&Array2::<f64>::zeros((2, 1))).is_err());
    }

    #[test]
    fn test_normalize_longitude() {
        let mut lon = array![0.0, 90.0, 180.0, 180.5, 270.0, 359.0, -170.0];
        normalize_longitude(&mut lon);
        assert_eq!(lon, array![0.0, 90.0, 180.0, -179.5, -90.0, -1.0, -170.0]);
    }

    #[test]
    fn test_normalize_longitude_is_idempotent() {
        let lon = array![-200.0, -180.0, 0.0, 181.0, 359.9, 540.0, 720.5, f64::NAN];
        let once = normalized_longitude(&lon);
        let twice = normalized_longitude(&once);
        for (a, b) in once.iter().zip(twice.iter()) {
            assert!(a == b || (a.is_nan() && b.is_nan()));
        }

        let in_range = array![-179.0, 0.0, 180.0, 181.0, 360.0, 540.0, 720.5];
        for v in normalized_longitude(&in_range).iter() {
            assert!(*v > -180.0 && *v <= 180.0, "{v}");
        }
    }

    #[test]
    fn test_normalize_longitude_empty() {
        let mut lon = Array1::<f64>::zeros(0);
        normalize_longitude(&mut lon);
        assert!(lon.is_empty());
    }

    #[test]
    fn test_outline() {
        let grid = Grid::new(
            array![[0.0, 1.0], [0.0, 1.0]],
            array![[1.0, 1.0], [0.0, 0.0]],
        )
        .unwrap();
        let ring = grid.outline().unwrap();
        assert_eq!(
            ring,
            [(0.0, 1.0), (0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        );
    }
}
