use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InvalidInputError;

/// Region of interest in geographic degrees, closed on all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bbox {
    lon_min: f64,
    lon_max: f64,
    lat_min: f64,
    lat_max: f64,
}

impl Bbox {
    pub fn new(
        lon_min: f64,
        lon_max: f64,
        lat_min: f64,
        lat_max: f64,
    ) -> Result<Self, InvalidInputError> {
        if ![lon_min, lon_max, lat_min, lat_max]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(InvalidInputError::InvalidBbox(
                "bounds must be finite".to_string(),
            ));
        }

        if !(-90.0..=90.0).contains(&lat_min) || !(-90.0..=90.0).contains(&lat_max) {
            return Err(InvalidInputError::InvalidBbox(
                "latitude values must be between -90 and 90".to_string(),
            ));
        }

        if lon_min > lon_max || lat_min > lat_max {
            return Err(InvalidInputError::InvalidBbox(
                "min values must be <= max values".to_string(),
            ));
        }

        Ok(Bbox {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        })
    }

    pub fn lon_min(&self) -> f64 {
        self.lon_min
    }

    pub fn lon_max(&self) -> f64 {
        self.lon_max
    }

    pub fn lat_min(&self) -> f64 {
        self.lat_min
    }

    pub fn lat_max(&self) -> f64 {
        self.lat_max
    }

    /// NaN coordinates are never inside.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max && lat >= self.lat_min && lat <= self.lat_max
    }
}

impl<'de> Deserialize<'de> for Bbox {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct BboxHelper {
            lon_min: f64,
            lon_max: f64,
            lat_min: f64,
            lat_max: f64,
        }

        let helper = BboxHelper::deserialize(deserializer)?;
        Bbox::new(
            helper.lon_min,
            helper.lon_max,
            helper.lat_min,
            helper.lat_max,
        )
        .map_err(serde::de::Error::custom)
    }
}
