pub mod nc;
pub mod types;
pub mod utils;

pub use nc::NcReader;
pub use types::{DataReader, ReadError, VariableNames, WindScene};

/// Loads the lon/lat grid and wind fields of one netCDF product.
pub fn read_wind_scene<P: AsRef<std::path::Path>>(
    file_name: P,
    names: &VariableNames,
) -> Result<WindScene, ReadError> {
    NcReader::new(file_name)?.read_scene(names)
}
