use std::path::Path;

/// GDAL subdataset path of a netCDF variable.
pub fn netcdf_subdataset(path: &Path, variable: &str) -> String {
    format!("NETCDF:{}:{}", path.display(), variable)
}

pub fn is_netcdf(path: &Path) -> bool {
    matches!(path.extension().and_then(|ext| ext.to_str()), Some("nc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_netcdf_subdataset() {
        assert_eq!(
            netcdf_subdataset(Path::new("/data/s1a.nc"), "owiWindSpeed"),
            "NETCDF:/data/s1a.nc:owiWindSpeed"
        );
    }

    #[test]
    fn test_is_netcdf() {
        assert!(is_netcdf(Path::new("scene.nc")));
        assert!(!is_netcdf(Path::new("scene.tif")));
        assert!(!is_netcdf(Path::new("scene")));
    }
}
