//! Utility functions for polygon-plugins

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(anyhow!("Path exists but is not a directory: {:?}", path));
    }
    Ok(())
}

/// Get the XDG config directory for polygon-plugins
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?
        .join("polygon-plugins");

    Ok(config_dir)
}

/// Expand `~` and environment variables in a path
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::full(&path_str)
        .map_err(|e| anyhow!("Failed to expand path {:?}: {}", path, e))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Format an area for display
pub fn format_area(area: f64) -> String {
    format!("{:.2}", area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directory() {
        let temp_dir = TempDir::new().unwrap();
        let test_dir = temp_dir.path().join("test_dir");

        ensure_directory(&test_dir).unwrap();
        assert!(test_dir.exists());
        assert!(test_dir.is_dir());

        let file = temp_dir.path().join("file");
        fs::write(&file, "").unwrap();
        assert!(ensure_directory(&file).is_err());
    }

    #[test]
    fn test_expand_path() {
        let plain = expand_path(Path::new("./plugins")).unwrap();
        assert_eq!(plain, PathBuf::from("./plugins"));

        if let Some(home) = dirs::home_dir() {
            let expanded = expand_path(Path::new("~/plugins")).unwrap();
            assert_eq!(expanded, home.join("plugins"));
        }

        assert!(expand_path(Path::new("$POLYGON_PLUGINS_UNSET_VARIABLE/x")).is_err());
    }

    #[test]
    fn test_format_area() {
        assert_eq!(format_area(43.30127018922193), "43.30");
        assert_eq!(format_area(100.0), "100.00");
    }
}
