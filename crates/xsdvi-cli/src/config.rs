//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use xsdvi::{XsdviError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for XsdviError {
    fn from(err: ConfigError) -> Self {
        XsdviError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (xsdvi/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, XsdviError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("xsdvi/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "xsdvi", "xsdvi") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, XsdviError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content).map_err(Into::into)
}

fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use xsdvi::config::{StyleMode, TextMeasureKind};

    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();

        assert_eq!(config.layout().text_measure(), TextMeasureKind::Estimate);
        assert_eq!(config.layout().font_family(), "Arial");
        assert_eq!(config.style().mode(), StyleMode::Embody);
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(
            r#"
            [layout]
            text_measure = "font"
            font_family = "DejaVu Sans"
            font_size = 12.0

            [style]
            mode = "link"
            uri = "https://example.com/xsdvi.css"
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().text_measure(), TextMeasureKind::Font);
        assert_eq!(config.layout().font_family(), "DejaVu Sans");
        assert_eq!(config.layout().font_size(), 12.0);
        assert_eq!(
            config.style().link_uri(),
            Some("https://example.com/xsdvi.css")
        );
    }

    #[test]
    fn test_invalid_value_is_parse_error() {
        let result = parse_config("[style]\nmode = \"inline\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[style]\nmode = \"link\"\nuri = \"a.css\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.style().link_uri(), Some("a.css"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path().join("absent.toml")));

        assert!(matches!(result, Err(XsdviError::Config(_))));
    }
}
