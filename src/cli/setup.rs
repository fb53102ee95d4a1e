use crate::cli::ui;
use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Commented starter config; also the reference for every supported key.
const DEFAULT_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the starter config to `config_path`, or to the platform config
/// directory when no path is given, and returns a confirmation line.
pub fn setup(config_path: Option<&str>) -> Result<String> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => AppConfig::default_config_path()?,
    };
    setup_at_path(&path)?;
    Ok(ui::styled(
        &format!("Wrote the starter configuration to {}.", path.display()),
        ui::Tone::Saved,
    ))
}

/// Never overwrites: an existing file at `path` is an error.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!(path = %path.display(), "Wrote starter configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_setup_creates_config_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.yaml");

        setup_at_path(&config_path)?;

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path)?;
        assert!(content.contains("locale:"));
        assert!(content.contains("# Example configuration file for commerce-admin"));

        Ok(())
    }

    #[test]
    fn test_setup_fails_if_config_exists() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");

        std::fs::write(&config_path, "test")?;

        let result = setup_at_path(&config_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));

        Ok(())
    }

    #[test]
    fn test_setup_honours_config_path() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("admin.yaml");

        let message = setup(config_path.to_str())?;

        assert!(message.contains("admin.yaml"));
        let config = AppConfig::load_from_path(&config_path)?;
        assert_eq!(config.locale, "en");

        Ok(())
    }

    #[test]
    fn test_example_config_is_valid_yaml() -> Result<()> {
        let config: AppConfig =
            serde_yaml::from_str(DEFAULT_CONFIG).context("Failed to parse example config as YAML")?;

        assert_eq!(config.locale, "en");
        assert!(config.autocomplete.match_operator.is_some());

        Ok(())
    }
}
