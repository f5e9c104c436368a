//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classify::ClassifierVariant;
use crate::ocr::OcrSettings;
use crate::overlay::OverlayStyle;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// OCR detection settings
    pub ocr: OcrSettings,
    /// Field classifier settings
    pub classifier: ClassifierSettings,
    /// Record store settings
    pub storage: StorageSettings,
    /// Fragment box overlay style
    pub overlay: OverlayStyle,
}

/// Field classifier settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Which heuristic variant assigns fields
    pub variant: ClassifierVariant,
}

/// Record store settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Database file path; None uses the platform data directory
    pub db_path: Option<PathBuf>,
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::OcrBackend;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        assert_eq!(config.ocr.backend, OcrBackend::Fixture);
        assert_eq!(config.ocr.language, "eng");
        assert!((config.ocr.min_confidence - 0.3).abs() < 0.01);

        assert_eq!(config.classifier.variant, ClassifierVariant::Positional);

        assert!(config.storage.db_path.is_none());

        assert_eq!(config.overlay.color, [255, 255, 0, 255]);
        assert_eq!(config.overlay.width, 2);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.ocr.backend, config.ocr.backend);
        assert_eq!(parsed.classifier.variant, config.classifier.variant);
        assert_eq!(parsed.overlay.width, config.overlay.width);
    }

    #[test]
    fn test_config_with_custom_values() {
        let mut config = AppConfig::default();
        config.ocr.backend = OcrBackend::Tesseract;
        config.classifier.variant = ClassifierVariant::FillOrder;
        config.storage.db_path = Some(PathBuf::from("/tmp/cards.db"));

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.ocr.backend, OcrBackend::Tesseract);
        assert_eq!(parsed.classifier.variant, ClassifierVariant::FillOrder);
        assert_eq!(parsed.storage.db_path, Some(PathBuf::from("/tmp/cards.db")));
    }

    #[test]
    fn test_save_and_load_config() {
        let config = AppConfig::default();
        let temp_file = NamedTempFile::new().unwrap();

        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded.ocr.language, config.ocr.language);
        assert_eq!(loaded.classifier.variant, config.classifier.variant);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
