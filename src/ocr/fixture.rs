//! Fixture detector
//!
//! Reads pre-recorded fragments from a JSON sidecar file next to the
//! image (`<image>.fragments.json`). Used by tests and demos so the
//! pipeline can run without a Tesseract installation.

use std::path::{Path, PathBuf};

use super::{Fragment, OcrError};

/// Sidecar path for an image: the image path with `.fragments.json`
/// appended to the full file name.
pub fn sidecar_path(image: &Path) -> PathBuf {
    let mut name = image.file_name().unwrap_or_default().to_os_string();
    name.push(".fragments.json");
    image.with_file_name(name)
}

/// Load fragments from the sidecar belonging to `image`.
pub fn load_sidecar(image: &Path) -> Result<Vec<Fragment>, OcrError> {
    let path = sidecar_path(image);
    if !path.exists() {
        return Err(OcrError::MissingFixture(path));
    }
    let content = std::fs::read_to_string(&path)?;
    let fragments: Vec<Fragment> = serde_json::from_str(&content)?;
    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sidecar_path_appends_suffix() {
        let path = sidecar_path(Path::new("/cards/jane.png"));
        assert_eq!(path, Path::new("/cards/jane.png.fragments.json"));
    }

    #[test]
    fn test_load_sidecar_roundtrip() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("card.jpg");
        let fragments = vec![
            Fragment::from_rect("Jane Doe", 10.0, 10.0, 120.0, 24.0, 0.97),
            Fragment::from_rect("Manager", 10.0, 40.0, 90.0, 20.0, 0.95),
        ];
        std::fs::write(
            sidecar_path(&image),
            serde_json::to_string_pretty(&fragments).unwrap(),
        )
        .unwrap();

        let loaded = load_sidecar(&image).unwrap();
        assert_eq!(loaded, fragments);
    }

    #[test]
    fn test_missing_sidecar_is_reported() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("card.jpg");
        let err = load_sidecar(&image).unwrap_err();
        assert!(matches!(err, OcrError::MissingFixture(_)));
    }

    #[test]
    fn test_invalid_sidecar_is_reported() {
        let dir = TempDir::new().unwrap();
        let image = dir.path().join("card.jpg");
        std::fs::write(sidecar_path(&image), "not json {{").unwrap();
        let err = load_sidecar(&image).unwrap_err();
        assert!(matches!(err, OcrError::InvalidFixture(_)));
    }
}
