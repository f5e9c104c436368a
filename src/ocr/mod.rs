//! OCR Layer
//!
//! Detects text fragments in a business card image. The OCR engine is an
//! external collaborator behind a feature-gated backend:
//! - Fixture: deterministic fragments from a JSON sidecar (tests, demos)
//! - Tesseract: real detection via the kreuzberg-tesseract bindings

#[cfg(feature = "backend-fixture")]
pub mod fixture;
#[cfg(feature = "backend-tesseract")]
pub mod tesseract;

use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// OCR backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrBackend {
    /// Fragments read from a `<image>.fragments.json` sidecar
    #[default]
    Fixture,
    /// Tesseract OCR
    Tesseract,
}

/// One OCR-detected text span: its content, bounding quadrilateral, and
/// recognition confidence. Immutable once produced; fragment order is the
/// order the detector returned them (roughly top-to-bottom, left-to-right,
/// but not guaranteed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Detected text content
    pub text: String,
    /// Bounding quadrilateral, four (x, y) corners
    pub quad: [(f32, f32); 4],
    /// Recognition confidence (0.0 - 1.0)
    pub confidence: f32,
}

impl Fragment {
    /// Axis-aligned bounding box (x, y, width, height) of the quad.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let min_x = self.quad.iter().map(|p| p.0).fold(f32::INFINITY, f32::min);
        let min_y = self.quad.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
        let max_x = self.quad.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max);
        let max_y = self.quad.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);
        (min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Build an axis-aligned fragment from a (x, y, width, height) rect.
    pub fn from_rect(text: impl Into<String>, x: f32, y: f32, w: f32, h: f32, confidence: f32) -> Self {
        Self {
            text: text.into(),
            quad: [(x, y), (x + w, y), (x + w, y + h), (x, y + h)],
            confidence,
        }
    }
}

/// OCR detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrSettings {
    /// Backend to use
    pub backend: OcrBackend,
    /// Minimum recognition confidence (0.0 - 1.0); lower results are dropped
    pub min_confidence: f32,
    /// Detection language (Tesseract language code)
    pub language: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            backend: OcrBackend::default(),
            min_confidence: 0.3,
            language: "eng".to_string(),
        }
    }
}

/// OCR failure taxonomy. All variants abort processing for the current
/// image only; they are reported inline and never crash the process.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR backend '{0}' is not available in this build")]
    BackendUnavailable(&'static str),
    #[error("no fragment sidecar found at {}", .0.display())]
    MissingFixture(PathBuf),
    #[error("failed to parse fragment sidecar: {0}")]
    InvalidFixture(#[from] serde_json::Error),
    #[error("failed to read fragment sidecar: {0}")]
    FixtureIo(#[from] std::io::Error),
    #[error("text detection failed: {0}")]
    DetectionFailed(String),
}

/// Detector dispatch over the configured backend.
pub struct OcrPipeline {
    settings: OcrSettings,
}

impl OcrPipeline {
    pub fn new(settings: OcrSettings) -> Self {
        Self { settings }
    }

    pub fn backend(&self) -> OcrBackend {
        self.settings.backend
    }

    pub fn set_backend(&mut self, backend: OcrBackend) {
        self.settings.backend = backend;
    }

    /// Detect text fragments in a decoded image. `source` is the path the
    /// image was loaded from; the fixture backend uses it to locate the
    /// fragment sidecar.
    pub fn detect(&self, image: &DynamicImage, source: &Path) -> Result<Vec<Fragment>, OcrError> {
        let fragments = match self.settings.backend {
            OcrBackend::Fixture => self.detect_fixture(source)?,
            OcrBackend::Tesseract => self.detect_tesseract(image)?,
        };

        let kept: Vec<Fragment> = fragments
            .into_iter()
            .filter(|f| f.confidence >= self.settings.min_confidence)
            .collect();
        debug!(
            backend = ?self.settings.backend,
            fragments = kept.len(),
            "text detection complete"
        );
        Ok(kept)
    }

    #[cfg(feature = "backend-fixture")]
    fn detect_fixture(&self, source: &Path) -> Result<Vec<Fragment>, OcrError> {
        fixture::load_sidecar(source)
    }

    #[cfg(not(feature = "backend-fixture"))]
    fn detect_fixture(&self, _source: &Path) -> Result<Vec<Fragment>, OcrError> {
        Err(OcrError::BackendUnavailable("fixture"))
    }

    #[cfg(feature = "backend-tesseract")]
    fn detect_tesseract(&self, image: &DynamicImage) -> Result<Vec<Fragment>, OcrError> {
        let detector = tesseract::TesseractDetector::new(&self.settings.language);
        detector.detect(image)
    }

    #[cfg(not(feature = "backend-tesseract"))]
    fn detect_tesseract(&self, _image: &DynamicImage) -> Result<Vec<Fragment>, OcrError> {
        Err(OcrError::BackendUnavailable("tesseract"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_bounds_from_quad() {
        let fragment = Fragment {
            text: "x".to_string(),
            quad: [(10.0, 5.0), (50.0, 6.0), (49.0, 25.0), (11.0, 24.0)],
            confidence: 0.9,
        };
        let (x, y, w, h) = fragment.bounds();
        assert_eq!(x, 10.0);
        assert_eq!(y, 5.0);
        assert_eq!(w, 40.0);
        assert_eq!(h, 20.0);
    }

    #[test]
    fn test_from_rect_produces_closed_quad() {
        let fragment = Fragment::from_rect("x", 1.0, 2.0, 10.0, 4.0, 1.0);
        assert_eq!(fragment.quad[0], (1.0, 2.0));
        assert_eq!(fragment.quad[2], (11.0, 6.0));
        assert_eq!(fragment.bounds(), (1.0, 2.0, 10.0, 4.0));
    }

    #[test]
    #[cfg(feature = "backend-fixture")]
    fn test_low_confidence_fragments_filtered() {
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("card.png");
        let fragments = vec![
            Fragment::from_rect("keep", 0.0, 0.0, 10.0, 10.0, 0.9),
            Fragment::from_rect("drop", 0.0, 20.0, 10.0, 10.0, 0.1),
        ];
        let sidecar = crate::ocr::fixture::sidecar_path(&image_path);
        std::fs::write(&sidecar, serde_json::to_vec(&fragments).unwrap()).unwrap();

        let pipeline = OcrPipeline::new(OcrSettings::default());
        let image = DynamicImage::new_rgba8(32, 32);
        let detected = pipeline.detect(&image, &image_path).unwrap();
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].text, "keep");
    }
}
