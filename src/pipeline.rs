//! Extraction pipeline
//!
//! Strictly forward dataflow, one image at a time:
//! image file -> decoded pixels -> fragments -> classified record, plus the
//! box overlay rendering for visual confirmation. No retries, no background
//! work; a failure aborts processing for the current image only.

use std::path::Path;

use image::RgbaImage;
use thiserror::Error;
use tracing::info;

use crate::classify::{self, CardRecord, ClassifierVariant};
use crate::ocr::{Fragment, OcrError, OcrPipeline};
use crate::overlay::{draw_boxes, OverlayStyle};

/// Extraction failure taxonomy, mirroring the user-visible error classes:
/// unreadable file, undecodable image, OCR failure.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read image file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error(transparent)]
    Ocr(#[from] OcrError),
}

/// Result of one extraction pass over one image.
#[derive(Debug)]
pub struct Extraction {
    /// Classified record, carrying the original image bytes as blob
    pub record: CardRecord,
    /// Detected fragments in OCR order
    pub fragments: Vec<Fragment>,
    /// Image copy with fragment boxes drawn
    pub overlay: RgbaImage,
}

/// Run the full pipeline over the image at `path`.
pub fn extract(
    path: &Path,
    ocr: &OcrPipeline,
    variant: ClassifierVariant,
    style: &OverlayStyle,
) -> Result<Extraction, ExtractError> {
    let bytes = std::fs::read(path)?;
    let image = image::load_from_memory(&bytes)?;
    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "image decoded"
    );

    let fragments = ocr.detect(&image, path)?;
    let mut record = classify::classify(variant, &fragments);
    record.image = Some(bytes);

    let overlay = draw_boxes(&image, &fragments, style);

    info!(fragments = fragments.len(), "extraction complete");
    Ok(Extraction {
        record,
        fragments,
        overlay,
    })
}
