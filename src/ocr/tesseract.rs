//! Tesseract detector
//!
//! Runs Tesseract over the decoded image and groups word-level TSV output
//! into line fragments, which is the granularity the classifier expects
//! (one fragment per printed line of the card).

use std::env;
use std::path::Path;

use image::DynamicImage;
use kreuzberg_tesseract::TesseractAPI;
use tracing::debug;

use super::{Fragment, OcrError};

/// Common tessdata locations probed when TESSDATA_PREFIX is unset.
const TESSDATA_FALLBACKS: &[&str] = &[
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
];

/// Word row from Tesseract's TSV output (level 5).
struct TsvWord {
    block: u32,
    par: u32,
    line: u32,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    conf: f32,
    text: String,
}

pub struct TesseractDetector {
    language: String,
}

impl TesseractDetector {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    /// Detect text in the image, returning one fragment per line.
    pub fn detect(&self, image: &DynamicImage) -> Result<Vec<Fragment>, OcrError> {
        if self.language.trim().is_empty() {
            return Err(OcrError::DetectionFailed(
                "language code must not be empty".to_string(),
            ));
        }

        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let bytes_per_pixel = 3;
        let bytes_per_line = width * bytes_per_pixel;

        let tessdata = env::var("TESSDATA_PREFIX").ok().unwrap_or_else(|| {
            TESSDATA_FALLBACKS
                .iter()
                .find(|p| Path::new(p).exists())
                .map(|p| (*p).to_string())
                .unwrap_or_default()
        });

        let api = TesseractAPI::new();
        api.init(&tessdata, &self.language)
            .map_err(|e| OcrError::DetectionFailed(format!("tesseract init: {e}")))?;
        api.set_image(
            rgb.as_raw(),
            width as i32,
            height as i32,
            bytes_per_pixel as i32,
            bytes_per_line as i32,
        )
        .map_err(|e| OcrError::DetectionFailed(format!("set image: {e}")))?;
        api.recognize()
            .map_err(|e| OcrError::DetectionFailed(format!("recognize: {e}")))?;

        let tsv = api
            .get_tsv_text(0)
            .map_err(|e| OcrError::DetectionFailed(format!("tsv output: {e}")))?;

        let fragments = group_tsv_lines(&tsv);
        debug!(lines = fragments.len(), "tesseract detection complete");
        Ok(fragments)
    }
}

/// Parse Tesseract TSV output and merge word rows into line fragments.
///
/// TSV columns: level, page_num, block_num, par_num, line_num, word_num,
/// left, top, width, height, conf, text. Word rows are level 5; rows from
/// the same (block, par, line) join into one fragment with a union
/// bounding box and the mean word confidence.
fn group_tsv_lines(tsv: &str) -> Vec<Fragment> {
    const MIN_FIELDS: usize = 12;
    const WORD_LEVEL: u32 = 5;

    let mut words = Vec::new();
    for (row, line) in tsv.lines().enumerate() {
        if row == 0 {
            continue; // header
        }
        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() < MIN_FIELDS {
            continue;
        }
        if fields[0].parse::<u32>().unwrap_or(0) != WORD_LEVEL {
            continue;
        }
        let conf: f32 = fields[10].parse().unwrap_or(-1.0);
        let text = fields[11].trim();
        if conf < 0.0 || text.is_empty() {
            continue;
        }
        words.push(TsvWord {
            block: fields[2].parse().unwrap_or(0),
            par: fields[3].parse().unwrap_or(0),
            line: fields[4].parse().unwrap_or(0),
            left: fields[6].parse().unwrap_or(0.0),
            top: fields[7].parse().unwrap_or(0.0),
            width: fields[8].parse().unwrap_or(0.0),
            height: fields[9].parse().unwrap_or(0.0),
            conf,
            text: text.to_string(),
        });
    }

    let mut fragments: Vec<Fragment> = Vec::new();
    let mut current_key: Option<(u32, u32, u32)> = None;
    let mut current: Vec<TsvWord> = Vec::new();

    for word in words {
        let key = (word.block, word.par, word.line);
        if current_key != Some(key) {
            if let Some(fragment) = merge_line(&current) {
                fragments.push(fragment);
            }
            current.clear();
            current_key = Some(key);
        }
        current.push(word);
    }
    if let Some(fragment) = merge_line(&current) {
        fragments.push(fragment);
    }

    fragments
}

fn merge_line(words: &[TsvWord]) -> Option<Fragment> {
    if words.is_empty() {
        return None;
    }
    let text = words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let min_x = words.iter().map(|w| w.left).fold(f32::INFINITY, f32::min);
    let min_y = words.iter().map(|w| w.top).fold(f32::INFINITY, f32::min);
    let max_x = words
        .iter()
        .map(|w| w.left + w.width)
        .fold(f32::NEG_INFINITY, f32::max);
    let max_y = words
        .iter()
        .map(|w| w.top + w.height)
        .fold(f32::NEG_INFINITY, f32::max);
    // Tesseract reports confidence 0-100
    let conf = words.iter().map(|w| w.conf).sum::<f32>() / words.len() as f32 / 100.0;

    Some(Fragment::from_rect(
        text,
        min_x,
        min_y,
        max_x - min_x,
        max_y - min_y,
        conf,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TSV: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
5\t1\t1\t1\t1\t1\t10\t10\t60\t20\t96.0\tJane\n\
5\t1\t1\t1\t1\t2\t80\t10\t60\t20\t94.0\tDoe\n\
5\t1\t1\t1\t2\t1\t10\t40\t90\t18\t91.0\tManager\n\
4\t1\t1\t1\t2\t0\t10\t40\t90\t18\t-1\t\n";

    #[test]
    fn test_words_grouped_into_lines() {
        let fragments = group_tsv_lines(SAMPLE_TSV);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "Jane Doe");
        assert_eq!(fragments[1].text, "Manager");
    }

    #[test]
    fn test_line_bounds_union_words() {
        let fragments = group_tsv_lines(SAMPLE_TSV);
        let (x, y, w, h) = fragments[0].bounds();
        assert_eq!((x, y), (10.0, 10.0));
        assert_eq!((w, h), (130.0, 20.0));
    }

    #[test]
    fn test_line_confidence_is_mean_of_words() {
        let fragments = group_tsv_lines(SAMPLE_TSV);
        assert!((fragments[0].confidence - 0.95).abs() < 1e-4);
    }

    #[test]
    fn test_non_word_rows_ignored() {
        let fragments = group_tsv_lines("level\t...\n3\t1\t1\t0\t0\t0\t0\t0\t0\t0\t-1\t\n");
        assert!(fragments.is_empty());
    }
}
