//! Field Classification Layer
//!
//! Maps an ordered list of OCR-detected text fragments to the labeled
//! fields of a business card. Two heuristic variants are available:
//! - Positional: pattern rules plus first/last-fragment position rules
//! - Fill-order: pattern rules plus fill-in-order fallback slots
//!
//! Both are order-dependent, first-match-wins rule chains; swapping rule
//! order changes results, so each variant keeps its rules as an explicit
//! ordered list.

pub mod fill_order;
pub mod rules;

use serde::{Deserialize, Serialize};

use crate::ocr::Fragment;

/// Classification heuristic selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierVariant {
    /// Pattern rules plus positional rules (first fragment = holder,
    /// second = designation, last = company). Authoritative default.
    #[default]
    Positional,
    /// Pattern rules plus strict fill-order fallback slots
    /// (company, holder, area, city, state in order of arrival).
    FillOrder,
}

/// Structured representation of one business card's contact data.
///
/// All ten string fields are always present; a field the classifier could
/// not assign stays an empty string. `id` is assigned by the record store
/// on insert; `image` optionally carries the original upload bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Store-assigned row id (None until inserted)
    #[serde(skip)]
    pub id: Option<i64>,
    pub company_name: String,
    pub card_holder: String,
    pub designation: String,
    pub mobile_number: String,
    pub email: String,
    pub website: String,
    pub area: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    /// Original uploaded image bytes (PNG/JPEG), stored as a blob
    #[serde(skip)]
    pub image: Option<Vec<u8>>,
}

/// Display labels for the ten card fields, in schema order.
pub const FIELD_LABELS: [&str; 10] = [
    "Company name",
    "Cardholder",
    "Designation",
    "Mobile number",
    "Email",
    "Website",
    "Area",
    "City",
    "State",
    "Pin code",
];

impl CardRecord {
    /// The ten fields in schema order, paired with their display labels.
    pub fn fields(&self) -> [(&'static str, &str); 10] {
        [
            (FIELD_LABELS[0], &self.company_name),
            (FIELD_LABELS[1], &self.card_holder),
            (FIELD_LABELS[2], &self.designation),
            (FIELD_LABELS[3], &self.mobile_number),
            (FIELD_LABELS[4], &self.email),
            (FIELD_LABELS[5], &self.website),
            (FIELD_LABELS[6], &self.area),
            (FIELD_LABELS[7], &self.city),
            (FIELD_LABELS[8], &self.state),
            (FIELD_LABELS[9], &self.pin_code),
        ]
    }

    /// Mutable access to the ten fields in schema order, for form editing.
    pub fn fields_mut(&mut self) -> [(&'static str, &mut String); 10] {
        [
            (FIELD_LABELS[0], &mut self.company_name),
            (FIELD_LABELS[1], &mut self.card_holder),
            (FIELD_LABELS[2], &mut self.designation),
            (FIELD_LABELS[3], &mut self.mobile_number),
            (FIELD_LABELS[4], &mut self.email),
            (FIELD_LABELS[5], &mut self.website),
            (FIELD_LABELS[6], &mut self.area),
            (FIELD_LABELS[7], &mut self.city),
            (FIELD_LABELS[8], &mut self.state),
            (FIELD_LABELS[9], &mut self.pin_code),
        ]
    }
}

/// Classify OCR fragments into a card record using the selected variant.
///
/// Bounding boxes are ignored at this stage; only fragment order and text
/// content matter. Sequences of length 0 or 1 produce mostly-empty records.
pub fn classify(variant: ClassifierVariant, fragments: &[Fragment]) -> CardRecord {
    let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
    classify_texts(variant, &texts)
}

/// Classify raw fragment texts, independent of OCR types.
pub fn classify_texts<S: AsRef<str>>(variant: ClassifierVariant, texts: &[S]) -> CardRecord {
    match variant {
        ClassifierVariant::Positional => rules::classify(texts),
        ClassifierVariant::FillOrder => fill_order::classify(texts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_has_exactly_ten_fields() {
        let record = CardRecord::default();
        assert_eq!(record.fields().len(), 10);
        assert_eq!(FIELD_LABELS.len(), 10);
    }

    #[test]
    fn test_empty_sequence_yields_empty_record() {
        let empty: [&str; 0] = [];
        let record = classify_texts(ClassifierVariant::Positional, &empty);
        assert!(record.fields().iter().all(|(_, v)| v.is_empty()));

        let record = classify_texts(ClassifierVariant::FillOrder, &empty);
        assert!(record.fields().iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_fields_mut_covers_all_fields() {
        let mut record = CardRecord::default();
        for (_, value) in record.fields_mut() {
            *value = "x".to_string();
        }
        assert!(record.fields().iter().all(|(_, v)| *v == "x"));
    }
}
