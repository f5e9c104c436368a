//! Fill-order classifier variant
//!
//! Single pass, first-match-wins per fragment: pattern checks for email,
//! phone, website, postal code, and designation, then a strict fill-order
//! fallback that assigns company name, cardholder, area, city, and state
//! to the first otherwise-unclaimed fragments in order of arrival. A
//! fragment claimed by a pattern check never also takes a fill-order slot.
//!
//! The "has this slot been filled" flags live in a per-pass struct so one
//! classification pass cannot leak into another.

use super::CardRecord;

/// Job-title keywords that mark a fragment as a designation
/// (case-insensitive substring match).
const DESIGNATION_KEYWORDS: &[&str] = &[
    "manager",
    "director",
    "engineer",
    "executive",
    "president",
    "founder",
    "officer",
    "consultant",
    "analyst",
    "designer",
    "developer",
    "supervisor",
    "accountant",
    "ceo",
    "cto",
    "cfo",
];

/// Website markers checked against the lowercased fragment.
const WEBSITE_MARKERS: &[&str] = &["www.", ".com", ".net", ".org"];

fn strip_spaces(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Run the fill-order chain over an ordered fragment text sequence.
pub fn classify<S: AsRef<str>>(texts: &[S]) -> CardRecord {
    let mut record = CardRecord::default();

    for text in texts {
        let text = text.as_ref();
        let lower = text.to_lowercase();
        let stripped = strip_spaces(text);

        if text.contains('@') {
            record.email = text.to_string();
        } else if is_all_digits(&stripped) && stripped.len() >= 10 {
            record.mobile_number = text.to_string();
        } else if WEBSITE_MARKERS.iter().any(|m| lower.contains(m)) {
            record.website = text.to_string();
        } else if is_all_digits(&stripped) && stripped.len() == 6 {
            record.pin_code = text.to_string();
        } else if DESIGNATION_KEYWORDS.iter().any(|k| lower.contains(k)) {
            record.designation = text.to_string();
        } else if record.company_name.is_empty() {
            record.company_name = text.to_string();
        } else if record.card_holder.is_empty() {
            record.card_holder = text.to_string();
        } else if record.area.is_empty() {
            record.area = text.to_string();
        } else if record.city.is_empty() {
            record.city = text.to_string();
        } else if record.state.is_empty() {
            record.state = text.to_string();
        }
        // Anything past the state slot is dropped.
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_fields_claimed_first() {
        let record = classify(&[
            "Acme Corp",
            "Jane Doe",
            "Sales Manager",
            "98765 43210",
            "jane@acme.com",
            "www.acme.com",
            "Elm Street",
            "Springfield",
            "Illinois",
            "627045",
        ]);

        assert_eq!(record.company_name, "Acme Corp");
        assert_eq!(record.card_holder, "Jane Doe");
        assert_eq!(record.designation, "Sales Manager");
        assert_eq!(record.mobile_number, "98765 43210");
        assert_eq!(record.email, "jane@acme.com");
        assert_eq!(record.website, "www.acme.com");
        assert_eq!(record.area, "Elm Street");
        assert_eq!(record.city, "Springfield");
        assert_eq!(record.state, "Illinois");
        assert_eq!(record.pin_code, "627045");
    }

    #[test]
    fn test_first_unclaimed_fragment_is_company_not_first_overall() {
        // The email arrives first but is claimed by a pattern check, so
        // the company slot goes to the next fragment.
        let record = classify(&["jane@acme.com", "Acme Corp", "Jane Doe"]);
        assert_eq!(record.email, "jane@acme.com");
        assert_eq!(record.company_name, "Acme Corp");
        assert_eq!(record.card_holder, "Jane Doe");
    }

    #[test]
    fn test_phone_needs_ten_digits_after_space_strip() {
        let record = classify(&["Acme", "Jane", "12345 6789"]);
        // Nine digits: not a phone, falls into the area slot.
        assert_eq!(record.mobile_number, "");
        assert_eq!(record.area, "12345 6789");
    }

    #[test]
    fn test_pin_code_is_exactly_six_digits() {
        let record = classify(&["Acme", "Jane", "627045"]);
        assert_eq!(record.pin_code, "627045");

        let record = classify(&["Acme", "Jane", "62704"]);
        assert_eq!(record.pin_code, "");
        assert_eq!(record.area, "62704");
    }

    #[test]
    fn test_designation_keyword_case_insensitive() {
        let record = classify(&["Acme", "CHIEF EXECUTIVE OFFICER"]);
        assert_eq!(record.designation, "CHIEF EXECUTIVE OFFICER");
    }

    #[test]
    fn test_overflow_fragments_dropped() {
        let record = classify(&["a", "b", "c", "d", "e", "extra one", "extra two"]);
        assert_eq!(record.state, "e");
        for (_, value) in record.fields() {
            assert_ne!(value, "extra one");
            assert_ne!(value, "extra two");
        }
    }
}
