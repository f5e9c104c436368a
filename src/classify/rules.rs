//! Positional classifier variant
//!
//! Pattern-and-position heuristic evaluated fragment by fragment in OCR
//! order. Rules are checked strictly in the order of [`RULES`]; the first
//! matching rule claims the fragment and no later rule sees it. The same
//! fragment index can serve double duty across the card (index 0 is tested
//! for the company rule before the holder rule when it is also the last
//! fragment), so sequences shorter than two fragments yield ambiguous,
//! mostly-empty records. That is accepted behavior.

use regex::Regex;
use std::sync::LazyLock;

use super::CardRecord;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\d{1,4}-\d{1,4}-\d{4,10}$").unwrap());
static AREA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\s.*[,.]").unwrap());
static CITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([A-Z][a-zA-Z\s]*?)\s*,").unwrap());
static STATE_TRIGGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,.]\s*(\w+)").unwrap());
static STATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,.]\s*(\w+)\s*\d{5,}").unwrap());
static PIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{5,}").unwrap());

/// One fragment's view of the pass: its text, its position, and the text
/// of the fragment immediately before it.
struct RuleCtx<'a> {
    text: &'a str,
    index: usize,
    last_index: usize,
    prev: Option<&'a str>,
}

/// State local to one classification pass. Never shared across passes.
#[derive(Default)]
struct PassState {
    /// Last state token extracted so far; rule 10 records it even when
    /// the current fragment yields no fresh token (possibly stale).
    state: String,
}

type RuleFn = fn(&RuleCtx<'_>, &mut PassState, &mut CardRecord) -> bool;

/// The ordered rule chain. First match wins per fragment; order is
/// load-bearing and must not be rearranged.
const RULES: &[(&str, RuleFn)] = &[
    ("website", website),
    ("website_split", website_split),
    ("email", email),
    ("mobile_number", mobile_number),
    ("company_name", company_name),
    ("card_holder", card_holder),
    ("designation", designation),
    ("area", area),
    ("city", city),
    ("state", state),
    ("pin_code", pin_code),
];

/// Rule 1: fragment containing "www " or "www." (case-insensitive) is a
/// website as-is.
fn website(ctx: &RuleCtx<'_>, _pass: &mut PassState, record: &mut CardRecord) -> bool {
    let lower = ctx.text.to_lowercase();
    if lower.contains("www ") || lower.contains("www.") {
        record.website = ctx.text.to_string();
        return true;
    }
    false
}

/// Rule 2: a literal "WWW" means OCR split the domain across two
/// detections; rejoin with the previous fragment and a dot.
fn website_split(ctx: &RuleCtx<'_>, _pass: &mut PassState, record: &mut CardRecord) -> bool {
    if ctx.text.contains("WWW") {
        record.website = format!("{}.{}", ctx.prev.unwrap_or_default(), ctx.text);
        return true;
    }
    false
}

/// Rule 3: "@" marks an email address.
fn email(ctx: &RuleCtx<'_>, _pass: &mut PassState, record: &mut CardRecord) -> bool {
    if ctx.text.contains('@') {
        record.email = ctx.text.to_string();
        return true;
    }
    false
}

/// Rule 4: international phone shape +X-X-XXXX with more than 9 digits
/// in total.
fn mobile_number(ctx: &RuleCtx<'_>, _pass: &mut PassState, record: &mut CardRecord) -> bool {
    if PHONE_RE.is_match(ctx.text) {
        let digits = ctx.text.chars().filter(|c| c.is_ascii_digit()).count();
        if digits > 9 {
            record.mobile_number = ctx.text.to_string();
            return true;
        }
    }
    false
}

/// Rule 5: the last fragment is the company name.
fn company_name(ctx: &RuleCtx<'_>, _pass: &mut PassState, record: &mut CardRecord) -> bool {
    if ctx.index == ctx.last_index {
        record.company_name = ctx.text.to_string();
        return true;
    }
    false
}

/// Rule 6: the first fragment is the cardholder name.
fn card_holder(ctx: &RuleCtx<'_>, _pass: &mut PassState, record: &mut CardRecord) -> bool {
    if ctx.index == 0 {
        record.card_holder = ctx.text.to_string();
        return true;
    }
    false
}

/// Rule 7: the second fragment is the designation.
fn designation(ctx: &RuleCtx<'_>, _pass: &mut PassState, record: &mut CardRecord) -> bool {
    if ctx.index == 1 {
        record.designation = ctx.text.to_string();
        return true;
    }
    false
}

/// Rule 8: a street-address shape (leading digits, a space, a later comma
/// or period); the part before the first comma is the area.
fn area(ctx: &RuleCtx<'_>, _pass: &mut PassState, record: &mut CardRecord) -> bool {
    if AREA_RE.is_match(ctx.text) {
        record.area = ctx
            .text
            .split(',')
            .next()
            .unwrap_or(ctx.text)
            .to_string();
        return true;
    }
    false
}

/// Rule 9: a comma-delimited capitalized word is the city.
fn city(ctx: &RuleCtx<'_>, _pass: &mut PassState, record: &mut CardRecord) -> bool {
    if let Some(caps) = CITY_RE.captures(ctx.text) {
        record.city = caps[1].trim().to_string();
        return true;
    }
    false
}

/// Rule 10: a comma/period followed by a word triggers a state lookup;
/// the token preceding a 5+ digit run is the state. Whatever state value
/// the pass has seen so far is recorded for this fragment, even when no
/// fresh token was found.
fn state(ctx: &RuleCtx<'_>, pass: &mut PassState, record: &mut CardRecord) -> bool {
    if STATE_TRIGGER_RE.is_match(ctx.text) {
        if let Some(caps) = STATE_RE.captures(ctx.text) {
            pass.state = caps[1].trim().to_string();
        }
        record.state = pass.state.clone();
        return true;
    }
    false
}

/// Rule 11: a bare run of 5+ digits is the postal code.
fn pin_code(ctx: &RuleCtx<'_>, _pass: &mut PassState, record: &mut CardRecord) -> bool {
    if let Some(m) = PIN_RE.find(ctx.text) {
        record.pin_code = m.as_str().to_string();
        return true;
    }
    false
}

/// Run the positional rule chain over an ordered fragment text sequence.
/// Fragments matched by no rule are dropped.
pub fn classify<S: AsRef<str>>(texts: &[S]) -> CardRecord {
    let mut record = CardRecord::default();
    let mut pass = PassState::default();
    if texts.is_empty() {
        return record;
    }

    let last_index = texts.len() - 1;
    for (index, text) in texts.iter().enumerate() {
        let ctx = RuleCtx {
            text: text.as_ref(),
            index,
            last_index,
            prev: index.checked_sub(1).map(|p| texts[p].as_ref()),
        };
        for (name, rule) in RULES {
            if rule(&ctx, &mut pass, &mut record) {
                tracing::trace!(fragment = ctx.text, rule = name, "fragment classified");
                break;
            }
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_card() {
        let record = classify(&[
            "Jane Doe",
            "Manager",
            "123 Elm St, Springfield, IL, 62704",
            "jane@acme.com",
            "www.acme.com",
            "Acme Corp",
        ]);

        assert_eq!(record.card_holder, "Jane Doe");
        assert_eq!(record.designation, "Manager");
        assert_eq!(record.email, "jane@acme.com");
        assert_eq!(record.website, "www.acme.com");
        assert_eq!(record.company_name, "Acme Corp");
        // Address fragment lands on the area rule first; the part before
        // the first comma is kept.
        assert_eq!(record.area, "123 Elm St");
    }

    #[test]
    fn test_phone_requires_more_than_nine_digits() {
        let record = classify(&["Jane Doe", "Manager", "+1-415-5551234", "Acme Corp"]);
        assert_eq!(record.mobile_number, "+1-415-5551234");

        let record = classify(&["Jane Doe", "Manager", "+1-41-555", "Acme Corp"]);
        assert_eq!(record.mobile_number, "");
    }

    #[test]
    fn test_phone_shape_must_match_exactly() {
        // Right digit count, wrong shape (no leading +)
        let record = classify(&["Jane Doe", "Manager", "1-415-5551234", "Acme Corp"]);
        assert_eq!(record.mobile_number, "");
    }

    #[test]
    fn test_split_website_rejoined_with_predecessor() {
        // "WWWacmecorp" lowercases to neither "www " nor "www.", so the
        // split rule fires and rejoins it with the fragment before it.
        let record = classify(&["Jane Doe", "Manager", "global", "WWWacmecorp", "Acme Corp"]);
        assert_eq!(record.website, "global.WWWacmecorp");
    }

    #[test]
    fn test_lowercase_www_takes_fragment_as_is() {
        let record = classify(&["Jane Doe", "Manager", "www acme com", "Acme Corp"]);
        assert_eq!(record.website, "www acme com");
    }

    #[test]
    fn test_city_extracted_from_comma_delimited_capitalized_word() {
        // Not first/second/last, no leading digits: falls through to the
        // city rule.
        let record = classify(&["Jane", "Manager", "Suite 4, Springfield, IL", "Acme"]);
        assert_eq!(record.city, "Springfield");
    }

    #[test]
    fn test_state_token_precedes_postal_run() {
        let record = classify(&["Jane", "Manager", "Springfield, IL 62704", "Acme"]);
        assert_eq!(record.state, "IL");
    }

    #[test]
    fn test_state_recorded_stale_when_no_fresh_token() {
        // Trigger matches (comma followed by word) but no 5+ digit run;
        // the recorded state is the pass's current (empty) value.
        let record = classify(&["Jane", "Manager", "Floor 2, east wing", "Acme"]);
        assert_eq!(record.state, "");
    }

    #[test]
    fn test_bare_postal_run() {
        let record = classify(&["Jane", "Manager", "Zip 62704", "Acme"]);
        assert_eq!(record.pin_code, "62704");
    }

    #[test]
    fn test_single_fragment_becomes_company_not_holder() {
        // Index 0 is also the last index; the company rule is checked
        // first in the chain.
        let record = classify(&["Acme Corp"]);
        assert_eq!(record.company_name, "Acme Corp");
        assert_eq!(record.card_holder, "");
    }

    #[test]
    fn test_email_claimed_before_positional_rules() {
        // An email in first position must not become the cardholder.
        let record = classify(&["jane@acme.com", "Manager", "Acme Corp"]);
        assert_eq!(record.email, "jane@acme.com");
        assert_eq!(record.card_holder, "");
    }

    #[test]
    fn test_unmatched_fragments_are_dropped() {
        let record = classify(&["Jane", "Manager", "lorem ipsum", "Acme"]);
        assert_eq!(record.card_holder, "Jane");
        assert_eq!(record.designation, "Manager");
        assert_eq!(record.company_name, "Acme");
        // "lorem ipsum" matches nothing and appears nowhere.
        for (_, value) in record.fields() {
            assert_ne!(value, "lorem ipsum");
        }
    }
}
