/// Heterogeneous value normalizer for Hydromet API fields.
///
/// The Hydromet endpoints emit the same logical data point in different
/// textual shapes across endpoints and over time: combined ISO timestamps
/// with or without an offset, US slash dates with or without a meridiem,
/// measurements as JSON numbers or as strings with embedded units, and a
/// family of "no data" sentinels (`/`, `N/A`, `--`, blank). These two
/// functions fold all of that into canonical typed values.
///
/// Both functions are pure, deterministic, and total over their input
/// domain: malformed input resolves to `None`, never an error or panic.
/// Callers that expected a value may log the loss; the normalizer itself
/// stays silent.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Upstream marker for "no data available", distinct from an absent field.
const NO_DATA_SENTINEL: &str = "/";

// ---------------------------------------------------------------------------
// Timestamp normalization
// ---------------------------------------------------------------------------

/// Textual timestamp shapes observed in Hydromet fields, tried in order.
/// The first pattern that matches wins, even when a later pattern would
/// capture more fields, so the order here is load-bearing.
static TIMESTAMP_PATTERNS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        // M/D/YYYY H:MM:SS with optional meridiem
        Regex::new(r"(?i)(\d{1,2}/\d{1,2}/\d{4})\s+(\d{1,2}:\d{2}:\d{2})\s*(AM|PM)?").unwrap(),
        // M/D/YYYY H:MM with optional meridiem
        Regex::new(r"(?i)(\d{1,2}/\d{1,2}/\d{4})\s+(\d{1,2}:\d{2})\s*(AM|PM)?").unwrap(),
        // YYYY-MM-DD HH:MM:SS, 24-hour
        Regex::new(r"(\d{4}-\d{2}-\d{2})\s+(\d{2}:\d{2}:\d{2})").unwrap(),
        // YYYY-MM-DD HH:MM, 24-hour
        Regex::new(r"(\d{4}-\d{2}-\d{2})\s+(\d{2}:\d{2})").unwrap(),
    ]
});

/// Normalizes a raw timestamp field into a timezone-naive date and time.
///
/// The feed never supplies offsets reliably, so fidelity is best effort
/// with any offset discarded. Strategies are tried in order, first success
/// wins:
///
/// 1. Blank or the `/` sentinel resolves to `None` before any parsing.
/// 2. Input containing a `T` marker is split into date and time, the time
///    cut at the first `+`/`-`/`Z`, and parsed as an ISO-like literal.
///    Failure here falls through rather than aborting.
/// 3. The textual patterns above, first match wins. A matched meridiem
///    selects 12-hour parsing; otherwise 24-hour. A failed strict parse
///    counts as "did not match" and the chain continues.
///
/// Exhausting the chain yields `None`. That is an expected outcome; the
/// feed leaves these fields blank routinely.
pub fn normalize_timestamp(raw: Option<&str>) -> Option<NaiveDateTime> {
    let text = raw?.trim();
    if text.is_empty() || text == NO_DATA_SENTINEL {
        return None;
    }

    if let Some((date_part, time_part)) = text.split_once('T') {
        if let Some(parsed) = parse_iso_like(date_part, time_part) {
            return Some(parsed);
        }
    }

    for pattern in TIMESTAMP_PATTERNS.iter() {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };
        if let Some(parsed) = parse_captured(&caps) {
            return Some(parsed);
        }
    }

    None
}

/// Parses the date and time halves of a `T`-separated timestamp, dropping
/// any trailing offset: `13:45:00-06:00`, `13:45:00+01:00` and
/// `13:45:00Z` all reduce to `13:45:00`.
fn parse_iso_like(date_part: &str, time_part: &str) -> Option<NaiveDateTime> {
    let cut = time_part.find(['+', '-', 'Z']).unwrap_or(time_part.len());
    let combined = format!("{} {}", date_part, &time_part[..cut]);

    const ISO_FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    ISO_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&combined, fmt).ok())
}

/// Parses the date, time, and optional meridiem captures of one matched
/// timestamp pattern. Seconds-aware vs seconds-less is chosen from the
/// time capture's colon count; a captured meridiem selects 12-hour
/// parsing, otherwise 24-hour.
fn parse_captured(caps: &regex::Captures) -> Option<NaiveDateTime> {
    let date = caps.get(1)?.as_str();
    let time = caps.get(2)?.as_str();
    let meridiem = caps.get(3).map(|m| m.as_str()).filter(|m| !m.is_empty());

    let slash_date = date.contains('/');
    let has_seconds = time.split(':').count() == 3;

    let format = match (slash_date, meridiem.is_some(), has_seconds) {
        (true, true, true) => "%m/%d/%Y %I:%M:%S %p",
        (true, true, false) => "%m/%d/%Y %I:%M %p",
        (true, false, true) => "%m/%d/%Y %H:%M:%S",
        (true, false, false) => "%m/%d/%Y %H:%M",
        (false, true, true) => "%Y-%m-%d %I:%M:%S %p",
        (false, true, false) => "%Y-%m-%d %I:%M %p",
        (false, false, true) => "%Y-%m-%d %H:%M:%S",
        (false, false, false) => "%Y-%m-%d %H:%M",
    };

    let candidate = match meridiem {
        Some(m) => format!("{} {} {}", date, time, m),
        None => format!("{} {}", date, time),
    };

    NaiveDateTime::parse_from_str(&candidate, format).ok()
}

// ---------------------------------------------------------------------------
// Numeric normalization
// ---------------------------------------------------------------------------

/// Normalizes a raw measurement field into an `f64`.
///
/// JSON numbers pass through directly. Strings are trimmed, checked
/// against the feed's "no data" sentinels (`/`, `N/A` in any case, `--`),
/// then stripped of every character that is not a digit, decimal point, or
/// minus sign, which tolerates units and thousands separators
/// (`"681.3 ft"` becomes `681.3`, `"1,234.5"` becomes `1234.5`). Anything
/// that still fails a strict parse after stripping (`"1.2.3"`, `"5-6"`)
/// resolves to `None`.
pub fn normalize_number(raw: Option<&Value>) -> Option<f64> {
    match raw? {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => normalize_number_text(text),
        // null, booleans, arrays and objects never encode a measurement
        _ => None,
    }
}

fn normalize_number_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || is_no_data_sentinel(trimmed) {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok()
}

/// String sentinels the feed uses for "no data" in measurement fields.
fn is_no_data_sentinel(text: &str) -> bool {
    text == NO_DATA_SENTINEL || text == "--" || text.eq_ignore_ascii_case("n/a")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    // --- Timestamps: sentinels and absence -----------------------------------

    #[test]
    fn test_timestamp_absent_input_yields_none() {
        assert_eq!(normalize_timestamp(None), None);
    }

    #[test]
    fn test_timestamp_empty_and_whitespace_yield_none() {
        assert_eq!(normalize_timestamp(Some("")), None);
        assert_eq!(normalize_timestamp(Some("   ")), None);
        assert_eq!(normalize_timestamp(Some("\t\n")), None);
    }

    #[test]
    fn test_timestamp_slash_sentinel_yields_none() {
        // A lone "/" means "no data" even though "/" also appears inside
        // every slash-format date.
        assert_eq!(normalize_timestamp(Some("/")), None);
        assert_eq!(normalize_timestamp(Some("  /  ")), None);
    }

    // --- Timestamps: combined ISO marker --------------------------------------

    #[test]
    fn test_iso_combined_negative_offset_is_discarded() {
        assert_eq!(
            normalize_timestamp(Some("2024-01-05T13:45:00-06:00")),
            Some(at(2024, 1, 5, 13, 45, 0))
        );
    }

    #[test]
    fn test_iso_combined_positive_offset_is_discarded() {
        assert_eq!(
            normalize_timestamp(Some("2024-07-04T08:15:30+05:30")),
            Some(at(2024, 7, 4, 8, 15, 30))
        );
    }

    #[test]
    fn test_iso_combined_zulu_suffix_is_discarded() {
        assert_eq!(
            normalize_timestamp(Some("2024-01-05T13:45:00Z")),
            Some(at(2024, 1, 5, 13, 45, 0))
        );
    }

    #[test]
    fn test_iso_combined_fractional_seconds() {
        assert_eq!(
            normalize_timestamp(Some("2024-05-01T12:00:00.000-05:00")),
            Some(at(2024, 5, 1, 12, 0, 0))
        );
    }

    #[test]
    fn test_iso_combined_without_seconds() {
        assert_eq!(
            normalize_timestamp(Some("2024-01-05T13:45")),
            Some(at(2024, 1, 5, 13, 45, 0))
        );
    }

    #[test]
    fn test_iso_marker_with_unparseable_tail_falls_back_to_patterns() {
        // Contains a "T" (in "LAST") so the ISO split runs and fails; the
        // embedded dash timestamp must still be recovered by the pattern
        // chain instead of the whole string being rejected.
        assert_eq!(
            normalize_timestamp(Some("LAST 2024-01-05 13:45")),
            Some(at(2024, 1, 5, 13, 45, 0))
        );
    }

    #[test]
    fn test_iso_marker_with_garbage_everywhere_yields_none() {
        assert_eq!(normalize_timestamp(Some("TOTALLY not a date")), None);
    }

    // --- Timestamps: pattern chain ---------------------------------------------

    #[test]
    fn test_slash_date_with_seconds_and_meridiem() {
        assert_eq!(
            normalize_timestamp(Some("1/5/2024 1:45:30 PM")),
            Some(at(2024, 1, 5, 13, 45, 30))
        );
    }

    #[test]
    fn test_slash_date_minutes_only_with_meridiem() {
        assert_eq!(
            normalize_timestamp(Some("1/5/2024 1:45 PM")),
            Some(at(2024, 1, 5, 13, 45, 0))
        );
    }

    #[test]
    fn test_slash_date_meridiem_is_case_insensitive() {
        assert_eq!(
            normalize_timestamp(Some("1/5/2024 1:45 pm")),
            Some(at(2024, 1, 5, 13, 45, 0))
        );
        assert_eq!(
            normalize_timestamp(Some("1/5/2024 8:05 am")),
            Some(at(2024, 1, 5, 8, 5, 0))
        );
    }

    #[test]
    fn test_slash_date_without_meridiem_parses_24_hour() {
        assert_eq!(
            normalize_timestamp(Some("1/5/2024 13:45")),
            Some(at(2024, 1, 5, 13, 45, 0))
        );
        assert_eq!(
            normalize_timestamp(Some("12/31/2024 23:59:59")),
            Some(at(2024, 12, 31, 23, 59, 59))
        );
    }

    #[test]
    fn test_dash_date_with_seconds() {
        assert_eq!(
            normalize_timestamp(Some("2024-01-05 13:45:59")),
            Some(at(2024, 1, 5, 13, 45, 59))
        );
    }

    #[test]
    fn test_dash_date_minutes_only() {
        assert_eq!(
            normalize_timestamp(Some("2024-01-05 13:45")),
            Some(at(2024, 1, 5, 13, 45, 0))
        );
    }

    #[test]
    fn test_noon_and_midnight_meridiem_semantics() {
        assert_eq!(
            normalize_timestamp(Some("1/5/2024 12:00 PM")),
            Some(at(2024, 1, 5, 12, 0, 0))
        );
        assert_eq!(
            normalize_timestamp(Some("1/5/2024 12:00 AM")),
            Some(at(2024, 1, 5, 0, 0, 0))
        );
    }

    #[test]
    fn test_first_matching_pattern_wins() {
        // The seconds-bearing slash pattern sits before the minutes-only
        // one; a full timestamp must keep its seconds rather than being
        // truncated by the later, looser pattern.
        assert_eq!(
            normalize_timestamp(Some("12/31/2024 11:59:59 PM")),
            Some(at(2024, 12, 31, 23, 59, 59))
        );
    }

    #[test]
    fn test_timestamp_embedded_in_surrounding_text() {
        assert_eq!(
            normalize_timestamp(Some("as of 1/5/2024 1:45 PM (provisional)")),
            Some(at(2024, 1, 5, 13, 45, 0))
        );
    }

    #[test]
    fn test_impossible_meridiem_hour_yields_none() {
        // "13" is out of range for 12-hour parsing and no later pattern
        // accepts a slash date, so the chain drains without matching.
        assert_eq!(normalize_timestamp(Some("1/5/2024 13:45 PM")), None);
    }

    #[test]
    fn test_impossible_calendar_date_yields_none() {
        assert_eq!(normalize_timestamp(Some("2/30/2024 1:45 PM")), None);
        assert_eq!(normalize_timestamp(Some("2024-13-05 13:45")), None);
    }

    #[test]
    fn test_garbage_text_yields_none() {
        assert_eq!(normalize_timestamp(Some("garbage text")), None);
        assert_eq!(normalize_timestamp(Some("No floodgates open")), None);
    }

    // --- Numbers: sentinels and absence ----------------------------------------

    #[test]
    fn test_number_absent_and_null_yield_none() {
        assert_eq!(normalize_number(None), None);
        assert_eq!(normalize_number(Some(&Value::Null)), None);
    }

    #[test]
    fn test_number_sentinels_yield_none() {
        for sentinel in ["", "  ", "/", "N/A", "n/a", "N/a", "--"] {
            assert_eq!(
                normalize_number(Some(&json!(sentinel))),
                None,
                "sentinel {:?} should normalize to no value",
                sentinel
            );
        }
    }

    #[test]
    fn test_number_non_scalar_json_yields_none() {
        assert_eq!(normalize_number(Some(&json!(true))), None);
        assert_eq!(normalize_number(Some(&json!([681.3]))), None);
        assert_eq!(normalize_number(Some(&json!({"value": 681.3}))), None);
    }

    // --- Numbers: fast path ------------------------------------------------------

    #[test]
    fn test_number_numeric_json_passes_through() {
        assert_eq!(normalize_number(Some(&json!(681.3))), Some(681.3));
        assert_eq!(normalize_number(Some(&json!(42300))), Some(42300.0));
        assert_eq!(normalize_number(Some(&json!(-12.5))), Some(-12.5));
    }

    // --- Numbers: text cleaning ---------------------------------------------------

    #[test]
    fn test_number_plain_numeric_string() {
        assert_eq!(normalize_number(Some(&json!("681.3"))), Some(681.3));
        assert_eq!(normalize_number(Some(&json!("  681.3  "))), Some(681.3));
    }

    #[test]
    fn test_number_trailing_unit_is_stripped() {
        assert_eq!(normalize_number(Some(&json!("681.3 ft"))), Some(681.3));
        assert_eq!(normalize_number(Some(&json!("1540 cfs"))), Some(1540.0));
    }

    #[test]
    fn test_number_thousands_separators_are_stripped() {
        assert_eq!(normalize_number(Some(&json!("1,234.5"))), Some(1234.5));
        assert_eq!(normalize_number(Some(&json!("12,345,678"))), Some(12_345_678.0));
    }

    #[test]
    fn test_number_negative_values_survive_cleaning() {
        assert_eq!(normalize_number(Some(&json!("-2.5"))), Some(-2.5));
        assert_eq!(normalize_number(Some(&json!("-2.5 ft"))), Some(-2.5));
    }

    #[test]
    fn test_number_unit_only_string_yields_none() {
        assert_eq!(normalize_number(Some(&json!("ft"))), None);
        assert_eq!(normalize_number(Some(&json!("cfs"))), None);
    }

    #[test]
    fn test_number_cleaning_survivors_that_fail_parse_yield_none() {
        // Stripping can leave text that is still not a number; the strict
        // parse is the last gate.
        assert_eq!(normalize_number(Some(&json!("1.2.3"))), None);
        assert_eq!(normalize_number(Some(&json!("5-6 ft"))), None);
        assert_eq!(normalize_number(Some(&json!("."))), None);
    }

    #[test]
    fn test_number_idempotent_on_clean_output() {
        for raw in ["681.3 ft", "1,234.5", "-2.5", "42300"] {
            let first = normalize_number(Some(&json!(raw))).unwrap();
            let again = normalize_number(Some(&json!(first.to_string())));
            assert_eq!(again, Some(first), "re-normalizing {:?} should be stable", raw);
        }
    }
}
