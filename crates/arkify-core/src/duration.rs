use crate::project::Timeline;
use regex::Regex;
use std::sync::OnceLock;

static DIGITS_RE: OnceLock<Regex> = OnceLock::new();

fn digits_re() -> &'static Regex {
    DIGITS_RE.get_or_init(|| Regex::new(r"[0-9]+").unwrap())
}

const WEEKEND_DAYS: f64 = 2.0;
const WEEK_DAYS: f64 = 7.0;

/// Normalise a timeline to a number of days. Missing values count as zero.
pub fn parse_days(timeline: Option<&Timeline>) -> f64 {
    match timeline {
        Some(Timeline::Days(d)) => *d,
        Some(Timeline::Text(s)) => parse_days_text(s),
        None => 0.0,
    }
}

/// Heuristic day count for free text.
///
/// - `"2 days"` → 2
/// - `"2-3 days"` → 2.5 (a hyphenated range averages its first two numbers)
/// - `"5 days, multiple evenings"` → 5
/// - `"a weekend"` → 2, `"a week"` → 7
///
/// Units are not interpreted when digits are present: `"3 weeks"` is 3.
pub fn parse_days_text(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let numbers: Vec<f64> = digits_re()
        .find_iter(&lower)
        .map(|m| m.as_str().parse::<f64>().unwrap_or(0.0))
        .collect();

    match numbers.as_slice() {
        [] => {
            if lower.contains("weekend") {
                WEEKEND_DAYS
            } else if lower.contains("week") {
                WEEK_DAYS
            } else {
                0.0
            }
        }
        [low, high, ..] if lower.contains('-') => (low + high) / 2.0,
        [first, ..] => *first,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
