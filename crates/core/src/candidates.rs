//! Candidate filtering and frequency-based selection.
//!
//! A raw-markup pattern usually matches many times per document, and the
//! matches disagree. [`plausible_year_filter`] turns all matches of one
//! pattern into a frequency table of distinct candidate strings, dropping
//! any whose year is implausible. [`select_candidate`] then picks a single
//! winner: unanimous tables win outright, contested tables go through
//! frequency and recency voting.

use regex::Regex;
use tracing::debug;

use crate::patterns::{SearchSlot, MAX_POSSIBLE_CANDIDATES};
use crate::validate::{validate_year, DateBounds};

/// One row of the candidate frequency table: a normalized candidate string
/// and how often it occurred in the document.
#[derive(Debug, Clone)]
pub(crate) struct YearCandidate {
    pub text: String,
    pub count: u32,
}

/// Collects all non-overlapping matches of `pattern`, counts occurrences of
/// each distinct candidate, and keeps only those whose year (extracted via
/// `year_subpattern`) is plausible.
///
/// With `needs_completion`, candidates carry two-digit years: a leading `9`
/// puts them in the 1900s, anything else in the 2000s. The rule is on the
/// first digit, not a numeric threshold.
pub(crate) fn plausible_year_filter(
    html: &str,
    pattern: &Regex,
    year_subpattern: &Regex,
    needs_completion: bool,
    bounds: &DateBounds,
) -> Vec<YearCandidate> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: std::collections::HashMap<&str, u32> = std::collections::HashMap::new();

    for caps in pattern.captures_iter(html) {
        let matched = caps.get(1).or_else(|| caps.get(0)).map(|m| m.as_str()).unwrap_or_default();
        let entry = counts.entry(matched).or_insert(0);
        if *entry == 0 {
            order.push(matched);
        }
        *entry += 1;
    }

    let min_year = bounds.min_year();
    let max_year = bounds.max_year();

    let mut survivors = Vec::new();
    for text in order {
        let Some(year_caps) = year_subpattern.captures(text) else {
            debug!(candidate = text, "no year in candidate");
            continue;
        };
        let Some(year_text) = year_caps.get(1).map(|m| m.as_str()) else {
            continue;
        };

        let year: i32 = if needs_completion {
            let Ok(short) = year_text.parse::<i32>() else {
                continue;
            };
            if year_text.starts_with('9') { 1900 + short } else { 2000 + short }
        } else {
            match year_text.parse() {
                Ok(year) => year,
                Err(_) => continue,
            }
        };

        if year < min_year || year > max_year {
            debug!(candidate = text, year, "implausible year");
            continue;
        }

        survivors.push(YearCandidate { text: text.to_string(), count: counts[text] });
    }

    survivors
}

/// Selects a winner among the most frequent candidates.
///
/// Empty tables and tables past the noise ceiling yield nothing. A single
/// distinct candidate wins unconditionally. Otherwise the ten most frequent
/// candidates are ranked by count, ties broken toward the oldest string when
/// hunting for original dates and toward the newest otherwise, and the top
/// two compete:
///
/// - equal counts: the ranking's favorite wins
/// - the favorite's year is implausible: the runner-up wins if its own year
///   is plausible, otherwise nothing wins
/// - the runner-up's year differs and it holds more than half the
///   favorite's count: the runner-up wins, trading raw frequency for the
///   preferred recency direction
///
/// Returns the winning candidate string, re-checked against `catch`.
pub(crate) fn select_candidate(
    mut candidates: Vec<YearCandidate>,
    catch: &Regex,
    year_subpattern: &Regex,
    prefer_original: bool,
    bounds: &DateBounds,
) -> Option<String> {
    let distinct = candidates.len();
    if distinct == 0 || distinct > MAX_POSSIBLE_CANDIDATES {
        if distinct > 0 {
            debug!(distinct, "too many candidates, giving up");
        }
        return None;
    }

    if distinct == 1 {
        let only = candidates.remove(0);
        return catch.is_match(&only.text).then_some(only.text);
    }

    candidates.sort_by(|a, b| {
        b.count.cmp(&a.count).then_with(|| {
            if prefer_original {
                a.text.cmp(&b.text)
            } else {
                b.text.cmp(&a.text)
            }
        })
    });
    candidates.truncate(10);
    debug!(?candidates, "candidate shortlist");

    let first = &candidates[0];
    let second = &candidates[1];

    if first.count == second.count {
        return catch.is_match(&first.text).then(|| first.text.clone());
    }

    let year_of = |candidate: &YearCandidate| -> Option<i32> {
        year_subpattern
            .captures(&candidate.text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    };

    let first_year = year_of(first);
    let second_year = year_of(second);
    let first_plausible = first_year.is_some_and(|y| validate_year(y, bounds));
    let second_plausible = second_year.is_some_and(|y| validate_year(y, bounds));

    let winner = if !first_plausible {
        if !second_plausible {
            debug!(?first_year, ?second_year, "no suitable candidate");
            return None;
        }
        second
    } else if second_year != first_year && second.count as f64 / first.count as f64 > 0.5 {
        // Well-attested runner-up beats a merely more frequent favorite.
        second
    } else {
        first
    };

    catch.is_match(&winner.text).then(|| winner.text.clone())
}

/// Chained candidate filtering and selection for one cascade slot.
pub(crate) fn search_pattern(html: &str, slot: &SearchSlot, prefer_original: bool, bounds: &DateBounds) -> Option<String> {
    let candidates = plausible_year_filter(html, slot.pattern, slot.year_subpattern, slot.needs_pivot_completion, bounds);
    select_candidate(candidates, slot.catch, slot.year_subpattern, prefer_original, bounds)
}
