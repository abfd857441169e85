//! Opportunistic whole-page pattern search.
//!
//! The last stage of the cascade: when no structured source yielded a date,
//! the raw markup is scanned with progressively weaker patterns. A footer
//! copyright year is extracted first and kept aside, both as a lower-bound
//! sanity check on later candidates and as the second-to-last resort before
//! the bare year-only pattern.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::candidates::{plausible_year_filter, search_pattern, select_candidate, YearCandidate};
use crate::patterns::{patterns, SearchSlot};
use crate::validate::{filter_ymd_candidate, validate_date_parts, validate_year_latest, DateBounds};

/// Searches the raw markup for common date patterns, strongest first.
pub(crate) fn search_page(html: &str, prefer_original: bool, bounds: &DateBounds) -> Option<NaiveDate> {
    let p = patterns();

    // Copyright / footer year, kept as a side value.
    debug!("looking for copyright/footer information");
    let mut copyright_year = 0;
    let copyright_slot = SearchSlot {
        name: "copyright",
        pattern: &p.copyright,
        year_subpattern: &p.year,
        catch: &p.year,
        needs_pivot_completion: false,
    };
    if let Some(winner) = search_pattern(html, &copyright_slot, prefer_original, bounds)
        && let Ok(year) = winner.parse::<i32>()
        && validate_year_latest(year, bounds)
    {
        debug!(year, "copyright year found");
        copyright_year = year;
    }

    // Three components: URL-shaped, then loosely structured.
    debug!("searching for 3-component dates");
    for slot in p.three_component_slots() {
        if let Some(winner) = search_pattern(html, &slot, prefer_original, bounds)
            && let Some(date) = filter_ymd_candidate(&winner, slot.catch, slot.name, copyright_year, bounds)
        {
            return Some(date);
        }
    }

    // D-M-Y forms, reverted to canonical Y-M-D before voting.
    let candidates = plausible_year_filter(html, &p.select_ymd, &p.select_ymd_year, false, bounds);
    let candidates = normalize_candidates(candidates, |text| {
        let caps = p.dmy_normalize.captures(text)?;
        let day: u32 = caps.get(1)?.as_str().parse().ok()?;
        let month: u32 = caps.get(2)?.as_str().parse().ok()?;
        Some(format!("{}-{:02}-{:02}", caps.get(3)?.as_str(), month, day))
    });
    if let Some(winner) = select_candidate(candidates, &p.ymd_catch, &p.ymd_year, prefer_original, bounds)
        && let Some(date) = filter_ymd_candidate(&winner, &p.ymd_catch, "select-ymd", copyright_year, bounds)
    {
        return Some(date);
    }

    // Compact valid date strings.
    let date_strings_slot = SearchSlot {
        name: "date-strings",
        pattern: &p.date_strings,
        year_subpattern: &p.year,
        catch: &p.date_strings_catch,
        needs_pivot_completion: false,
    };
    if let Some(winner) = search_pattern(html, &date_strings_slot, prefer_original, bounds)
        && let Some(date) = filter_ymd_candidate(&winner, &p.date_strings_catch, date_strings_slot.name, copyright_year, bounds)
    {
        return Some(date);
    }

    // D/M/YY with two-digit-year completion.
    let candidates = plausible_year_filter(html, &p.slashes, &p.slashes_year, true, bounds);
    let candidates = normalize_candidates(candidates, |text| {
        let caps = p.slashes_normalize.captures(text)?;
        let day: u32 = caps.get(1)?.as_str().parse().ok()?;
        let month: u32 = caps.get(2)?.as_str().parse().ok()?;
        let short_year = caps.get(3)?.as_str();
        let century = if short_year.starts_with('9') { "19" } else { "20" };
        Some(format!("{}{}-{:02}-{:02}", century, short_year, month, day))
    });
    if let Some(winner) = select_candidate(candidates, &p.ymd_catch, &p.ymd_year, prefer_original, bounds)
        && let Some(date) = filter_ymd_candidate(&winner, &p.ymd_catch, "slashes", copyright_year, bounds)
    {
        return Some(date);
    }

    // Two components, year first.
    debug!("switching to two components");
    let yyyy_mm_slot = SearchSlot {
        name: "yyyy-mm",
        pattern: &p.yyyy_mm,
        year_subpattern: &p.year,
        catch: &p.yyyy_mm_catch,
        needs_pivot_completion: false,
    };
    if let Some(winner) = search_pattern(html, &yyyy_mm_slot, prefer_original, bounds)
        && let Some(caps) = p.yyyy_mm_catch.captures(&winner)
        && let (Ok(year), Ok(month)) = (caps[1].parse::<i32>(), caps[2].parse::<u32>())
        && let Some(date) = validate_date_parts(year, month, 1, bounds)
        && (copyright_year == 0 || year >= copyright_year)
    {
        debug!(%date, "date found for pattern \"yyyy-mm\"");
        return Some(date);
    }

    // Two components, month first; day defaults to 1.
    let candidates = plausible_year_filter(html, &p.mm_yyyy, &p.mm_yyyy_year, false, bounds);
    let candidates = normalize_candidates(candidates, |text| {
        let caps = p.my_normalize.captures(text)?;
        let month: u32 = caps.get(1)?.as_str().parse().ok()?;
        Some(format!("{}-{:02}-01", caps.get(2)?.as_str(), month))
    });
    if let Some(winner) = select_candidate(candidates, &p.ymd_catch, &p.ymd_year, prefer_original, bounds)
        && let Some(date) = filter_ymd_candidate(&winner, &p.ymd_catch, "mm-yyyy", copyright_year, bounds)
    {
        return Some(date);
    }

    // Copyright mention as catch-all.
    if copyright_year != 0 {
        debug!(copyright_year, "using copyright year as default");
        let date = NaiveDate::from_ymd_opt(copyright_year, 1, 1)?;
        if bounds.contains(date) {
            return Some(date);
        }
    }

    // One component, last try. W3C namespace URLs carry years that would
    // dominate the frequency table, so they are blanked out first.
    debug!("switching to one component");
    let cleaned = p.w3_cleaner.replace_all(html, " ");
    let simple_slot = SearchSlot {
        name: "simple",
        pattern: &p.simple,
        year_subpattern: &p.year,
        catch: &p.year,
        needs_pivot_completion: false,
    };
    if let Some(winner) = search_pattern(&cleaned, &simple_slot, prefer_original, bounds)
        && let Ok(year) = winner.parse::<i32>()
        && let Some(date) = validate_date_parts(year, 1, 1, bounds)
    {
        debug!(%date, "date found for pattern \"simple\"");
        return Some(date);
    }

    None
}

/// Rewrites candidate strings to a canonical form, merging counts of
/// candidates that collapse to the same string. Entries the rewrite cannot
/// handle are dropped.
fn normalize_candidates<F>(candidates: Vec<YearCandidate>, rewrite: F) -> Vec<YearCandidate>
where
    F: Fn(&str) -> Option<String>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u32> = HashMap::new();

    for candidate in candidates {
        let Some(canonical) = rewrite(&candidate.text) else {
            continue;
        };
        let entry = counts.entry(canonical.clone()).or_insert(0);
        if *entry == 0 {
            order.push(canonical);
        }
        *entry += candidate.count;
    }

    order
        .into_iter()
        .map(|text| YearCandidate { count: counts[&text], text })
        .collect()
}
