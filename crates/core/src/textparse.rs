//! Date extraction from short text fragments.
//!
//! [`try_date_expr`] is the single entry point: it rejects fragments that
//! cannot hold a date, then runs a fixed cascade of structural heuristics
//! ([`fast_parse`]) and finally, in extensive mode, hands the fragment to an
//! injected [`NaturalDateParser`] as a slow fallback. Results are memoized
//! in a bounded cache keyed by the exact argument tuple.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::cache::{text_parse_cache, TextParseKey};
use crate::patterns::{month_number, patterns, MAX_SEGMENT_LEN, MIN_SEGMENT_LEN};
use crate::validate::{validate_date_parts, DateBounds};

/// Slow-fallback collaborator for free-form date expressions.
///
/// The fast structural heuristics cover the overwhelming majority of real
/// pages; a natural-language parser is only consulted in extensive mode,
/// after everything else failed. Implementations own their configuration
/// (preferred date order, languages, day-of-month defaults).
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use tempora_core::NaturalDateParser;
///
/// struct Fixed;
///
/// impl NaturalDateParser for Fixed {
///     fn parse(&self, _text: &str) -> Option<NaiveDate> {
///         NaiveDate::from_ymd_opt(2017, 9, 1)
///     }
/// }
/// ```
pub trait NaturalDateParser: Send + Sync {
    /// Attempts to read a calendar date out of `text`.
    fn parse(&self, text: &str) -> Option<NaiveDate>;
}

/// Converts all whitespace runs to single spaces and trims the ends.
pub(crate) fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts a string to at most `limit` characters.
pub(crate) fn str_limit(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(char::is_ascii_digit).count()
}

/// Completes a two-digit year: 90-99 land in the 1900s, everything else in
/// the 2000s. Four-digit years pass through untouched.
pub(crate) fn correct_year(year: i32) -> i32 {
    if year < 100 {
        if year >= 90 { year + 1900 } else { year + 2000 }
    } else {
        year
    }
}

/// Swaps day and month when the month slot holds an impossible value,
/// resolving D/M vs M/D ambiguity.
pub(crate) fn try_swap_values(day: u32, month: u32) -> (u32, u32) {
    if month > 12 && day <= 12 { (month, day) } else { (day, month) }
}

/// Tries to extract a full date from a text fragment.
///
/// Fragments are rejected outright when they are shorter than six
/// characters, hold fewer than 4 or more than 18 digits, contain no
/// date-shaped token, or look like a bare number/time instead of a date.
/// Surviving fragments go through the fast structural cascade, and, in
/// extensive mode, through the injected natural-language parser.
///
/// Pure given its inputs; fast-path results are memoized.
pub(crate) fn try_date_expr(
    text: &str,
    extensive: bool,
    bounds: &DateBounds,
    external: Option<&dyn NaturalDateParser>,
    use_cache: bool,
) -> Option<NaiveDate> {
    let text = normalize_spaces(text);
    let text = str_limit(&text, MAX_SEGMENT_LEN);
    if text.chars().count() < MIN_SEGMENT_LEN {
        return None;
    }

    let digits = digit_count(text);
    if digits < 4 || digits > 18 {
        return None;
    }

    let p = patterns();
    if !p.text_date.is_match(text) {
        return None;
    }
    if p.discard.is_match(text) {
        debug!(fragment = text, "discarded, not a date");
        return None;
    }

    // Fast structural pass, memoized. The slow external parser stays outside
    // the cache so that differently configured parsers never share results.
    let fast = if use_cache {
        let key = TextParseKey { fragment: text.to_string(), extensive, bounds: *bounds };
        match text_parse_cache().get(&key) {
            Some(cached) => cached,
            None => {
                let computed = fast_parse(text, extensive, bounds);
                text_parse_cache().insert(key, computed);
                computed
            }
        }
    } else {
        fast_parse(text, extensive, bounds)
    };

    if fast.is_some() {
        return fast;
    }

    if extensive
        && let Some(parser) = external
    {
        debug!(fragment = text, "sending to external parser");
        if let Some(date) = parser.parse(text)
            && bounds.contains(date)
        {
            return Some(date);
        }
    }

    None
}

/// The fast structural cascade, first success wins:
///
/// 1. compact `YYYYMMDD` digit run at the start of the fragment
/// 2. compact digit run embedded anywhere in the fragment
/// 3. ISO-like timestamp (timezone-aware only in extensive mode)
/// 4. explicit `YYYY-MM-DD` prefix
/// 5. `D.M.Y` / `D.M.YY` datestub
/// 6. Y-M-D and D-M-Y separated patterns
/// 7. Y-M and M-Y partial patterns (day defaults to 1)
/// 8. multilingual free-text phrasings
pub(crate) fn fast_parse(s: &str, extensive: bool, bounds: &DateBounds) -> Option<NaiveDate> {
    parse_compact_prefix(s, bounds)
        .or_else(|| parse_compact_embedded(s, bounds))
        .or_else(|| parse_iso_like(s, extensive, bounds))
        .or_else(|| parse_iso_date_prefix(s, bounds))
        .or_else(|| parse_datestub(s, bounds))
        .or_else(|| parse_ymd_separated(s, bounds))
        .or_else(|| parse_ym_separated(s, bounds))
        .or_else(|| regex_parse(s, bounds))
}

fn parse_compact_chunk(chunk: &str, bounds: &DateBounds) -> Option<NaiveDate> {
    let year: i32 = chunk[..4].parse().ok()?;
    let month: u32 = chunk[4..6].parse().ok()?;
    let day: u32 = chunk[6..8].parse().ok()?;
    validate_date_parts(year, month, day, bounds)
}

fn parse_compact_prefix(s: &str, bounds: &DateBounds) -> Option<NaiveDate> {
    // Also handles longer runs like '201709011234'.
    if s.len() < 8 || !s.as_bytes()[..8].iter().all(u8::is_ascii_digit) {
        return None;
    }

    let date = parse_compact_chunk(&s[..8], bounds)?;
    debug!(fragment = s, "found Y-M-D without separator");
    Some(date)
}

fn parse_compact_embedded(s: &str, bounds: &DateBounds) -> Option<NaiveDate> {
    let caps = patterns().ymd_no_sep.captures(s)?;
    let date = parse_compact_chunk(caps.get(1)?.as_str(), bounds)?;
    debug!(fragment = s, "found embedded Y-M-D without separator");
    Some(date)
}

fn parse_iso_like(s: &str, extensive: bool, bounds: &DateBounds) -> Option<NaiveDate> {
    if s.len() < 4 || !s.as_bytes()[..4].iter().all(u8::is_ascii_digit) {
        return None;
    }

    let naive = || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()).ok();
    let parsed = if extensive {
        DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()).ok().or_else(naive)
    } else {
        naive()
    };

    parsed.filter(|date| bounds.contains(*date))
}

fn parse_iso_date_prefix(s: &str, bounds: &DateBounds) -> Option<NaiveDate> {
    let caps = patterns().iso_date.captures(s)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let day: u32 = caps.get(3)?.as_str().parse().ok()?;
    validate_date_parts(year, month, day, bounds)
}

fn parse_datestub(s: &str, bounds: &DateBounds) -> Option<NaiveDate> {
    let caps = patterns().datestub.captures(s)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;

    let year_text = caps.get(3)?.as_str();
    let year: i32 = match year_text.len() {
        2 => 2000 + year_text.parse::<i32>().ok()?,
        4 => year_text.parse().ok()?,
        _ => return None,
    };

    let date = validate_date_parts(year, month, day, bounds)?;
    debug!(fragment = s, %date, "datestub parse");
    Some(date)
}

fn parse_ymd_separated(s: &str, bounds: &DateBounds) -> Option<NaiveDate> {
    let caps = patterns().ymd_named.captures(s)?;
    let year_m = caps.name("year")?;
    let month_m = caps.name("month")?;
    let day_m = caps.name("day")?;

    let mut year: i32 = year_m.as_str().parse().ok()?;
    let mut month: u32 = month_m.as_str().parse().ok()?;
    let mut day: u32 = day_m.as_str().parse().ok()?;

    // Year trailing the day means a D-M-Y form: complete short years and
    // resolve day/month ambiguity before validating.
    if year_m.start() > day_m.start() {
        year = correct_year(year);
        (day, month) = try_swap_values(day, month);
    }

    let date = validate_date_parts(year, month, day, bounds)?;
    debug!(fragment = s, %date, "separated Y-M-D parse");
    Some(date)
}

fn parse_ym_separated(s: &str, bounds: &DateBounds) -> Option<NaiveDate> {
    let caps = patterns().ym_named.captures(s)?;
    let year: i32 = caps.name("year")?.as_str().parse().ok()?;
    let month: u32 = caps.name("month")?.as_str().parse().ok()?;

    let date = validate_date_parts(year, month, 1, bounds)?;
    debug!(fragment = s, %date, "partial Y-M parse");
    Some(date)
}

/// Free-text parse for author-written phrasings: German day-month-name-year
/// first, then numeric month/day/year, then month-name orders.
pub(crate) fn regex_parse(s: &str, bounds: &DateBounds) -> Option<NaiveDate> {
    regex_parse_de(s, bounds).or_else(|| regex_parse_multilingual(s, bounds))
}

fn regex_parse_de(s: &str, bounds: &DateBounds) -> Option<NaiveDate> {
    let caps = patterns().german_text.captures(s)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month = month_number(caps.get(2)?.as_str())?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;

    let date = validate_date_parts(year, month, day, bounds)?;
    debug!(fragment = s, %date, "German text parse");
    Some(date)
}

fn regex_parse_multilingual(s: &str, bounds: &DateBounds) -> Option<NaiveDate> {
    let p = patterns();

    let (day, month, year_text): (u32, u32, &str) = if let Some(caps) = p.english_numeric.captures(s) {
        // American numeric order: month first
        let month = caps.get(1)?.as_str().parse().ok()?;
        let day = caps.get(2)?.as_str().parse().ok()?;
        (day, month, caps.get(3)?.as_str())
    } else {
        if !p.general_text.is_match(s) {
            return None;
        }

        if let Some(caps) = p.month_day_year.captures(s) {
            let month = month_number(caps.get(1)?.as_str())?;
            let day = caps.get(2)?.as_str().parse().ok()?;
            (day, month, caps.get(3)?.as_str())
        } else if let Some(caps) = p.day_month_year.captures(s) {
            let day = caps.get(1)?.as_str().parse().ok()?;
            let month = month_number(caps.get(2)?.as_str())?;
            (day, month, caps.get(3)?.as_str())
        } else {
            return None;
        }
    };

    let mut year: i32 = year_text.parse().ok()?;
    if year_text.len() == 2 {
        year += 2000;
    }

    let (day, month) = try_swap_values(day, month);
    let date = validate_date_parts(year, month, day, bounds)?;
    debug!(fragment = s, %date, "multilingual text parse");
    Some(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bounds() -> DateBounds {
        DateBounds::new(
            NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
        )
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse(text: &str) -> Option<NaiveDate> {
        try_date_expr(text, true, &bounds(), None, false)
    }

    #[test]
    fn test_rejects_short_and_digitless_fragments() {
        assert_eq!(parse("2 May"), None);
        assert_eq!(parse("no date in here at all"), None);
        assert_eq!(parse("1234567890123456789 and then some"), None);
    }

    #[test]
    fn test_rejects_times_and_bare_numbers() {
        assert_eq!(parse("08:32:55"), None);
        assert_eq!(parse("the year 2017."), None);
    }

    #[test]
    fn test_compact_prefix() {
        assert_eq!(parse("20170901"), Some(ymd(2017, 9, 1)));
        assert_eq!(parse("201709011234"), Some(ymd(2017, 9, 1)));
    }

    #[test]
    fn test_iso_timestamps() {
        assert_eq!(parse("2017-09-01T12:30:00Z"), Some(ymd(2017, 9, 1)));
        assert_eq!(parse("2021-08-20T03:06:46+09:00"), Some(ymd(2021, 8, 20)));
        // Timezone-aware forms need extensive mode
        assert_eq!(
            try_date_expr("2021-08-20T03:06:46+09:00", false, &bounds(), None, false),
            Some(ymd(2021, 8, 20)),
        );
    }

    #[test]
    fn test_datestub_with_short_year() {
        assert_eq!(parse("5.5.2010 some text"), Some(ymd(2010, 5, 5)));
        assert_eq!(parse("25.03.18 report"), Some(ymd(2018, 3, 25)));
    }

    #[test]
    fn test_separated_orders() {
        assert_eq!(parse("date 2016-07-12 here"), Some(ymd(2016, 7, 12)));
        assert_eq!(parse("am 12.07.2016 wurde"), Some(ymd(2016, 7, 12)));
        assert_eq!(parse("x 2011/08/21 y"), Some(ymd(2011, 8, 21)));
    }

    #[test]
    fn test_partial_ym() {
        assert_eq!(parse("issue 2017-11, online"), Some(ymd(2017, 11, 1)));
    }

    #[test]
    fn test_german_phrasing() {
        assert_eq!(parse("wurde am 1. Januar 2020 geschrieben"), Some(ymd(2020, 1, 1)));
        assert_eq!(parse("am 3. Dezember 2008 erschienen"), Some(ymd(2008, 12, 3)));
    }

    #[test]
    fn test_english_phrasings() {
        assert_eq!(parse("on January 12th, 2018"), Some(ymd(2018, 1, 12)));
        assert_eq!(parse("the 3rd of June 2019"), Some(ymd(2019, 6, 3)));
        assert_eq!(parse("written May 15, 19 by"), Some(ymd(2019, 5, 15)));
    }

    #[test]
    fn test_numeric_month_first_with_swap() {
        assert_eq!(parse("filed 12/25/2018 under"), Some(ymd(2018, 12, 25)));
        assert_eq!(parse("filed 25/12/2018 under"), Some(ymd(2018, 12, 25)));
    }

    #[rstest]
    #[case("2016-07-12", 2016, 7, 12)]
    #[case("12.07.2016", 2016, 7, 12)]
    #[case("2011/08/21", 2011, 8, 21)]
    #[case("21.8.2011", 2011, 8, 21)]
    #[case("20160712", 2016, 7, 12)]
    fn test_fast_parse_shapes(#[case] input: &str, #[case] y: i32, #[case] m: u32, #[case] d: u32) {
        assert_eq!(fast_parse(input, true, &bounds()), Some(ymd(y, m, d)));
    }

    #[test]
    fn test_correct_year_pivot() {
        assert_eq!(correct_year(95), 1995);
        assert_eq!(correct_year(90), 1990);
        assert_eq!(correct_year(89), 2089);
        assert_eq!(correct_year(11), 2011);
        assert_eq!(correct_year(2011), 2011);
    }

    #[test]
    fn test_try_swap_values() {
        assert_eq!(try_swap_values(25, 12), (25, 12));
        assert_eq!(try_swap_values(12, 25), (25, 12));
        assert_eq!(try_swap_values(13, 14), (13, 14));
    }

    #[test]
    fn test_external_parser_consulted_last() {
        struct Fixed;
        impl NaturalDateParser for Fixed {
            fn parse(&self, _text: &str) -> Option<NaiveDate> {
                NaiveDate::from_ymd_opt(2017, 9, 1)
            }
        }

        // The fragment survives the prefilter but defeats the fast path.
        let text = "sometime between 2014 and 2017, scholars say";
        assert_eq!(try_date_expr(text, true, &bounds(), Some(&Fixed), false), Some(ymd(2017, 9, 1)));
        // Not consulted outside extensive mode.
        assert_eq!(try_date_expr(text, false, &bounds(), Some(&Fixed), false), None);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        assert_eq!(parse("due on 03/03/2077 sharp"), None);
        assert_eq!(parse("back in 03/03/1988 when"), None);
    }

    #[test]
    fn test_cached_and_uncached_agree() {
        let cases = ["5.5.2010 some text", "on January 12th, 2018", "nothing here 08:32", "20170901"];
        for case in cases {
            let without = try_date_expr(case, true, &bounds(), None, false);
            let with_first = try_date_expr(case, true, &bounds(), None, true);
            let with_second = try_date_expr(case, true, &bounds(), None, true);
            assert_eq!(without, with_first, "case {:?}", case);
            assert_eq!(with_first, with_second, "case {:?}", case);
        }
    }
}
