//! The catalog of recognized date shapes.
//!
//! Every regular expression used by the extraction cascade is compiled once
//! into a [`DatePatterns`] struct behind a process-wide `LazyLock`. Patterns
//! come in families: structured Y-M-D forms for the raw-markup scan, numeric
//! slash/dot forms with two-digit years, two- and one-component forms,
//! copyright notices, URL-embedded dates, author-phrasing ("idiosyncrasy")
//! patterns per language, and free-text month-name phrasings.
//!
//! Each raw-markup cascade step is described by a [`SearchSlot`]: the search
//! pattern, the sub-pattern that pulls a year out of a match, the catch
//! pattern that re-extracts day/month/year groups from the winning string,
//! and whether two-digit years need pivot completion.

use regex::Regex;
use std::sync::LazyLock;

/// Fragments shorter than this cannot hold a date.
pub(crate) const MIN_SEGMENT_LEN: usize = 6;

/// Fragments are cut to this length before parsing.
pub(crate) const MAX_SEGMENT_LEN: usize = 52;

/// Free-text nodes longer than this are skipped by the body scan.
pub(crate) const MAX_FREE_TEXT_LEN: usize = 79;

/// A frequency table with more distinct candidates than this is treated as
/// too noisy to reason about.
pub(crate) const MAX_POSSIBLE_CANDIDATES: usize = 150;

/// Earliest plausible publication year for web documents.
pub(crate) const MIN_YEAR: i32 = 1995;

const YEAR_RX: &str = "199[0-9]|20[0-9]{2}";

const MONTH_NAMES_RX: &str = "january|february|march|april|may|june|july|august|september|october|\
november|december|januar|jänner|februar|feber|märz|mai|juni|juli|oktober|dezember|\
janvier|février|mars|avril|juin|juillet|août|aout|septembre|octobre|novembre|décembre|\
ocak|şubat|mart|nisan|mayıs|haziran|temmuz|ağustos|eylül|ekim|kasım|aralık|\
jan|feb|mar|apr|jun|jul|aug|sep|oct|okt|nov|dec|dez|déc";

/// The compiled pattern catalog.
///
/// Field names follow the families described in the module docs. Catch and
/// year sub-patterns always expose their components as numbered groups
/// (year, month, day in that order for three-component catches).
pub(crate) struct DatePatterns {
    // shared year extraction
    pub year: Regex,

    // fragment prefilters
    pub text_date: Regex,
    pub discard: Regex,
    pub last_non_digits: Regex,

    // fast-path structural patterns
    pub ymd_no_sep: Regex,
    pub iso_date: Regex,
    pub datestub: Regex,
    pub ymd_named: Regex,
    pub ym_named: Regex,

    // free-text phrasings
    pub german_text: Regex,
    pub english_numeric: Regex,
    pub general_text: Regex,
    pub month_day_year: Regex,
    pub day_month_year: Regex,

    // author idiosyncrasies
    pub idiosyncrasy_de: Regex,
    pub idiosyncrasy_en: Regex,
    pub idiosyncrasy_tr: Regex,

    // raw-markup cascade
    pub three: Regex,
    pub three_catch: Regex,
    pub three_loose: Regex,
    pub three_loose_catch: Regex,
    pub select_ymd: Regex,
    pub select_ymd_year: Regex,
    pub ymd_catch: Regex,
    pub ymd_year: Regex,
    pub date_strings: Regex,
    pub date_strings_catch: Regex,
    pub slashes: Regex,
    pub slashes_year: Regex,
    pub yyyy_mm: Regex,
    pub yyyy_mm_catch: Regex,
    pub mm_yyyy: Regex,
    pub mm_yyyy_year: Regex,
    pub simple: Regex,
    pub copyright: Regex,
    pub w3_cleaner: Regex,
    pub timestamp: Regex,

    // candidate normalization
    pub dmy_normalize: Regex,
    pub slashes_normalize: Regex,
    pub my_normalize: Regex,

    // URL-embedded dates
    pub url_complete: Regex,
    pub url_partial: Regex,

    // JSON fallback when decoding fails
    pub json_published: Regex,
    pub json_modified: Regex,
}

impl DatePatterns {
    fn compile() -> Self {
        let rx = |pattern: &str| Regex::new(pattern).expect("pattern catalog entry must compile");

        Self {
            year: rx(&format!(r"^\D?({YEAR_RX})")),

            text_date: rx(r"[.:,_/ -]|^[0-9]+$"),
            discard: rx(
                r"(?x)
                ^\d{2}:\d{2}(?:\ |:|$)          # time of day
                |^\D*\d{4}\D*$                  # bare number
                |[$€¥£¢₽₱฿\#₹]                  # currency
                |[A-Z]{3}[^A-Z]                 # currency codes
                |(?:\A|\D)(?:\+\d{2}|\d{3}|\d{5})\D  # tel./IPs/postal codes
                |ftps?|https?|sftp              # protocols
                |\.(?:com|net|org|info|gov|edu|de|fr|io)(?:\z|[^\p{L}\p{M}\d_])
                |IBAN|[A-Z]{2}[0-9]{2}
                |®",
            ),
            last_non_digits: rx(r"\D+$"),

            ymd_no_sep: rx(r"(?:\A|\D)([0-9]{8})(?:\D|\z)"),
            iso_date: rx(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})"),
            datestub: rx(r"^([0-3]?[0-9])\.([01]?[0-9])\.([0129][0-9]{1,3})"),
            ymd_named: rx(&format!(
                r"(?:\A|\D)(?:(?P<year>{YEAR_RX})[/.-](?P<month>[01]?[0-9])[/.-](?P<day>[0-3]?[0-9])|(?P<day>[0-3]?[0-9])[/.-](?P<month>[01]?[0-9])[/.-](?P<year>[0-9]{{2,4}}))(?:\D|\z)"
            )),
            ym_named: rx(&format!(
                r"(?:\A|\D)(?:(?P<year>{YEAR_RX})[/.-](?P<month>[01]?[0-9])|(?P<month>[01]?[0-9])[/.-](?P<year>{YEAR_RX}))(?:\D|\z)"
            )),

            german_text: rx(
                r"([0-9]{1,2})\.? (Januar|Jänner|Februar|Feber|März|April|Mai|Juni|Juli|August|September|Oktober|November|Dezember) ([0-9]{4})",
            ),
            english_numeric: rx(r"([01]?[0-9])[/.]([0-3]?[0-9])[/.]([0129][0-9]{1,3})"),
            general_text: rx(&format!(r"(?i)\b(?:{MONTH_NAMES_RX})\b")),
            month_day_year: rx(&format!(
                r"(?i)\b({MONTH_NAMES_RX})\.? ([0-9]{{1,2}})(?:st|nd|rd|th)?,? ([0-9]{{2,4}})"
            )),
            day_month_year: rx(&format!(
                r"(?i)\b([0-9]{{1,2}})(?:st|nd|rd|th)?\.? (?:of )?({MONTH_NAMES_RX})\.?,? ([0-9]{{2,4}})"
            )),

            idiosyncrasy_de: rx(
                r"(?:Datum|Stand|[Vv]eröffentlicht am|[Aa]ktualisiert am|zuletzt (?:geändert|aktualisiert) am)\s*:?\s*(?:(?P<day>[0-9]{1,2})\.(?P<month>[0-9]{1,2})\.(?P<year>[0-9]{2,4})|(?P<year>[0-9]{4})-(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2}))",
            ),
            idiosyncrasy_en: rx(
                r#"(?i)(?:date[^0-9"]{0,20}|updated|published|posted)\s*(?:in)?\s*:?\s*(?:(?P<year>[0-9]{4})[/.-](?P<month>[0-9]{1,2})[/.-](?P<day>[0-9]{1,2})|(?P<day>[0-9]{1,2})[/.](?P<month>[0-9]{1,2})[/.](?P<year>[0-9]{2,4}))"#,
            ),
            idiosyncrasy_tr: rx(
                r"(?i)(?:güncelleme|yayı[nm]lanma)\s*(?:tarihi)?\s*:?\s*(?P<day>[0-9]{1,2})[/.](?P<month>[0-9]{1,2})[/.](?P<year>[0-9]{2,4})|(?P<day>[0-9]{1,2})[/.](?P<month>[0-9]{1,2})[/.](?P<year>[0-9]{2,4})\s*tarihinde\s*(?:güncellendi|yayı[nm]landı)",
            ),

            three: rx(r"/([0-9]{4}/[0-9]{2}/[0-9]{2})[01/]"),
            three_catch: rx(r"([0-9]{4})/([0-9]{2})/([0-9]{2})"),
            three_loose: rx(r"\D([0-9]{4}[/.-][0-9]{2}[/.-][0-9]{2})\D"),
            three_loose_catch: rx(r"([0-9]{4})[/.-]([0-9]{2})[/.-]([0-9]{2})"),
            select_ymd: rx(r"\D([0-3]?[0-9][/.-][01]?[0-9][/.-][0-9]{4})\D"),
            select_ymd_year: rx(r"(19[0-9]{2}|20[0-9]{2})\D?$"),
            ymd_catch: rx(r"([0-9]{4})-([0-9]{2})-([0-9]{2})"),
            ymd_year: rx(r"^([0-9]{4})"),
            date_strings: rx(r"\D(19[0-9]{2}[01][0-9][0-3][0-9]|20[0-9]{2}[01][0-9][0-3][0-9])\D"),
            date_strings_catch: rx(r"([12][0-9]{3})([01][0-9])([0-3][0-9])"),
            slashes: rx(r"\D([0-3]?[0-9][/.][01]?[0-9][/.][0129][0-9])\D"),
            slashes_year: rx(r"([0-9]{2})$"),
            yyyy_mm: rx(r"\D([12][0-9]{3}[/.-][01][0-9])\D"),
            yyyy_mm_catch: rx(r"([12][0-9]{3})[/.-]([01][0-9])"),
            mm_yyyy: rx(r"\D([01]?[0-9][/.-][12][0-9]{3})\D"),
            mm_yyyy_year: rx(r"([12][0-9]{3})\D?$"),
            simple: rx(&format!(r"\D({YEAR_RX})\D")),
            copyright: rx(r"(?:©|&copy;|Copyright|\(c\))\D*([12][0-9]{3})\D"),
            w3_cleaner: rx(&format!(r"w3\.org\D({YEAR_RX})\D")),
            timestamp: rx(r"([0-9]{4}-[0-9]{2}-[0-9]{2}).[0-9]{2}:[0-9]{2}:[0-9]{2}"),

            dmy_normalize: rx(r"^([0-3]?[0-9])[/.-]([01]?[0-9])[/.-]([0-9]{4})"),
            slashes_normalize: rx(r"^([0-3]?[0-9])[/.]([01]?[0-9])[/.]([0-9]{2})"),
            my_normalize: rx(r"^([01]?[0-9])[/.-]([0-9]{4})"),

            url_complete: rx(r"\D([0-9]{4})[/_-]([0-9]{1,2})[/_-]([0-9]{1,2})(?:\D|$)"),
            url_partial: rx(r"\D([0-9]{4})[/_-]([0-9]{2})(?:\D|$)"),

            json_published: rx(r#""(?:datePublished|dateCreated)"\s*:\s*"([0-9]{4}-[0-9]{2}-[0-9]{2})"#),
            json_modified: rx(r#""dateModified"\s*:\s*"([0-9]{4}-[0-9]{2}-[0-9]{2})"#),
        }
    }

    /// The strict and loose three-component steps of the raw-markup cascade.
    pub(crate) fn three_component_slots(&self) -> [SearchSlot<'_>; 2] {
        [
            SearchSlot {
                name: "three",
                pattern: &self.three,
                year_subpattern: &self.year,
                catch: &self.three_catch,
                needs_pivot_completion: false,
            },
            SearchSlot {
                name: "three-loose",
                pattern: &self.three_loose,
                year_subpattern: &self.year,
                catch: &self.three_loose_catch,
                needs_pivot_completion: false,
            },
        ]
    }
}

/// One step of the raw-markup search cascade.
pub(crate) struct SearchSlot<'a> {
    pub name: &'static str,
    pub pattern: &'a Regex,
    pub year_subpattern: &'a Regex,
    pub catch: &'a Regex,
    pub needs_pivot_completion: bool,
}

static PATTERNS: LazyLock<DatePatterns> = LazyLock::new(DatePatterns::compile);

/// Access the process-wide compiled catalog.
pub(crate) fn patterns() -> &'static DatePatterns {
    &PATTERNS
}

const MONTHS_EN: &[(&str, u32)] = &[
    ("jan", 1),
    ("january", 1),
    ("feb", 2),
    ("february", 2),
    ("mar", 3),
    ("march", 3),
    ("apr", 4),
    ("april", 4),
    ("may", 5),
    ("jun", 6),
    ("june", 6),
    ("jul", 7),
    ("july", 7),
    ("aug", 8),
    ("august", 8),
    ("sep", 9),
    ("september", 9),
    ("oct", 10),
    ("october", 10),
    ("nov", 11),
    ("november", 11),
    ("dec", 12),
    ("december", 12),
];

const MONTHS_DE: &[(&str, u32)] = &[
    ("januar", 1),
    ("jänner", 1),
    ("februar", 2),
    ("feber", 2),
    ("mär", 3),
    ("märz", 3),
    ("mai", 5),
    ("juni", 6),
    ("juli", 7),
    ("okt", 10),
    ("oktober", 10),
    ("dez", 12),
    ("dezember", 12),
];

const MONTHS_FR: &[(&str, u32)] = &[
    ("janvier", 1),
    ("février", 2),
    ("mars", 3),
    ("avril", 4),
    ("juin", 6),
    ("juillet", 7),
    ("août", 8),
    ("aout", 8),
    ("septembre", 9),
    ("octobre", 10),
    ("novembre", 11),
    ("déc", 12),
    ("décembre", 12),
];

const MONTHS_TR: &[(&str, u32)] = &[
    ("ocak", 1),
    ("oca", 1),
    ("şubat", 2),
    ("şub", 2),
    ("mart", 3),
    ("nisan", 4),
    ("nis", 4),
    ("mayıs", 5),
    ("haziran", 6),
    ("haz", 6),
    ("temmuz", 7),
    ("tem", 7),
    ("ağustos", 8),
    ("ağu", 8),
    ("eylül", 9),
    ("eyl", 9),
    ("ekim", 10),
    ("eki", 10),
    ("kasım", 11),
    ("kas", 11),
    ("aralık", 12),
    ("ara", 12),
];

/// Resolve a month name to its number through the per-language tables.
///
/// Lookup is case-insensitive; abbreviations resolve like full names.
pub(crate) fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    [MONTHS_EN, MONTHS_DE, MONTHS_FR, MONTHS_TR]
        .iter()
        .find_map(|table| table.iter().find(|(n, _)| *n == lower).map(|(_, number)| *number))
}
