//! The extraction strategies.
//!
//! Each function here is one independent scanner in the cascade: structured
//! `<meta>` elements, JSON-LD blocks, author-phrasing searches over the raw
//! markup, URL-embedded dates, preview-image URLs, `<time>` elements, and
//! the free-text body scan. Every scanner either produces one validated
//! date or nothing; failures never propagate.

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::finder::ScanContext;
use crate::parse::Document;
use crate::patterns::{patterns, MAX_FREE_TEXT_LEN, MAX_POSSIBLE_CANDIDATES, MAX_SEGMENT_LEN, MIN_SEGMENT_LEN};
use crate::textparse::{correct_year, fast_parse, normalize_spaces, str_limit, try_swap_values};
use crate::validate::{check_extracted_reference, compare_values, validate_date, validate_date_parts};

/// Meta attribute names and properties announcing a publication date.
const DATE_ATTRIBUTES: &[&str] = &[
    "article.created",
    "article_date_original",
    "article:post_date",
    "article.published",
    "article:published",
    "article:published_date",
    "article:published_time",
    "article:publicationdate",
    "citation_date",
    "citation_publication_date",
    "content_create_date",
    "created",
    "date",
    "date_created",
    "date_published",
    "datecreated",
    "dateposted",
    "datepublished",
    "dc.date",
    "dc.created",
    "dc.date.created",
    "dc.date.issued",
    "dc.date.publication",
    "dcterms.created",
    "dcterms.date",
    "dcterms.issued",
    "dc:created",
    "dc:date",
    "displaydate",
    "doc_date",
    "field-name-post-date",
    "gentime",
    "og:article:published",
    "og:article:published_time",
    "og:datepublished",
    "og:pubdate",
    "og:publish_date",
    "og:published_time",
    "og:regdate",
    "originalpublicationdate",
    "parsely-pub-date",
    "pdate",
    "ptime",
    "pubdate",
    "publishdate",
    "publish_date",
    "publish_time",
    "publish-date",
    "published-date",
    "published_date",
    "published_time",
    "publisheddate",
    "publication_date",
    "release_date",
    "rnews:datepublished",
    "sailthru.date",
    "timestamp",
];

/// Meta properties announcing a modification date.
const PROPERTY_MODIFIED: &[&str] = &[
    "article:modified",
    "article:modified_date",
    "article:modified_time",
    "article:post_modified",
    "datemodified",
    "dc.modified",
    "dcterms.modified",
    "lastmodified",
    "modified_time",
    "modificationdate",
    "og:article:modified_time",
    "og:modified_time",
    "og:updated_time",
    "release_date",
    "revision_date",
    "updated_time",
];

/// Meta names announcing a modification date.
const MODIFIED_NAMES: &[&str] = &["lastdate", "lastmod", "lastmodified", "last-modified", "modified", "utime"];

const ITEMPROP_ORIGINAL: &[&str] = &["datecreated", "datepublished", "pubyear"];
const ITEMPROP_MODIFIED: &[&str] = &["datemodified", "dateupdate"];

fn in_table(table: &[&str], key: &str) -> bool {
    table.contains(&key)
}

/// The source URL announced by the document itself.
pub(crate) fn canonical_url(doc: &Document) -> Option<String> {
    for elem in doc.select(r#"link[rel="canonical"]"#).ok()? {
        if let Some(href) = elem.attr("href") {
            let href = href.trim();
            if !href.is_empty() {
                return Some(href.to_string());
            }
        }
    }
    None
}

/// Extracts a full Y-M-D date embedded in a URL path.
pub(crate) fn extract_url_date(url: &str, ctx: &ScanContext) -> Option<NaiveDate> {
    let caps = patterns().url_complete.captures(url)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let day: u32 = caps.get(3)?.as_str().parse().ok()?;

    let date = validate_date_parts(year, month, day, &ctx.bounds)?;
    debug!(url, %date, "found date in URL");
    Some(date)
}

/// Extracts an approximate Y-M date from a URL path, day defaulting to 1.
pub(crate) fn extract_partial_url_date(url: &str, ctx: &ScanContext) -> Option<NaiveDate> {
    let caps = patterns().url_partial.captures(url)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;

    let date = validate_date_parts(year, month, 1, &ctx.bounds)?;
    debug!(url, %date, "found partial date in URL");
    Some(date)
}

/// Scans `<meta>` elements for date cues.
///
/// Publication names/properties win directly in original-date mode and
/// modification names/properties win directly otherwise; the opposite kind,
/// along with lower-granularity cues (`og:url`, `copyrightyear`), is kept in
/// a reserve slot used only when nothing better appears.
pub(crate) fn examine_meta_elements(doc: &Document, ctx: &ScanContext) -> Option<NaiveDate> {
    let mut reserve: Option<NaiveDate> = None;

    for elem in doc.select("meta").ok()? {
        let content = elem.attr("content").unwrap_or_default().trim();
        let datetime = elem.attr("datetime").unwrap_or_default().trim();
        if content.is_empty() && datetime.is_empty() {
            continue;
        }

        let name = elem.attr("name").unwrap_or_default().trim().to_lowercase();
        let property = elem.attr("property").unwrap_or_default().trim().to_lowercase();
        let item_prop = elem.attr("itemprop").unwrap_or_default().trim().to_lowercase();
        let pub_date = elem.attr("pubdate").unwrap_or_default().trim().to_lowercase();
        let http_equiv = elem.attr("http-equiv").unwrap_or_default().trim().to_lowercase();

        let mut primary: Option<NaiveDate> = None;

        if !name.is_empty() && !content.is_empty() {
            // Name attribute first: the most frequent
            if name == "og:url" {
                reserve = extract_url_date(content, ctx).or(reserve);
            } else if in_table(DATE_ATTRIBUTES, &name) {
                debug!(name, content, "examining meta name");
                primary = ctx.try_date_expr(content);
            } else if in_table(MODIFIED_NAMES, &name) {
                debug!(name, content, "examining meta name");
                if ctx.prefer_original {
                    reserve = ctx.try_date_expr(content).or(reserve);
                } else {
                    primary = ctx.try_date_expr(content);
                }
            }
        } else if !property.is_empty() && !content.is_empty() {
            let in_modified = in_table(PROPERTY_MODIFIED, &property);
            let in_date = in_table(DATE_ATTRIBUTES, &property);

            if in_date || in_modified {
                debug!(property, content, "examining meta property");
                if let Some(attempt) = ctx.try_date_expr(content) {
                    if (in_date && ctx.prefer_original) || (in_modified && !ctx.prefer_original) {
                        primary = Some(attempt);
                    } else {
                        reserve = Some(attempt);
                    }
                }
            }
        } else if !item_prop.is_empty() {
            if in_table(ITEMPROP_ORIGINAL, &item_prop) || in_table(ITEMPROP_MODIFIED, &item_prop) {
                debug!(item_prop, "examining meta itemprop");
                let attempt = if !datetime.is_empty() {
                    ctx.try_date_expr(datetime)
                } else if !content.is_empty() {
                    ctx.try_date_expr(content)
                } else {
                    None
                };

                if let Some(attempt) = attempt
                    && ((in_table(ITEMPROP_ORIGINAL, &item_prop) && ctx.prefer_original)
                        || (in_table(ITEMPROP_MODIFIED, &item_prop) && !ctx.prefer_original))
                {
                    primary = Some(attempt);
                }
            } else if item_prop == "copyrightyear" && !content.is_empty() {
                debug!(content, "examining meta copyrightyear");
                if let Ok(year) = content.parse::<i32>()
                    && let Some(date) = validate_date_parts(year, 1, 1, &ctx.bounds)
                {
                    reserve = Some(date);
                }
            }
        } else if pub_date == "pubdate" && !content.is_empty() {
            debug!(content, "examining meta pubdate");
            primary = ctx.try_date_expr(content);
        } else if !http_equiv.is_empty() && !content.is_empty() {
            if http_equiv == "date" {
                debug!(content, "examining meta http-equiv date");
                if ctx.prefer_original {
                    primary = ctx.try_date_expr(content);
                } else {
                    reserve = ctx.try_date_expr(content).or(reserve);
                }
            } else if http_equiv == "last-modified" {
                debug!(content, "examining meta http-equiv last-modified");
                if ctx.prefer_original {
                    reserve = ctx.try_date_expr(content).or(reserve);
                } else {
                    primary = ctx.try_date_expr(content);
                }
            }
        }

        if primary.is_some() {
            return primary;
        }
    }

    if reserve.is_some() {
        debug!("opting for reserve date with less granularity");
    }
    reserve
}

/// Looks for date keys in JSON-LD (and settings JSON) script blocks.
///
/// Well-formed JSON is decoded and searched recursively; blocks that fail to
/// decode even after trailing-bracket repair fall back to a regex scan. When
/// several keys match, the oldest candidate wins in original-date mode and
/// the newest otherwise.
pub(crate) fn json_search(doc: &Document, ctx: &ScanContext) -> Option<NaiveDate> {
    let target_keys: &[&str] = if ctx.prefer_original {
        &["datePublished", "dateCreated"]
    } else {
        &["dateModified"]
    };

    let scripts = doc
        .select(r#"script[type="application/ld+json"], script[type="application/settings+json"]"#)
        .ok()?;

    let mut captured: Vec<String> = Vec::new();
    for script in scripts {
        let json_text = script.text();
        let json_text = json_text.trim();
        if json_text.is_empty() || !json_text.contains("\"date") {
            continue;
        }

        match parse_json_lenient(json_text) {
            Some(value) => collect_date_texts(&value, target_keys, &mut captured),
            None => {
                debug!("failed to decode JSON block, falling back to regex");
                let rx = if ctx.prefer_original {
                    &patterns().json_published
                } else {
                    &patterns().json_modified
                };
                if let Some(caps) = rx.captures(json_text) {
                    captured.push(caps[1].to_string());
                }
            }
        }
    }

    let mut best: Option<NaiveDate> = None;
    for text in captured {
        if let Some(date) = fast_parse(&text, ctx.extensive, &ctx.bounds)
            && validate_date(date, &ctx.bounds)
        {
            debug!(text, %date, "JSON date candidate");
            best = compare_values(best, date, ctx.prefer_original);
        }
    }

    best
}

/// Decodes a JSON block, removing trailing closing brackets if necessary.
/// Some pages ship JSON-LD with one bracket too many.
fn parse_json_lenient(text: &str) -> Option<Value> {
    let mut text = text.trim_end();
    loop {
        match serde_json::from_str(text) {
            Ok(value) => return Some(value),
            Err(_) => {
                let stripped = text.strip_suffix('}')?;
                text = stripped.trim_end();
            }
        }
    }
}

fn collect_date_texts(value: &Value, target_keys: &[&str], out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                match nested {
                    Value::String(text) if target_keys.contains(&key.as_str()) => {
                        out.push(normalize_spaces(text));
                    }
                    Value::Object(_) | Value::Array(_) => collect_date_texts(nested, target_keys, out),
                    _ => {}
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_date_texts(item, target_keys, out);
            }
        }
        _ => {}
    }
}

/// Looks for author-written date phrasings throughout the page, one language
/// at a time.
pub(crate) fn idiosyncrasies_search(html: &str, ctx: &ScanContext) -> Option<NaiveDate> {
    let p = patterns();
    [&p.idiosyncrasy_de, &p.idiosyncrasy_en, &p.idiosyncrasy_tr]
        .into_iter()
        .find_map(|rx| extract_idiosyncrasy(rx, html, ctx))
}

/// Resolves one idiosyncrasy match into date components.
///
/// The capture groups are named in every alternation, so the only ambiguity
/// left is component order: a four-digit year ahead of the day means the
/// phrasing was Y-M-D, anything else is treated as D-M-Y with short-year
/// completion and day/month disambiguation.
fn extract_idiosyncrasy(rx: &Regex, html: &str, ctx: &ScanContext) -> Option<NaiveDate> {
    let caps = rx.captures(html)?;
    let day_m = caps.name("day")?;
    let month_m = caps.name("month")?;
    let year_m = caps.name("year")?;

    let mut day: u32 = day_m.as_str().parse().ok()?;
    let mut month: u32 = month_m.as_str().parse().ok()?;
    let mut year: i32 = year_m.as_str().parse().ok()?;

    let year_leads = year_m.as_str().len() == 4 && year_m.start() < day_m.start();
    if !year_leads {
        year = correct_year(year);
        (day, month) = try_swap_values(day, month);
    }

    let date = validate_date_parts(year, month, day, &ctx.bounds)?;
    debug!(matched = &caps[0], %date, "idiosyncratic pattern found");
    Some(date)
}

/// Checks social/preview image URLs for an embedded full date.
pub(crate) fn img_search(doc: &Document, ctx: &ScanContext) -> Option<NaiveDate> {
    for elem in doc.select(r#"meta[property="og:image"]"#).ok()? {
        if let Some(content) = elem.attr("content") {
            let content = content.trim();
            if !content.is_empty()
                && let Some(date) = extract_url_date(content, ctx)
            {
                return Some(date);
            }
        }
    }
    None
}

/// Looks for a `YYYY-MM-DD hh:mm:ss` timestamp anywhere in the markup.
pub(crate) fn timestamp_search(html: &str, ctx: &ScanContext) -> Option<NaiveDate> {
    let caps = patterns().timestamp.captures(html)?;
    let date = fast_parse(caps.get(1)?.as_str(), ctx.extensive, &ctx.bounds)?;
    debug!(matched = &caps[0], %date, "timestamp found");
    Some(date)
}

/// Prepares an element text and tries to extract a date from it.
fn examine_text(text: &str, ctx: &ScanContext) -> Option<NaiveDate> {
    let text = normalize_spaces(text);
    if text.chars().count() <= MIN_SEGMENT_LEN {
        return None;
    }

    let text = str_limit(&text, MAX_SEGMENT_LEN);
    let text = patterns().last_non_digits.replace(text, "");
    ctx.try_date_expr(&text)
}

/// Feeds title and top-heading text through the text date parser.
pub(crate) fn examine_title_elements(doc: &Document, ctx: &ScanContext) -> Option<NaiveDate> {
    for elem in doc.select("title, h1").ok()? {
        if let Some(date) = examine_text(&elem.text(), ctx) {
            return Some(date);
        }
    }
    None
}

/// Scans `<time>` elements.
///
/// Explicit publication markers (`pubdate`, `entry-date`/`entry-time`
/// classes in original-date mode, `updated` otherwise) short-circuit;
/// everything else feeds the running best-reference date.
pub(crate) fn examine_time_elements(doc: &Document, ctx: &ScanContext) -> Option<NaiveDate> {
    let elements = doc.select("time").ok()?;
    if elements.is_empty() || elements.len() >= MAX_POSSIBLE_CANDIDATES {
        return None;
    }

    let mut reference: Option<NaiveDate> = None;
    for elem in &elements {
        let text = normalize_spaces(&elem.text());
        let class = elem.attr("class").unwrap_or_default().trim();
        let datetime = elem.attr("datetime").unwrap_or_default().trim();
        let pub_date = elem.attr("pubdate").unwrap_or_default().trim();

        if datetime.chars().count() > 6 {
            let mut shortcut = false;
            if pub_date.eq_ignore_ascii_case("pubdate") && ctx.prefer_original {
                debug!(datetime, "shortcut for time pubdate found");
                shortcut = true;
            } else if !class.is_empty() {
                let class_is_entry = class.starts_with("entry-date") || class.starts_with("entry-time");
                if ctx.prefer_original && class_is_entry {
                    debug!(datetime, "shortcut for entry time found");
                    shortcut = true;
                } else if !ctx.prefer_original && class == "updated" {
                    debug!(datetime, "shortcut for updated time found");
                    shortcut = true;
                }
            }

            if shortcut {
                if let Some(attempt) = ctx.try_date_expr(datetime) {
                    return Some(attempt);
                }
            } else {
                reference = compare_reference(reference, datetime, ctx);
            }
        } else if text.chars().count() > 6 {
            debug!(text, "time element text found");
            reference = compare_reference(reference, &text, ctx);
        }
    }

    check_extracted_reference(reference, &ctx.bounds)
}

/// Scans short free-text nodes under `div` and `p` elements, keeping the
/// best reference date seen.
pub(crate) fn scan_free_text(doc: &Document, ctx: &ScanContext) -> Option<NaiveDate> {
    let mut reference: Option<NaiveDate> = None;

    for elem in doc.select("div, p").ok()? {
        for chunk in elem.direct_texts() {
            let text = normalize_spaces(&chunk);
            let len = text.chars().count();
            if len > 0 && len <= MAX_FREE_TEXT_LEN {
                reference = compare_reference(reference, &text, ctx);
            }
        }
    }

    check_extracted_reference(reference, &ctx.bounds)
}

/// Compares a new text fragment against the running reference date, keeping
/// the older or newer of the two depending on the search direction.
pub(crate) fn compare_reference(reference: Option<NaiveDate>, text: &str, ctx: &ScanContext) -> Option<NaiveDate> {
    match ctx.try_date_expr(text) {
        Some(attempt) => compare_values(reference, attempt, ctx.prefer_original),
        None => reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::DateBounds;

    fn ctx() -> ScanContext<'static> {
        ScanContext {
            extensive: true,
            prefer_original: false,
            bounds: DateBounds::new(
                NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
            ),
            external: None,
            use_cache: false,
        }
    }

    fn original_ctx() -> ScanContext<'static> {
        ScanContext { prefer_original: true, ..ctx() }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn doc(html: &str) -> Document {
        Document::parse(html).unwrap()
    }

    #[test]
    fn test_meta_published_vs_modified() {
        let html = r#"<html><head>
            <meta property="og:updated_time" content="2017-09-01"/>
            <meta property="og:published_time" content="2017-07-02"/>
            </head><body></body></html>"#;
        let d = doc(html);

        assert_eq!(examine_meta_elements(&d, &ctx()), Some(ymd(2017, 9, 1)));
        assert_eq!(examine_meta_elements(&d, &original_ctx()), Some(ymd(2017, 7, 2)));
    }

    #[test]
    fn test_meta_name_last_modified() {
        let html = r#"<html><head><meta name="last-modified" content="2017-09-01"/></head><body></body></html>"#;
        assert_eq!(examine_meta_elements(&doc(html), &ctx()), Some(ymd(2017, 9, 1)));
    }

    #[test]
    fn test_meta_compact_content() {
        let html = r#"<html><head><meta property="og:regdate" content="20210820030646"></head><body></body></html>"#;
        assert_eq!(examine_meta_elements(&doc(html), &original_ctx()), Some(ymd(2021, 8, 20)));
    }

    #[test]
    fn test_meta_copyrightyear_reserve() {
        let html = r#"<html><head><meta itemprop="copyrightyear" content="2017"/></head><body></body></html>"#;
        assert_eq!(examine_meta_elements(&doc(html), &ctx()), Some(ymd(2017, 1, 1)));
    }

    #[test]
    fn test_json_ld_object() {
        let html = r#"<html><head><script type="application/ld+json">
            {"@context":"https://schema.org","@type":"Article",
             "datePublished":"2017-07-02","dateModified":"2017-09-01"}
            </script></head><body></body></html>"#;
        let d = doc(html);

        assert_eq!(json_search(&d, &ctx()), Some(ymd(2017, 9, 1)));
        assert_eq!(json_search(&d, &original_ctx()), Some(ymd(2017, 7, 2)));
    }

    #[test]
    fn test_json_ld_nested_array() {
        let html = r#"<html><head><script type="application/ld+json">
            [{"@type":"WebPage"},{"@type":"Article","author":{"name":"X"},"dateModified":"2018-02-06T10:00:00Z"}]
            </script></head><body></body></html>"#;
        assert_eq!(json_search(&doc(html), &ctx()), Some(ymd(2018, 2, 6)));
    }

    #[test]
    fn test_json_ld_trailing_bracket_repair() {
        let html = r#"<html><head><script type="application/ld+json">
            {"dateModified":"2018-02-06"}}
            </script></head><body></body></html>"#;
        assert_eq!(json_search(&doc(html), &ctx()), Some(ymd(2018, 2, 6)));
    }

    #[test]
    fn test_json_regex_fallback() {
        let html = r#"<html><head><script type="application/ld+json">
            not json at all "dateModified": "2018-02-06" trailing garbage
            </script></head><body></body></html>"#;
        assert_eq!(json_search(&doc(html), &ctx()), Some(ymd(2018, 2, 6)));
    }

    #[test]
    fn test_idiosyncrasies_german() {
        let c = ctx();
        assert_eq!(idiosyncrasies_search("<p>Datum: 06.02.2018</p>", &c), Some(ymd(2018, 2, 6)));
        assert_eq!(idiosyncrasies_search("<p>Veröffentlicht am 1.9.2020</p>", &c), Some(ymd(2020, 9, 1)));
        assert_eq!(idiosyncrasies_search("<p>Stand: 2018-02-06</p>", &c), Some(ymd(2018, 2, 6)));
    }

    #[test]
    fn test_idiosyncrasies_english_with_swap() {
        let c = ctx();
        assert_eq!(idiosyncrasies_search("<p>Published: 12/06/2018</p>", &c), Some(ymd(2018, 6, 12)));
        // Month slot above 12 forces the swap
        assert_eq!(idiosyncrasies_search("<p>updated: 06/25/18</p>", &c), Some(ymd(2018, 6, 25)));
    }

    #[test]
    fn test_idiosyncrasies_turkish() {
        let c = ctx();
        assert_eq!(
            idiosyncrasies_search("<p>Güncelleme tarihi: 06.02.2018</p>", &c),
            Some(ymd(2018, 2, 6)),
        );
        assert_eq!(
            idiosyncrasies_search("<p>6.2.2018 tarihinde güncellendi</p>", &c),
            Some(ymd(2018, 2, 6)),
        );
    }

    #[test]
    fn test_url_dates() {
        let c = ctx();
        assert_eq!(
            extract_url_date("https://example.org/category/2016/07/12/the-post", &c),
            Some(ymd(2016, 7, 12)),
        );
        assert_eq!(extract_url_date("https://example.org/about", &c), None);
        assert_eq!(
            extract_partial_url_date("https://example.org/2016/07/the-post", &c),
            Some(ymd(2016, 7, 1)),
        );
    }

    #[test]
    fn test_img_search() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://cdn.example.org/uploads/2016/07/12/header.jpg"/>
            </head><body></body></html>"#;
        assert_eq!(img_search(&doc(html), &ctx()), Some(ymd(2016, 7, 12)));
    }

    #[test]
    fn test_timestamp_search() {
        let html = "<html><body><span>2018-02-06 11:09:27</span></body></html>";
        assert_eq!(timestamp_search(html, &ctx()), Some(ymd(2018, 2, 6)));
    }

    #[test]
    fn test_title_scan() {
        let html = "<html><head><title>Report for 2016-07-12</title></head><body></body></html>";
        assert_eq!(examine_title_elements(&doc(html), &ctx()), Some(ymd(2016, 7, 12)));
    }

    #[test]
    fn test_time_elements_updated_shortcut() {
        let html = r#"<html><body>
            <time class="updated" datetime="2018-02-06">old label</time>
            </body></html>"#;
        assert_eq!(examine_time_elements(&doc(html), &ctx()), Some(ymd(2018, 2, 6)));
    }

    #[test]
    fn test_time_elements_keep_newest() {
        let html = r#"<html><body>
            <time datetime="2017-09-01">first</time>
            <time datetime="2018-02-06">second</time>
            </body></html>"#;
        assert_eq!(examine_time_elements(&doc(html), &ctx()), Some(ymd(2018, 2, 6)));
        assert_eq!(examine_time_elements(&doc(html), &original_ctx()), Some(ymd(2017, 9, 1)));
    }

    #[test]
    fn test_free_text_scan_bounds_length() {
        let filler = "x".repeat(120);
        let html = format!(
            "<html><body><div>posted 14.11.2017 late</div><p>{}</p></body></html>",
            filler,
        );
        assert_eq!(scan_free_text(&doc(&html), &ctx()), Some(ymd(2017, 11, 14)));
    }

    #[test]
    fn test_canonical_url() {
        let html = r#"<html><head><link rel="canonical" href="https://example.org/2016/07/12/post"/></head></html>"#;
        assert_eq!(canonical_url(&doc(html)), Some("https://example.org/2016/07/12/post".to_string()));
    }
}
