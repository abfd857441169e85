//! Library API integration tests
use chrono::NaiveDate;
use tempora_core::*;

fn bounded() -> FinderConfig {
    FinderConfig::builder()
        .min_date(NaiveDate::from_ymd_opt(1995, 1, 1).unwrap())
        .max_date(NaiveDate::from_ymd_opt(2021, 12, 31).unwrap())
        .build()
}

const ARTICLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Quarterly Review</title>
    <meta property="article:published_time" content="2017-07-02T09:00:00Z">
    <meta property="article:modified_time" content="2017-09-01T10:30:00Z">
    <script type="application/ld+json">
    {
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": "Quarterly Review",
        "datePublished": "2017-07-02",
        "dateModified": "2017-09-01"
    }
    </script>
</head>
<body>
    <h1>Quarterly Review</h1>
    <p>Published figures for the quarter.</p>
    <footer>© Example Media 2014-2019</footer>
</body>
</html>
"#;

#[test]
fn test_find_date_api() {
    let found = find_date(ARTICLE_HTML).expect("extraction should not fail");
    assert_eq!(found, Some("2017-09-01".to_string()));
}

#[test]
fn test_prefer_original_api() {
    let config = FinderConfig::builder().prefer_original(true).build();
    let found = find_date_with_config(ARTICLE_HTML, &config).unwrap();
    assert_eq!(found, Some("2017-07-02".to_string()));
}

#[test]
fn test_finder_builder() {
    let config = FinderConfig::builder()
        .extensive(false)
        .output_format("%d/%m/%Y")
        .build();
    let finder = DateFinder::with_config(config);
    assert_eq!(finder.find(ARTICLE_HTML).unwrap(), Some("01/09/2017".to_string()));
}

#[test]
fn test_document_api() {
    let doc = Document::parse(ARTICLE_HTML).expect("should parse");
    assert_eq!(doc.title(), Some("Quarterly Review".to_string()));

    let finder = DateFinder::new();
    assert_eq!(finder.find_in_document(&doc).unwrap(), Some("2017-09-01".to_string()));
}

#[test]
fn test_no_date_is_ok_none() {
    let found = find_date("<html><body><p>nothing dated here</p></body></html>").unwrap();
    assert_eq!(found, None);
}

#[test]
fn test_configuration_error_is_upfront() {
    let config = FinderConfig { output_format: "no directive".to_string(), ..Default::default() };
    assert!(matches!(
        find_date_with_config(ARTICLE_HTML, &config),
        Err(TemporaError::InvalidFormat(_)),
    ));
}

#[test]
fn test_convert_date_api() {
    assert_eq!(convert_date("2017-09-01", "%Y-%m-%d", "%Y-%m-%d").unwrap(), "2017-09-01");
    assert_eq!(convert_date("2017-09-01", "%Y-%m-%d", "%d %b %Y").unwrap(), "01 Sep 2017");
}

#[test]
fn test_bounds_are_honored_end_to_end() {
    let config = FinderConfig::builder()
        .min_date(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap())
        .max_date(NaiveDate::from_ymd_opt(2021, 12, 31).unwrap())
        .build();

    // Every candidate in the document predates the window except the
    // copyright range, which caps at 2014 and is likewise too old.
    let found = find_date_with_config(ARTICLE_HTML, &config).unwrap();
    assert_eq!(found, None);
}

#[test]
fn test_injected_parser() {
    struct Nineties;
    impl NaturalDateParser for Nineties {
        fn parse(&self, text: &str) -> Option<NaiveDate> {
            text.contains("summer of '96").then(|| NaiveDate::from_ymd_opt(1996, 7, 1))?
        }
    }

    let html = "<html><body><p>written in the summer of '96, back in the 1990s</p></body></html>";
    let finder = DateFinder::with_config(bounded()).with_parser(Box::new(Nineties));
    assert_eq!(finder.find(html).unwrap(), Some("1996-07-01".to_string()));
}

#[test]
fn test_idempotence() {
    let first = find_date_with_config(ARTICLE_HTML, &bounded()).unwrap();
    let second = find_date_with_config(ARTICLE_HTML, &bounded()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_validate_date_string_api() {
    let bounds = DateBounds::default();
    assert!(validate_date_string("2015-06-01", "%Y-%m-%d", &bounds));
    assert!(!validate_date_string("2155-06-01", "%Y-%m-%d", &bounds));
}
