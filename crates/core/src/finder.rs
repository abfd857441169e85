//! Main date extraction API.
//!
//! This module provides the primary API for finding the publication or
//! modification date of an HTML document. The main entry point is the
//! [`DateFinder`] struct, along with the convenience functions
//! [`find_date`] and [`find_date_with_config`].
//!
//! # Example
//!
//! ```rust
//! use tempora_core::find_date;
//!
//! let html = "<html><body><p>The date is 5.5.2010</p></body></html>";
//! let found = find_date(html).unwrap();
//! assert_eq!(found, Some("2010-05-05".to_string()));
//! ```

use chrono::NaiveDate;
use tracing::debug;

use crate::extract::{
    canonical_url, examine_meta_elements, examine_time_elements, examine_title_elements, extract_partial_url_date,
    extract_url_date, idiosyncrasies_search, img_search, json_search, scan_free_text, timestamp_search,
};
use crate::parse::Document;
use crate::search::search_page;
use crate::textparse::{try_date_expr, NaturalDateParser};
use crate::validate::{format_date, output_format_validator, DateBounds};
use crate::Result;

/// Configuration for a date extraction call.
///
/// # Example
///
/// ```rust
/// use tempora_core::FinderConfig;
///
/// let config = FinderConfig::builder()
///     .prefer_original(true)
///     .output_format("%d %B %Y")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Enables the slow fallback stages: the free-text body scan, the
    /// whole-page pattern search, and the external parser (default: true).
    pub extensive: bool,

    /// Hunt for the original publication date instead of the most recent
    /// modification date (default: false).
    pub prefer_original: bool,

    /// strftime-style template for the returned date string. Must contain at
    /// least one `%`-directive (default: `"%Y-%m-%d"`).
    pub output_format: String,

    /// Source URL of the document, scanned for embedded dates. When absent,
    /// the document's canonical link is used instead.
    pub url: Option<String>,

    /// Lower plausibility bound; defaults to the fixed minimum year.
    pub min_date: Option<NaiveDate>,

    /// Upper plausibility bound; defaults to today.
    pub max_date: Option<NaiveDate>,

    /// Memoize text-parse results (default: true). Disabling this changes
    /// performance, never output.
    pub use_cache: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            extensive: true,
            prefer_original: false,
            output_format: "%Y-%m-%d".to_string(),
            url: None,
            min_date: None,
            max_date: None,
            use_cache: true,
        }
    }
}

impl FinderConfig {
    /// Creates a new builder for FinderConfig.
    pub fn builder() -> FinderConfigBuilder {
        FinderConfigBuilder::new()
    }

    fn bounds(&self) -> DateBounds {
        let defaults = DateBounds::default();
        DateBounds {
            earliest: self.min_date.unwrap_or(defaults.earliest),
            latest: self.max_date.unwrap_or(defaults.latest),
        }
    }
}

/// Builder for FinderConfig.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use tempora_core::FinderConfig;
///
/// let config = FinderConfig::builder()
///     .extensive(false)
///     .min_date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
///     .build();
/// ```
pub struct FinderConfigBuilder {
    config: FinderConfig,
}

impl FinderConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: FinderConfig::default() }
    }

    /// Enables or disables the slow fallback stages.
    pub fn extensive(mut self, value: bool) -> Self {
        self.config.extensive = value;
        self
    }

    /// Hunt for the original date instead of the most recent one.
    pub fn prefer_original(mut self, value: bool) -> Self {
        self.config.prefer_original = value;
        self
    }

    /// Sets the output format template.
    pub fn output_format(mut self, value: impl Into<String>) -> Self {
        self.config.output_format = value.into();
        self
    }

    /// Sets the source URL.
    pub fn url(mut self, value: impl Into<String>) -> Self {
        self.config.url = Some(value.into());
        self
    }

    /// Sets the lower plausibility bound.
    pub fn min_date(mut self, value: NaiveDate) -> Self {
        self.config.min_date = Some(value);
        self
    }

    /// Sets the upper plausibility bound.
    pub fn max_date(mut self, value: NaiveDate) -> Self {
        self.config.max_date = Some(value);
        self
    }

    /// Enables or disables the memoization cache.
    pub fn use_cache(mut self, value: bool) -> Self {
        self.config.use_cache = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> FinderConfig {
        self.config
    }
}

impl Default for FinderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared knobs threaded through every scanner of one extraction call.
pub(crate) struct ScanContext<'a> {
    pub extensive: bool,
    pub prefer_original: bool,
    pub bounds: DateBounds,
    pub external: Option<&'a dyn NaturalDateParser>,
    pub use_cache: bool,
}

impl ScanContext<'_> {
    pub(crate) fn try_date_expr(&self, text: &str) -> Option<NaiveDate> {
        try_date_expr(text, self.extensive, &self.bounds, self.external, self.use_cache)
    }
}

/// Main entry point for date extraction.
///
/// A `DateFinder` owns its configuration and, optionally, an injected
/// natural-language parser used as the slow fallback in extensive mode.
///
/// # Example
///
/// ```rust
/// use tempora_core::{DateFinder, FinderConfig};
///
/// let finder = DateFinder::with_config(FinderConfig::builder().prefer_original(true).build());
/// let html = r#"<html><head><meta property="article:published_time" content="2017-07-02"/></head></html>"#;
/// assert_eq!(finder.find(html).unwrap(), Some("2017-07-02".to_string()));
/// ```
pub struct DateFinder {
    config: FinderConfig,
    external: Option<Box<dyn NaturalDateParser>>,
}

impl DateFinder {
    /// Creates a finder with default settings.
    pub fn new() -> Self {
        Self { config: FinderConfig::default(), external: None }
    }

    /// Creates a finder with a custom configuration.
    pub fn with_config(config: FinderConfig) -> Self {
        Self { config, external: None }
    }

    /// Injects a natural-language parser consulted as the slow fallback.
    pub fn with_parser(mut self, parser: Box<dyn NaturalDateParser>) -> Self {
        self.external = Some(parser);
        self
    }

    /// Finds a date in raw HTML text.
    ///
    /// Returns `Ok(None)` when no date could be discovered; this is a valid,
    /// expected outcome for documents without one.
    ///
    /// # Errors
    ///
    /// Fails upfront with [`crate::TemporaError::InvalidFormat`] when the
    /// configured output format is unusable. No other error escapes: every
    /// heuristic failure degrades to trying the next strategy.
    pub fn find(&self, html: &str) -> Result<Option<String>> {
        output_format_validator(&self.config.output_format)?;
        let doc = Document::parse(html)?;
        self.run(&doc)
    }

    /// Finds a date in an already parsed [`Document`].
    pub fn find_in_document(&self, doc: &Document) -> Result<Option<String>> {
        output_format_validator(&self.config.output_format)?;
        self.run(doc)
    }

    fn run(&self, doc: &Document) -> Result<Option<String>> {
        let ctx = ScanContext {
            extensive: self.config.extensive,
            prefer_original: self.config.prefer_original,
            bounds: self.config.bounds(),
            external: self.external.as_deref(),
            use_cache: self.config.use_cache,
        };

        let found = self.cascade(doc, &ctx);
        found.map(|date| format_date(date, &self.config.output_format)).transpose()
    }

    /// The strategy cascade, most trustworthy source first. Each stage either
    /// produces one date and short-circuits, or hands over to the next.
    fn cascade(&self, doc: &Document, ctx: &ScanContext) -> Option<NaiveDate> {
        let html = doc.raw();
        let url = self.config.url.clone().or_else(|| canonical_url(doc));

        if let Some(url) = &url
            && let Some(date) = extract_url_date(url, ctx)
        {
            return Some(date);
        }

        if let Some(date) = examine_meta_elements(doc, ctx) {
            return Some(date);
        }

        if let Some(date) = json_search(doc, ctx) {
            return Some(date);
        }

        if let Some(date) = idiosyncrasies_search(html, ctx) {
            return Some(date);
        }

        if let Some(date) = examine_title_elements(doc, ctx) {
            return Some(date);
        }

        if let Some(date) = examine_time_elements(doc, ctx) {
            return Some(date);
        }

        if let Some(url) = &url
            && let Some(date) = extract_partial_url_date(url, ctx)
        {
            return Some(date);
        }

        if let Some(date) = timestamp_search(html, ctx) {
            return Some(date);
        }

        if let Some(date) = img_search(doc, ctx) {
            return Some(date);
        }

        if self.config.extensive {
            debug!("extensive search started");

            if let Some(date) = scan_free_text(doc, ctx) {
                return Some(date);
            }

            if let Some(date) = search_page(html, self.config.prefer_original, &ctx.bounds) {
                return Some(date);
            }
        }

        None
    }
}

impl Default for DateFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds a date in raw HTML text using the default configuration.
///
/// See [`DateFinder::find`] for the contract.
pub fn find_date(html: &str) -> Result<Option<String>> {
    DateFinder::new().find(html)
}

/// Finds a date in raw HTML text using the supplied configuration.
pub fn find_date_with_config(html: &str, config: &FinderConfig) -> Result<Option<String>> {
    DateFinder::with_config(config.clone()).find(html)
}
