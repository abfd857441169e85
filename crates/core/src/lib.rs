//! Tempora extracts a publication or last-modification date from an HTML
//! document, given only the raw markup and optionally its source URL.
//!
//! Extraction runs a fixed cascade of scanners over structured metadata,
//! URLs, free text, and the raw markup, short-circuiting on the first
//! trustworthy hit. Conflicting candidates are settled by frequency- and
//! recency-based voting, and every result is checked against a configurable
//! plausibility window. Not finding a date is a legitimate outcome, not an
//! error.
//!
//! # Example
//!
//! ```rust
//! use tempora_core::find_date;
//!
//! let html = "<html><body><p>© The Web Association 2013.</p></body></html>";
//! assert_eq!(find_date(html).unwrap(), Some("2013-01-01".to_string()));
//! ```

mod cache;
mod candidates;
pub mod error;
mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod finder;
pub mod parse;
mod patterns;
mod search;
pub mod textparse;
pub mod validate;

pub use error::{Result, TemporaError};
#[cfg(feature = "fetch")]
pub use fetch::{fetch_file, fetch_stdin, fetch_url, FetchConfig};
pub use finder::{find_date, find_date_with_config, DateFinder, FinderConfig, FinderConfigBuilder};
pub use parse::Document;
pub use textparse::NaturalDateParser;
pub use validate::{convert_date, output_format_validator, validate_date, validate_date_string, DateBounds};
