//! HTML parsing and DOM access.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and querying the resulting tree with CSS selectors. Tree
//! construction itself is delegated to `scraper`; the date finder only needs
//! a queryable view plus the raw markup string.
//!
//! # Example
//!
//! ```rust
//! use tempora_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="entry">Posted on 2019-06-12</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let entries = doc.select("p.entry").unwrap();
//! assert_eq!(entries.len(), 1);
//! ```

use scraper::{Html, Selector};

use crate::{Result, TemporaError};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors and reading text content. The original markup string
/// is kept alongside the tree so that whole-page regex scans operate on the
/// bytes the caller actually supplied, not a re-serialization.
///
/// # Example
///
/// ```rust
/// use tempora_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
    raw: String,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Arguments
    ///
    /// * `html` - The HTML content to parse
    ///
    /// # Example
    ///
    /// ```rust
    /// use tempora_core::parse::Document;
    ///
    /// let html = "<html><body><h1>Title</h1></body></html>";
    /// let doc = Document::parse(html).unwrap();
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let parsed = Html::parse_document(html);
        Ok(Self { html: parsed, raw: html.to_string() })
    }

    /// Gets the raw markup the document was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Arguments
    ///
    /// * `selector` - A CSS selector string (e.g., "p.content", "#main", "time[datetime]")
    ///
    /// # Errors
    ///
    /// Returns [`TemporaError::HtmlParse`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tempora_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| TemporaError::HtmlParse(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the title of the document.
    ///
    /// Returns the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }
}

/// A wrapper around scraper's ElementRef for easier DOM access.
///
/// Element represents a single node in the HTML document tree and provides
/// methods for accessing its attributes and text content.
///
/// # Example
///
/// ```rust
/// use tempora_core::parse::Document;
///
/// let html = r#"<time datetime="2019-06-12">June 12th</time>"#;
/// let doc = Document::parse(html).unwrap();
/// let time = &doc.select("time").unwrap()[0];
///
/// assert_eq!(time.text(), "June 12th");
/// assert_eq!(time.attr("datetime"), Some("2019-06-12"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text of the element's direct child text nodes only.
    ///
    /// Unlike [`Element::text`], text inside nested elements is not
    /// included. Each contiguous text node becomes one entry.
    pub fn direct_texts(&self) -> Vec<String> {
        self.element
            .children()
            .filter_map(|child| child.value().as_text().map(|t| t.text.to_string()))
            .collect()
    }

    /// Gets the value of an attribute.
    ///
    /// # Arguments
    ///
    /// * `name` - The attribute name (e.g., "datetime", "content", "class")
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
        </head>
        <body>
            <h1>Heading</h1>
            <p class="content">Paragraph 1</p>
            <p class="content">Paragraph 2 <span>nested</span> tail</p>
            <time datetime="2018-02-06">February 6th</time>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.title(), Some("Test Page".to_string()));
    }

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let elements = doc.select("p.content").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph 1");
    }

    #[test]
    fn test_element_attributes() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let elements = doc.select("time").unwrap();

        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].attr("datetime"), Some("2018-02-06"));
        assert_eq!(elements[0].text(), "February 6th");
    }

    #[test]
    fn test_direct_texts_skip_nested() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let elements = doc.select("p.content").unwrap();
        let chunks = elements[1].direct_texts();

        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].contains("Paragraph 2"));
        assert!(chunks[1].contains("tail"));
        assert!(!chunks.iter().any(|c| c.contains("nested")));
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(TemporaError::HtmlParse(_))));
    }

    #[test]
    fn test_raw_markup_preserved() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert!(doc.raw().contains("February 6th"));
    }
}
