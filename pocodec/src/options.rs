//! Options controlling how PO files are read into and written from a catalog.

use crate::encoding::TextEncoding;

/// Read behavior options for [`crate::PoFormatter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Whether `#.` comments are captured and attached to rows.
    pub consume_comments: bool,
    /// Codec to decode with. Detected from the file when `None`.
    pub encoding: Option<TextEncoding>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            consume_comments: true,
            encoding: None,
        }
    }
}

impl ReadOptions {
    /// Creates default read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables comment capture.
    pub fn with_consume_comments(mut self, consume_comments: bool) -> Self {
        self.consume_comments = consume_comments;
        self
    }

    /// Forces a codec instead of detecting it.
    pub fn with_encoding(mut self, encoding: Option<TextEncoding>) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Write behavior options for [`crate::PoFormatter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Only rows carrying at least one of these tags are written.
    /// An empty list disables tag filtering.
    pub tags: Vec<String>,
    /// Whether rows without tags pass a non-empty tag filter.
    pub include_untagged: bool,
    /// Codec of the written file.
    pub output_encoding: TextEncoding,
    /// Substitute the base language's text when the target language has no
    /// translation for a row. When disabled such rows are omitted.
    pub fallback_to_base: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            include_untagged: false,
            output_encoding: TextEncoding::Utf8,
            fallback_to_base: true,
        }
    }
}

impl WriteOptions {
    /// Creates default write options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tags a row must match.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Includes/excludes untagged rows.
    pub fn with_untagged(mut self, include_untagged: bool) -> Self {
        self.include_untagged = include_untagged;
        self
    }

    /// Sets the output codec.
    pub fn with_output_encoding(mut self, output_encoding: TextEncoding) -> Self {
        self.output_encoding = output_encoding;
        self
    }

    /// Enables/disables base-language fallback.
    pub fn with_fallback_to_base(mut self, fallback_to_base: bool) -> Self {
        self.fallback_to_base = fallback_to_base;
        self
    }
}
