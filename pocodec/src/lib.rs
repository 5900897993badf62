#![forbid(unsafe_code)]
//! Gettext-style PO import/export for multilingual string catalogs.
//!
//! A [`StringsCatalog`] holds ordered sections of rows, each row carrying a
//! key, an optional comment, tags and one translation per language. The
//! [`PoFormatter`] reads one language of a catalog from a `.po` file and
//! writes one language back out.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pocodec::{PoFormatter, StringsCatalog, traits::Formatter};
//!
//! let mut catalog = StringsCatalog::load_from_file("strings.json")?;
//! let formatter = PoFormatter::new();
//!
//! // Import French translations
//! formatter.read(&mut catalog, "locale/fr.po", "fr")?;
//!
//! // Export German, falling back to the base language where untranslated
//! formatter.write(&catalog, "locale/de.po", "de")?;
//! # Ok::<(), pocodec::Error>(())
//! ```
//!
//! # Reading
//!
//! Input may be UTF-8, UTF-16LE or UTF-16BE. The codec is detected from the
//! first bytes of the file unless set in [`ReadOptions`]. Lines that are not
//! a `#.` comment, a `msgid`, a `msgstr` or a quoted continuation are
//! ignored, and records lacking a key or a value are dropped.
//!
//! # Writing
//!
//! Rows are written in catalog order, grouped under a marker comment per
//! named section. [`WriteOptions`] selects rows by tag and sets the output
//! codec.

pub mod catalog;
pub mod encoding;
pub mod error;
pub mod escape;
pub mod formats;
pub mod options;
pub mod parser;
pub mod serializer;
pub mod traits;

// Re-export most used types for easy consumption
pub use crate::{
    catalog::{Row, Section, StringsCatalog, TranslationCatalog, ingest},
    encoding::TextEncoding,
    error::Error,
    formats::PoFormatter,
    options::{ReadOptions, WriteOptions},
    parser::{ParsedUnit, ParserState, RecordParser},
    traits::Formatter,
};
