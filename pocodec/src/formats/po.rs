//! Support for gettext-style `.po` files.
//!
//! Only the subset needed to carry one language of a catalog is handled:
//! `#.` comments, `msgid`/`msgstr` pairs (optionally split over several
//! quoted lines) and, on output, section markers plus a base-translation
//! annotation. Plural forms, `msgctxt` and flags are not supported.

use std::{
    io::{BufRead, BufReader, Write},
    path::Path,
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    catalog::{TranslationCatalog, ingest},
    encoding::{LineReader, TextEncoding, open_lines},
    error::Error,
    options::{ReadOptions, WriteOptions},
    parser::for_each_unit,
    serializer::write_catalog,
    traits::Formatter,
};

lazy_static! {
    static ref PO_FILE_REGEX: Regex = Regex::new(r"^.+\.po$").unwrap();
    static ref LANGUAGE_REGEX: Regex = Regex::new(r"(..)\.po$").unwrap();
}

pub const FORMAT_NAME: &str = "po";
pub const EXTENSION: &str = ".po";
pub const DEFAULT_FILE_NAME: &str = "strings.po";

/// Reads and writes one language of a catalog as a PO file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoFormatter {
    pub read_options: ReadOptions,
    pub write_options: WriteOptions,
}

impl PoFormatter {
    /// Creates a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read_options(mut self, read_options: ReadOptions) -> Self {
        self.read_options = read_options;
        self
    }

    pub fn with_write_options(mut self, write_options: WriteOptions) -> Self {
        self.write_options = write_options;
        self
    }

    fn ingest_lines<C, R>(
        &self,
        catalog: &mut C,
        lines: LineReader<R>,
        language: &str,
    ) -> Result<(), Error>
    where
        C: TranslationCatalog + ?Sized,
        R: BufRead,
    {
        let encoding = lines.encoding();
        let mut count = 0usize;
        for_each_unit(lines, self.read_options.consume_comments, |unit| {
            ingest(&mut *catalog, &unit, language);
            count += 1;
        })?;
        tracing::debug!(%language, %encoding, units = count, "read PO records");
        Ok(())
    }
}

impl Formatter for PoFormatter {
    fn format_name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn extension(&self) -> &'static str {
        EXTENSION
    }

    fn default_file_name(&self) -> &'static str {
        DEFAULT_FILE_NAME
    }

    /// True iff some entry of the directory is named `*.po`.
    fn can_handle_directory<P: AsRef<Path>>(&self, path: P) -> Result<bool, Error> {
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if entry
                .file_name()
                .to_str()
                .is_some_and(|name| PO_FILE_REGEX.is_match(name))
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns the two characters before `.po` in the first path component
    /// ending that way, e.g. `de` for `locale/de.po`.
    ///
    /// # Example
    /// ```rust
    /// use pocodec::{PoFormatter, traits::Formatter};
    /// let formatter = PoFormatter::new();
    /// assert_eq!(formatter.determine_language_given_path("locale/de.po"), Some("de".to_string()));
    /// assert_eq!(formatter.determine_language_given_path("locale/strings.txt"), None);
    /// ```
    fn determine_language_given_path<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        path.as_ref().components().find_map(|component| {
            let segment = component.as_os_str().to_str()?;
            LANGUAGE_REGEX
                .captures(segment)
                .map(|captures| captures[1].to_string())
        })
    }

    fn read_from_reader<C, R>(
        &self,
        catalog: &mut C,
        mut reader: R,
        language: &str,
    ) -> Result<(), Error>
    where
        C: TranslationCatalog + ?Sized,
        R: BufRead,
    {
        let encoding = match self.read_options.encoding {
            Some(encoding) => encoding,
            None => TextEncoding::detect_from_reader(&mut reader)?,
        };
        self.ingest_lines(catalog, LineReader::new(reader, encoding), language)
    }

    /// Resolves the codec from the read options or the file's first bytes,
    /// then reads it line by line.
    fn read<C, P>(&self, catalog: &mut C, path: P, language: &str) -> Result<(), Error>
    where
        C: TranslationCatalog + ?Sized,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let encoding = TextEncoding::resolve(path, self.read_options.encoding)?;
        tracing::debug!(path = %path.display(), %encoding, "reading PO file");
        self.ingest_lines(catalog, open_lines(path, encoding)?, language)
    }

    fn write_to_writer<C, W>(&self, catalog: &C, writer: W, language: &str) -> Result<(), Error>
    where
        C: TranslationCatalog + ?Sized,
        W: Write,
    {
        tracing::debug!(
            %language,
            encoding = %self.write_options.output_encoding,
            "writing PO records"
        );
        write_catalog(catalog, language, &self.write_options, writer)
    }
}

/// Reads `language` from PO text held in memory.
pub fn read_str<C>(catalog: &mut C, content: &str, language: &str) -> Result<(), Error>
where
    C: TranslationCatalog + ?Sized,
{
    PoFormatter::new().read_from_reader(catalog, BufReader::new(content.as_bytes()), language)
}
