//! Traits for format-agnostic reading and writing of string catalogs.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{catalog::TranslationCatalog, error::Error};

/// A localization file format that imports one language of a catalog from a
/// file, and exports one language of a catalog to a file.
///
/// # Example
///
/// ```rust,no_run
/// use pocodec::{PoFormatter, StringsCatalog, traits::Formatter};
///
/// let formatter = PoFormatter::new();
/// let mut catalog = StringsCatalog::new(["en"]);
/// formatter.read(&mut catalog, "locale/fr.po", "fr")?;
/// formatter.write(&catalog, "locale/de.po", "de")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Formatter {
    /// Short name of the format, e.g. `"po"`.
    fn format_name(&self) -> &'static str;

    /// File extension including the leading dot.
    fn extension(&self) -> &'static str;

    /// File name used when only a directory is given.
    fn default_file_name(&self) -> &'static str;

    /// Whether `path` is a directory holding files of this format.
    fn can_handle_directory<P: AsRef<Path>>(&self, path: P) -> Result<bool, Error>;

    /// Infers the language code of a file from its path.
    fn determine_language_given_path<P: AsRef<Path>>(&self, path: P) -> Option<String>;

    /// Reads `language` from any buffered reader into `catalog`.
    fn read_from_reader<C, R>(
        &self,
        catalog: &mut C,
        reader: R,
        language: &str,
    ) -> Result<(), Error>
    where
        C: TranslationCatalog + ?Sized,
        R: BufRead;

    /// Reads `language` from the file at `path` into `catalog`.
    fn read<C, P>(&self, catalog: &mut C, path: P, language: &str) -> Result<(), Error>
    where
        C: TranslationCatalog + ?Sized,
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        self.read_from_reader(catalog, BufReader::new(file), language)
    }

    /// Writes `language` of `catalog` to any writer.
    fn write_to_writer<C, W>(&self, catalog: &C, writer: W, language: &str) -> Result<(), Error>
    where
        C: TranslationCatalog + ?Sized,
        W: Write;

    /// Writes `language` of `catalog` to the file at `path`.
    fn write<C, P>(&self, catalog: &C, path: P, language: &str) -> Result<(), Error>
    where
        C: TranslationCatalog + ?Sized,
        P: AsRef<Path>,
    {
        let file = File::create(path)?;
        self.write_to_writer(catalog, BufWriter::new(file), language)
    }
}
