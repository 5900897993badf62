//! The multilingual string catalog PO files are read into and written from.
//!
//! A catalog is an ordered list of [`Section`]s, each holding ordered
//! [`Row`]s, plus the list of language codes it covers. The first language
//! code is the base language.

use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Error, parser::ParsedUnit};

/// Read and upsert access to a catalog.
///
/// PO reading only goes through [`set_translation_for_key`] and
/// [`set_comment_for_key`]; writing only through [`language_codes`] and
/// [`sections`].
///
/// [`set_translation_for_key`]: TranslationCatalog::set_translation_for_key
/// [`set_comment_for_key`]: TranslationCatalog::set_comment_for_key
/// [`language_codes`]: TranslationCatalog::language_codes
/// [`sections`]: TranslationCatalog::sections
pub trait TranslationCatalog {
    /// All language codes, base language first.
    fn language_codes(&self) -> &[String];

    /// Sections in catalog order.
    fn sections(&self) -> &[Section];

    /// Creates the row for `key` if absent, then sets its translation for
    /// `language`.
    fn set_translation_for_key(&mut self, key: &str, language: &str, value: &str);

    /// Sets the comment of the row for `key`. Does nothing if there is no
    /// such row.
    fn set_comment_for_key(&mut self, key: &str, comment: &str);

    /// The base language, if the catalog has any language.
    fn base_language(&self) -> Option<&str> {
        self.language_codes().first().map(String::as_str)
    }
}

/// A named group of rows. The name may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Section {
    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }
}

/// One translatable unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Row {
    /// Unique key (`msgid`).
    pub key: String,

    /// Optional comment for translators.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub comment: Option<String>,

    /// Tags used to select rows on export.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub tags: Vec<String>,

    /// Map from language code to translated text.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl Row {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            comment: None,
            tags: Vec::new(),
            translations: BTreeMap::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_translation(
        mut self,
        language: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.translations.insert(language.into(), value.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// The translation for `language`, if any.
    pub fn translation(&self, language: &str) -> Option<&str> {
        self.translations.get(language).map(String::as_str)
    }

    /// The translation for `language`, or for `fallback` when `language`
    /// has none.
    pub fn translated_string_for_lang(
        &self,
        language: &str,
        fallback: Option<&str>,
    ) -> Option<&str> {
        self.translation(language)
            .or_else(|| fallback.and_then(|lang| self.translation(lang)))
    }

    /// Tag-filter predicate.
    ///
    /// With no requested tags every row passes. Otherwise a tagged row passes
    /// when it carries any requested tag, and an untagged row passes only if
    /// `include_untagged` is set.
    pub fn matches_tags(&self, tags: &[String], include_untagged: bool) -> bool {
        if tags.is_empty() {
            return true;
        }
        if self.tags.is_empty() {
            return include_untagged;
        }
        tags.iter().any(|tag| self.tags.contains(tag))
    }
}

/// The default in-memory catalog, persisted as JSON by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct StringsCatalog {
    /// Language codes, base language first.
    #[serde(default)]
    pub language_codes: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl StringsCatalog {
    /// Creates an empty catalog covering `language_codes`.
    pub fn new<I, S>(language_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            language_codes: language_codes.into_iter().map(Into::into).collect(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Registers `language` if the catalog does not cover it yet.
    pub fn add_language(&mut self, language: &str) {
        if !self.language_codes.iter().any(|l| l == language) {
            self.language_codes.push(language.to_string());
        }
    }

    pub fn find_row(&self, key: &str) -> Option<&Row> {
        self.sections
            .iter()
            .flat_map(|section| section.rows.iter())
            .find(|row| row.key == key)
    }

    pub fn find_row_mut(&mut self, key: &str) -> Option<&mut Row> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.rows.iter_mut())
            .find(|row| row.key == key)
    }

    /// Total number of rows over all sections.
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|section| section.rows.len()).sum()
    }

    /// Saves the catalog as JSON, creating parent directories as needed.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let writer = File::create(path)?;
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Loads a catalog saved with [`StringsCatalog::save_to_file`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl TranslationCatalog for StringsCatalog {
    fn language_codes(&self) -> &[String] {
        &self.language_codes
    }

    fn sections(&self) -> &[Section] {
        &self.sections
    }

    fn set_translation_for_key(&mut self, key: &str, language: &str, value: &str) {
        self.add_language(language);
        if let Some(row) = self.find_row_mut(key) {
            row.translations.insert(language.to_string(), value.to_string());
            return;
        }

        if self.sections.is_empty() {
            self.sections.push(Section::default());
        }
        if let Some(section) = self.sections.last_mut() {
            section
                .rows
                .push(Row::new(key).with_translation(language, value));
        }
    }

    fn set_comment_for_key(&mut self, key: &str, comment: &str) {
        if let Some(row) = self.find_row_mut(key) {
            row.comment = Some(comment.to_string());
        }
    }
}

/// Upserts one parsed unit into `catalog` for `language`.
///
/// Units with an empty key or value are ignored. The comment is only
/// recorded when present and non-empty.
pub fn ingest<C>(catalog: &mut C, unit: &ParsedUnit, language: &str)
where
    C: TranslationCatalog + ?Sized,
{
    if unit.key.is_empty() || unit.value.is_empty() {
        return;
    }
    catalog.set_translation_for_key(&unit.key, language, &unit.value);
    if let Some(comment) = unit.comment.as_deref().filter(|c| !c.is_empty()) {
        catalog.set_comment_for_key(&unit.key, comment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(key: &str, value: &str, comment: Option<&str>) -> ParsedUnit {
        ParsedUnit {
            key: key.to_string(),
            value: value.to_string(),
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn test_ingest_creates_row() {
        let mut catalog = StringsCatalog::new(["en"]);
        ingest(&mut catalog, &unit("greeting", "Bonjour", Some("hi")), "fr");

        let row = catalog.find_row("greeting").unwrap();
        assert_eq!(row.translation("fr"), Some("Bonjour"));
        assert_eq!(row.comment.as_deref(), Some("hi"));
        assert_eq!(catalog.language_codes, vec!["en", "fr"]);
    }

    #[test]
    fn test_ingest_is_idempotent() {
        let mut catalog = StringsCatalog::new(["en"]);
        let greeting = unit("greeting", "Hello", None);
        ingest(&mut catalog, &greeting, "en");
        ingest(&mut catalog, &greeting, "en");
        assert_eq!(catalog.row_count(), 1);
    }

    #[test]
    fn test_ingest_updates_existing_row_in_its_section() {
        let mut catalog = StringsCatalog::new(["en", "fr"]);
        catalog.add_section(
            Section::new("General").with_row(Row::new("ok").with_translation("en", "OK")),
        );
        catalog.add_section(Section::new("Other"));

        ingest(&mut catalog, &unit("ok", "D'accord", None), "fr");

        assert_eq!(catalog.row_count(), 1);
        assert_eq!(catalog.sections[0].rows[0].translation("en"), Some("OK"));
        assert_eq!(catalog.sections[0].rows[0].translation("fr"), Some("D'accord"));
    }

    #[test]
    fn test_ingest_skips_empty_key_or_value() {
        let mut catalog = StringsCatalog::new(["en"]);
        ingest(&mut catalog, &unit("", "value", None), "en");
        ingest(&mut catalog, &unit("key", "", None), "en");
        assert_eq!(catalog.row_count(), 0);
    }

    #[test]
    fn test_comment_does_not_touch_translations() {
        let mut catalog = StringsCatalog::new(["en"]);
        ingest(&mut catalog, &unit("k", "v", None), "en");
        catalog.set_comment_for_key("k", "note");
        let row = catalog.find_row("k").unwrap();
        assert_eq!(row.comment.as_deref(), Some("note"));
        assert_eq!(row.translation("en"), Some("v"));
    }

    #[test]
    fn test_translated_string_falls_back() {
        let row = Row::new("k").with_translation("en", "Hello");
        assert_eq!(row.translated_string_for_lang("fr", Some("en")), Some("Hello"));
        assert_eq!(row.translated_string_for_lang("fr", None), None);
        assert_eq!(row.translated_string_for_lang("en", Some("fr")), Some("Hello"));
    }

    #[test]
    fn test_matches_tags() {
        let tags = vec!["ios".to_string()];
        let tagged = Row::new("a").with_tags(["ios", "web"]);
        let other = Row::new("b").with_tags(["android"]);
        let untagged = Row::new("c");

        assert!(tagged.matches_tags(&tags, false));
        assert!(!other.matches_tags(&tags, true));
        assert!(!untagged.matches_tags(&tags, false));
        assert!(untagged.matches_tags(&tags, true));
        assert!(other.matches_tags(&[], false));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.json");

        let mut catalog = StringsCatalog::new(["en", "fr"]);
        catalog.add_section(
            Section::new("General").with_row(
                Row::new("greeting")
                    .with_comment("hi")
                    .with_tags(["ios"])
                    .with_translation("en", "Hello"),
            ),
        );
        catalog.save_to_file(&path).unwrap();

        let loaded = StringsCatalog::load_from_file(&path).unwrap();
        assert_eq!(loaded, catalog);
        assert_eq!(loaded.base_language(), Some("en"));
    }
}
