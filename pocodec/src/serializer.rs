//! Serializes a catalog into PO text for one target language.

use std::io::Write;

use indoc::indoc;

use crate::{
    catalog::{Row, TranslationCatalog},
    error::Error,
    escape::escape,
    options::WriteOptions,
    parser::SECTION_MARKER,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Renders `catalog` as PO text for `language`.
///
/// Sections and rows are written in catalog order. Rows rejected by the tag
/// filter, or left without any text for `language`, are skipped.
///
/// Only `"` is escaped. A key or value holding a line break is written as
/// is and cannot be read back; such rows are logged at `warn`.
pub fn render_catalog<C>(catalog: &C, language: &str, options: &WriteOptions) -> String
where
    C: TranslationCatalog + ?Sized,
{
    let base_language = catalog.base_language();

    let mut content = format!(
        indoc! {"
            ##
             # PO Strings File
             # Generated by pocodec {}
             # Language: {}

        "},
        VERSION, language
    );

    for section in catalog.sections() {
        let mut printed_section = false;
        for row in section
            .rows
            .iter()
            .filter(|row| row.matches_tags(&options.tags, options.include_untagged))
        {
            if !printed_section {
                if !section.name.is_empty() {
                    content.push_str(&format!(
                        "#{}{} ---------#\n\n",
                        SECTION_MARKER, section.name
                    ));
                }
                printed_section = true;
            }

            if let Some(record) = render_row(row, language, base_language, options) {
                content.push_str(&record);
            }
        }
    }

    content
}

/// Renders one record followed by a blank line, or `None` when the row has
/// no text to write.
fn render_row(
    row: &Row,
    language: &str,
    base_language: Option<&str>,
    options: &WriteOptions,
) -> Option<String> {
    let base_value = base_language
        .and_then(|lang| row.translation(lang))
        .filter(|value| !value.is_empty());
    let value = row
        .translation(language)
        .filter(|value| !value.is_empty())
        .or(if options.fallback_to_base {
            base_value
        } else {
            None
        })?;

    if row.key.contains('\n') || value.contains('\n') {
        tracing::warn!(key = %row.key, "line break in PO record will not survive a re-read");
    }

    let mut record = String::new();
    if let Some(comment) = row.comment.as_deref().filter(|c| !c.is_empty()) {
        record.push_str(&format!("#. {} \n", escape(comment)));
    }
    if let Some(base_value) = base_value {
        record.push_str(&format!("# base translation: \"{}\"\n", escape(base_value)));
    }
    record.push_str(&format!("msgid \"{}\"\n", escape(&row.key)));
    record.push_str(&format!("msgstr \"{}\"\n", escape(value)));
    record.push('\n');
    Some(record)
}

/// Writes `catalog` as PO text for `language`, encoded with the output codec
/// from `options`.
///
/// Fails with [`Error::InvalidCatalog`] when the catalog has no languages.
pub fn write_catalog<C, W>(
    catalog: &C,
    language: &str,
    options: &WriteOptions,
    mut writer: W,
) -> Result<(), Error>
where
    C: TranslationCatalog + ?Sized,
    W: Write,
{
    if catalog.language_codes().is_empty() {
        return Err(Error::InvalidCatalog(format!(
            "cannot write `{}` from a catalog without languages",
            language
        )));
    }
    let content = render_catalog(catalog, language, options);
    writer.write_all(&options.output_encoding.encode(&content))?;
    writer.flush()?;
    Ok(())
}
