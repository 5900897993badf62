use std::path::Path;

use pocodec::{Error, Formatter, PoFormatter, ReadOptions, StringsCatalog, TextEncoding};

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub catalog: String,
    pub input: String,
    pub lang: Option<String>,
    pub encoding: Option<String>,
    pub consume_comments: bool,
}

/// Loads the catalog at `path`, or starts an empty one if the file does not
/// exist yet.
pub fn load_or_create_catalog(path: &str) -> Result<StringsCatalog, String> {
    if Path::new(path).exists() {
        StringsCatalog::load_from_file(path)
            .map_err(|e| format!("Failed to load catalog '{}': {}", path, e))
    } else {
        tracing::info!(%path, "catalog not found, starting empty");
        Ok(StringsCatalog::default())
    }
}

pub fn parse_encoding(label: Option<&str>) -> Result<Option<TextEncoding>, String> {
    label
        .map(|label| label.parse::<TextEncoding>().map_err(|e| e.to_string()))
        .transpose()
}

/// Infers the language of `path` from its name. The default file name
/// carries no language.
pub fn infer_language(formatter: &PoFormatter, path: &Path) -> Option<String> {
    if path
        .file_name()
        .is_some_and(|name| name == formatter.default_file_name())
    {
        return None;
    }
    formatter.determine_language_given_path(path)
}

/// Resolves the language of `path` from the explicit flag or the file name.
pub fn resolve_language(
    formatter: &PoFormatter,
    path: &str,
    lang: Option<&str>,
) -> Result<String, String> {
    match lang {
        Some(lang) => Ok(lang.to_string()),
        None => infer_language(formatter, Path::new(path))
            .ok_or_else(|| Error::UnknownLanguage(path.to_string()).to_string()),
    }
}

pub fn run_import_command(opts: ImportOptions) -> Result<(), String> {
    if !Path::new(&opts.input).is_file() {
        return Err(format!("Input file does not exist: {}", opts.input));
    }

    let read_options = ReadOptions::new()
        .with_consume_comments(opts.consume_comments)
        .with_encoding(parse_encoding(opts.encoding.as_deref())?);
    let formatter = PoFormatter::new().with_read_options(read_options);
    let language = resolve_language(&formatter, &opts.input, opts.lang.as_deref())?;

    let mut catalog = load_or_create_catalog(&opts.catalog)?;
    let rows_before = catalog.row_count();
    formatter
        .read(&mut catalog, &opts.input, &language)
        .map_err(|e| format!("Failed to read '{}': {}", opts.input, e))?;
    catalog
        .save_to_file(&opts.catalog)
        .map_err(|e| format!("Failed to save catalog '{}': {}", opts.catalog, e))?;

    println!(
        "✅ Imported '{}' from {} ({} new rows)",
        language,
        opts.input,
        catalog.row_count().saturating_sub(rows_before)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encoding() {
        assert_eq!(parse_encoding(None), Ok(None));
        assert_eq!(
            parse_encoding(Some("UTF-16LE")),
            Ok(Some(TextEncoding::Utf16Le))
        );
        assert!(parse_encoding(Some("shift_jis")).is_err());
    }

    #[test]
    fn test_resolve_language() {
        let formatter = PoFormatter::new();
        assert_eq!(
            resolve_language(&formatter, "locale/fr.po", None),
            Ok("fr".to_string())
        );
        assert_eq!(
            resolve_language(&formatter, "locale/fr.po", Some("de")),
            Ok("de".to_string())
        );
        let err = resolve_language(&formatter, "locale/fr.txt", None).unwrap_err();
        assert!(err.contains("unknown language"));
    }

    #[test]
    fn test_default_file_name_has_no_language() {
        let formatter = PoFormatter::new();
        assert_eq!(infer_language(&formatter, Path::new("out/strings.po")), None);
        assert_eq!(
            infer_language(&formatter, Path::new("out/de.po")),
            Some("de".to_string())
        );
        assert!(resolve_language(&formatter, "locale/strings.po", None).is_err());
        assert_eq!(
            resolve_language(&formatter, "locale/strings.po", Some("fr")),
            Ok("fr".to_string())
        );
    }

    #[test]
    fn test_load_or_create_missing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let catalog = load_or_create_catalog(path.to_str().unwrap()).unwrap();
        assert_eq!(catalog, StringsCatalog::default());
    }
}
