use std::path::{Path, PathBuf};

use pocodec::{Error, Formatter, PoFormatter, TranslationCatalog, WriteOptions};

use crate::import::{infer_language, load_or_create_catalog, parse_encoding};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub catalog: String,
    pub output: String,
    pub lang: Option<String>,
    pub tags: Vec<String>,
    pub include_untagged: bool,
    pub encoding: Option<String>,
    pub fallback_to_base: bool,
}

/// An existing directory as output means the default file inside it.
fn resolve_output_path(formatter: &PoFormatter, output: &str) -> PathBuf {
    let path = Path::new(output);
    if path.is_dir() {
        path.join(formatter.default_file_name())
    } else {
        path.to_path_buf()
    }
}

/// Picks the language to export: the explicit flag, then the file name,
/// then the catalog's base language.
fn resolve_export_language<C: TranslationCatalog + ?Sized>(
    formatter: &PoFormatter,
    catalog: &C,
    output: &Path,
    lang: Option<&str>,
) -> Result<String, String> {
    if let Some(lang) = lang {
        return Ok(lang.to_string());
    }
    if let Some(lang) = infer_language(formatter, output) {
        return Ok(lang);
    }
    catalog.base_language().map(str::to_string).ok_or_else(|| {
        Error::InvalidCatalog("catalog has no languages; specify --lang".to_string()).to_string()
    })
}

pub fn run_export_command(opts: ExportOptions) -> Result<(), String> {
    if !Path::new(&opts.catalog).is_file() {
        return Err(format!("Catalog file does not exist: {}", opts.catalog));
    }
    let catalog = load_or_create_catalog(&opts.catalog)?;

    let mut write_options = WriteOptions::new()
        .with_tags(opts.tags.iter().map(|tag| tag.trim()))
        .with_untagged(opts.include_untagged)
        .with_fallback_to_base(opts.fallback_to_base);
    if let Some(encoding) = parse_encoding(opts.encoding.as_deref())? {
        write_options = write_options.with_output_encoding(encoding);
    }
    let formatter = PoFormatter::new().with_write_options(write_options);

    let output = resolve_output_path(&formatter, &opts.output);
    let language = resolve_export_language(&formatter, &catalog, &output, opts.lang.as_deref())?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }
    formatter
        .write(&catalog, &output, &language)
        .map_err(|e| format!("Failed to write '{}': {}", output.display(), e))?;

    println!("✅ Exported '{}' to {}", language, output.display());
    Ok(())
}
