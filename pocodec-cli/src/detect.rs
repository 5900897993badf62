use std::path::Path;

use pocodec::{Formatter, PoFormatter};

use crate::import::infer_language;

/// Reports whether `dir` holds PO files and, if so, the languages their
/// names imply.
pub fn run_detect_command(dir: &str) -> Result<bool, String> {
    let formatter = PoFormatter::new();
    let handled = formatter
        .can_handle_directory(dir)
        .map_err(|e| format!("Failed to inspect '{}': {}", dir, e))?;
    if !handled {
        println!("❌ No {} files in {}", formatter.format_name(), dir);
        return Ok(false);
    }

    println!("✅ {} contains {} files", dir, formatter.format_name());
    for language in detected_languages(&formatter, Path::new(dir))? {
        println!("  {}", language);
    }
    Ok(true)
}

fn detected_languages(formatter: &PoFormatter, dir: &Path) -> Result<Vec<String>, String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory '{}': {}", dir.display(), e))?;
    let mut languages: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| infer_language(formatter, Path::new(&entry.file_name())))
        .collect();
    languages.sort();
    languages.dedup();
    Ok(languages)
}
