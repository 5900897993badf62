//! CLI library for testing purposes

pub mod detect;
pub mod export;
pub mod import;

pub use detect::run_detect_command;
pub use export::{ExportOptions, run_export_command};
pub use import::{ImportOptions, run_import_command};
