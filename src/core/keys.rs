//! Output key derivation for outline rows.

use crate::domain::OutlineRow;

use super::sanitize::clean;

/// Label used for rows whose module is neither a "Module" nor a "Glossary"
pub const FALLBACK_MODULE: &str = "MODULE";

/// Module label of a row, before sanitizing.
///
/// "Module 3: Intro" -> "Module 3", "Glossary ..." verbatim, anything else
/// collapses to [`FALLBACK_MODULE`].
pub fn module_label(module: &str) -> &str {
    if module.starts_with("Module") {
        module.split_once(':').map_or(module, |(head, _)| head)
    } else if module.starts_with("Glossary") {
        module
    } else {
        FALLBACK_MODULE
    }
}

/// Output key (file stem) for a row: `<module>-<page>`, each part sanitized
pub fn make_key(row: &OutlineRow, max: usize) -> String {
    format!(
        "{}-{}",
        clean(module_label(&row.module), max),
        clean(&row.page, max)
    )
}
