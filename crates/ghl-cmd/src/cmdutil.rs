//! Command utility helpers shared by export and import.

use anyhow::{Context, Result};

use ghl_gh::LabelFormat;

/// Resolve the import/export format from an explicit flag or the file
/// extension. Fails before any I/O occurs.
///
/// # Errors
///
/// Returns an error for an unrecognized format, or when `<path>` is `-`
/// and no `--format` was given.
pub(crate) fn resolve_format(path: &str, flag: Option<&str>) -> Result<LabelFormat> {
    if let Some(flag) = flag {
        return Ok(LabelFormat::parse(flag)?);
    }

    if path == "-" {
        anyhow::bail!("--format is required when <path> is \"-\"");
    }

    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    LabelFormat::parse(ext).with_context(|| format!("{path:?} has an unsupported format"))
}
