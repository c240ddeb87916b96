//! The label record and its CSV/JSON codec.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::errors::GhError;

const LABEL_FIELDS: usize = 4;

// These must remain in column order.
const HEADERS: [&str; LABEL_FIELDS] = ["name", "color", "description", "url"];

/// A repository label.
///
/// `description` and `url` may be empty; both are omitted from JSON output
/// when empty. `url` is returned by the remote system and is informational
/// only, it is never sent back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label name, unique within a repository.
    pub name: String,
    /// 6 hexadecimal digits without `#` prefix.
    pub color: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Read-only reference to the label's API location.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// A label update request; an empty `new_name` means no rename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditLabel {
    /// The label to update, identified by `label.name`.
    pub label: Label,
    /// New name for the label, if renaming.
    pub new_name: String,
}

/// Import/export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFormat {
    /// Comma-separated values with a `name,color,description,url` header.
    Csv,
    /// A JSON array of label objects.
    Json,
}

impl LabelFormat {
    /// Parse a format name or file extension, case-insensitive, with an
    /// optional leading `.`.
    ///
    /// # Errors
    ///
    /// Returns [`GhError::UnsupportedFormat`] for anything but csv/json.
    pub fn parse(s: &str) -> Result<Self, GhError> {
        let normalized = s.strip_prefix('.').unwrap_or(s).to_ascii_lowercase();
        match normalized.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(GhError::UnsupportedFormat(normalized)),
        }
    }

    /// The canonical format name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize labels to the given sink.
///
/// CSV output starts with the header row; JSON output is a 2-space indented
/// array with empty `description`/`url` keys omitted.
///
/// # Errors
///
/// Returns an error if the sink cannot be written.
pub fn write_labels<W: Write>(
    labels: &[Label],
    format: LabelFormat,
    mut w: W,
) -> Result<(), GhError> {
    match format {
        LabelFormat::Csv => {
            let mut csv = csv::Writer::from_writer(w);
            csv.write_record(HEADERS)?;
            for label in labels {
                csv.write_record([&label.name, &label.color, &label.description, &label.url])?;
            }
            csv.flush()?;
            Ok(())
        }
        LabelFormat::Json => {
            serde_json::to_writer_pretty(&mut w, labels)?;
            w.write_all(b"\n")?;
            Ok(())
        }
    }
}

/// Deserialize labels from the given source; the inverse of [`write_labels`].
///
/// A CSV row equal to the header is skipped so an exported file re-imports
/// cleanly.
///
/// # Errors
///
/// Returns [`GhError::MalformedRecord`] for a CSV row without exactly
/// 4 fields, or a decode error for malformed CSV/JSON.
pub fn read_labels<R: Read>(format: LabelFormat, r: R) -> Result<Vec<Label>, GhError> {
    match format {
        LabelFormat::Csv => {
            let mut csv = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .trim(csv::Trim::All)
                .from_reader(r);

            let mut labels = Vec::new();
            for result in csv.records() {
                let record = result?;

                if record.iter().eq(HEADERS) {
                    continue;
                }

                if record.len() != LABEL_FIELDS {
                    return Err(GhError::MalformedRecord {
                        expected: LABEL_FIELDS,
                        got: record.len(),
                    });
                }

                labels.push(Label {
                    name: record[0].to_string(),
                    color: record[1].to_string(),
                    description: record[2].to_string(),
                    url: record[3].to_string(),
                });
            }

            Ok(labels)
        }
        LabelFormat::Json => Ok(serde_json::from_reader(r)?),
    }
}
