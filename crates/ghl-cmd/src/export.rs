//! `gh-label export` command.

use std::fs::File;

use anyhow::{Context, Result};
use clap::Args;

use ghl_gh::label::write_labels;

use crate::cmdutil::resolve_format;

/// Export labels from the repository to a file, or stdout if `<path>` is
/// `-`.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Destination path, or "-" for stdout.
    #[arg(value_name = "PATH")]
    path: String,

    /// Format of the output. One of: csv, json. The default is the file
    /// extension.
    #[arg(long)]
    format: Option<String>,
}

impl ExportArgs {
    /// Run the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is unsupported, the labels cannot be
    /// listed, or the destination cannot be written.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let format = resolve_format(&self.path, self.format.as_deref())?;

        let client = factory.label_client()?;
        let labels = client
            .list_labels("")
            .await
            .context("failed to list labels")?;

        if self.path == "-" {
            let mut buf = Vec::new();
            write_labels(&labels, format, &mut buf).context("failed to write labels")?;
            factory.io.write_out_raw(&buf);
        } else {
            let file = File::create(&self.path)
                .with_context(|| format!("failed to create file {:?}", self.path))?;
            write_labels(&labels, format, file).context("failed to write labels")?;
        }

        Ok(())
    }
}
