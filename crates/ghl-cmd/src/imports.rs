//! `gh-label import` command.

use std::fs::File;

use anyhow::{Context, Result};
use clap::Args;

use ghl_core::{ios_eprintln, ios_println};
use ghl_gh::label::read_labels;

use crate::cmdutil::resolve_format;

/// Import labels into the repository from a file, or stdin if `<path>` is
/// `-`.
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Source path, or "-" for stdin.
    #[arg(value_name = "PATH")]
    path: String,

    /// Format of the input to parse. One of: csv, json. The default is the
    /// file extension.
    #[arg(long)]
    format: Option<String>,
}

impl ImportArgs {
    /// Run the import command.
    ///
    /// Labels are imported strictly in file order, one remote call per
    /// label. A label that fails is reported and skipped; the command only
    /// fails when no label imports successfully.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is unsupported, the source cannot be
    /// read, or every label fails to import.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let format = resolve_format(&self.path, self.format.as_deref())?;

        let labels = if self.path == "-" {
            read_labels(format, std::io::stdin().lock())
        } else {
            let file = File::open(&self.path)
                .with_context(|| format!("failed to open file {:?}", self.path))?;
            read_labels(format, file)
        }
        .context("failed to read labels")?;

        let ios = &factory.io;
        if ios.is_stdout_tty() {
            ios_println!(
                ios,
                "Importing {} label(s) from {:?}\n",
                labels.len(),
                self.path,
            );
        }

        let client = factory.label_client()?;

        let mut successes = 0u32;
        let mut failures = 0u32;
        for label in &labels {
            match client.create_or_update_label(label).await {
                Ok(imported) => {
                    tracing::debug!(name = %imported.name, "imported label");
                    successes += 1;
                }
                Err(e) => {
                    failures += 1;
                    ios_eprintln!(ios, "Failed to import label {:?}: {e}", label.name);
                }
            }
        }

        ios_println!(
            ios,
            "Successfully imported {successes}, failed to import {failures} label(s)",
        );

        if successes == 0 {
            anyhow::bail!("failed to import all labels");
        }

        Ok(())
    }
}
