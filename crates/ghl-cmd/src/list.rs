//! `gh-label list` command.

use anyhow::{Context, Result};
use clap::Args;

use ghl_core::ios_println;
use ghl_core::table::TablePrinter;
use ghl_core::text;

/// List labels matching an optional substring in the name or description.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Substring to match against label names or descriptions.
    #[arg(value_name = "SUBSTRING")]
    label: Option<String>,
}

impl ListArgs {
    /// Run the list command.
    ///
    /// # Errors
    ///
    /// Returns an error if the labels cannot be listed.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let client = factory.label_client()?;

        let labels = client
            .list_labels(self.label.as_deref().unwrap_or_default())
            .await
            .context("failed to list labels")?;

        let ios = &factory.io;
        let cs = ios.color_scheme();

        if ios.is_stdout_tty() {
            ios_println!(ios, "Showing {} labels\n", labels.len());
        }

        let mut tp = TablePrinter::new(ios);
        for label in &labels {
            let (color, description) = if ios.is_stdout_tty() {
                (
                    format!("#{}", label.color),
                    text::truncate(&label.description, 50),
                )
            } else {
                (label.color.clone(), label.description.clone())
            };

            tp.add_row(vec![
                cs.hex(&label.color, &label.name),
                color,
                cs.gray(&description),
            ]);
        }

        if !tp.is_empty() {
            ios_println!(ios, "{}", tp.render());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ghl_gh::StubBackend;

    use super::*;

    use crate::test_helpers::TestHarness;

    const PAGE: &str = r#"{"data":{"repository":{"labels":{"nodes":[{"name":"bug","color":"d73a4a","description":"Something isn't working"},{"name":"service","color":"a2eeef"}],"pageInfo":{"hasNextPage":false,"endCursor":"c"}}}}}"#;

    #[tokio::test]
    async fn test_should_list_labels_as_plain_rows() {
        let h = TestHarness::with_backend(StubBackend::new().with_stdout(PAGE));

        let args = ListArgs { label: None };
        args.run(&h.factory).await.unwrap();

        let out = h.stdout();
        assert!(out.contains("bug\td73a4a\tSomething isn't working"));
        assert!(out.contains("service\ta2eeef\t"));
        assert!(!out.contains("Showing"));
        assert_eq!(h.backend.calls(), ["list "]);
    }

    #[tokio::test]
    async fn test_should_show_count_and_prefixed_colors_on_tty() {
        let h = TestHarness::with_backend(StubBackend::new().with_stdout(PAGE)).tty();

        let args = ListArgs { label: None };
        args.run(&h.factory).await.unwrap();

        let out = h.stdout();
        assert!(out.contains("Showing 2 labels"));
        assert!(out.contains("#d73a4a"));
    }

    #[tokio::test]
    async fn test_should_pass_substring_filter() {
        let h = TestHarness::with_backend(StubBackend::new().with_stdout(PAGE));

        let args = ListArgs {
            label: Some("service".into()),
        };
        args.run(&h.factory).await.unwrap();

        assert_eq!(h.backend.calls(), ["list service"]);
    }

    #[tokio::test]
    async fn test_should_print_nothing_for_empty_result() {
        let empty = r#"{"data":{"repository":{"labels":{"nodes":[],"pageInfo":{"hasNextPage":false,"endCursor":"c"}}}}}"#;
        let h = TestHarness::with_backend(StubBackend::new().with_stdout(empty));

        let args = ListArgs { label: None };
        args.run(&h.factory).await.unwrap();

        assert!(h.stdout().is_empty());
    }

    #[tokio::test]
    async fn test_should_surface_remote_failure() {
        let h = TestHarness::with_backend(StubBackend::new().with_error("HTTP 502: Bad Gateway"));

        let args = ListArgs { label: None };
        let err = args.run(&h.factory).await.unwrap_err();
        assert!(format!("{err:#}").contains("failed to list labels"));
    }
}
