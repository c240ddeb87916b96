//! `gh-label edit` command.

use anyhow::{Context, Result};
use clap::Args;

use ghl_core::ios_println;
use ghl_core::{colors, text};
use ghl_gh::{EditLabel, Label};

/// Edit a label in the repository.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Label name to edit.
    #[arg(value_name = "NAME")]
    name: String,

    /// The color of the label with or without "#" prefix.
    #[arg(short, long)]
    color: Option<String>,

    /// Description of the label.
    #[arg(short, long)]
    description: Option<String>,

    /// Rename the label to the given new name.
    #[arg(long)]
    new_name: Option<String>,
}

impl EditArgs {
    /// Run the edit command.
    ///
    /// # Errors
    ///
    /// Returns an error if the color is malformed or the label cannot be
    /// updated.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let color = match self.color.as_deref() {
            Some(c) => colors::validate_color(c).context("invalid flag \"color\"")?,
            None => String::new(),
        };

        let client = factory.label_client()?;
        let edit = EditLabel {
            label: Label {
                name: self.name.clone(),
                color,
                description: self.description.clone().unwrap_or_default(),
                ..Label::default()
            },
            new_name: self.new_name.clone().unwrap_or_default(),
        };

        let updated = client
            .update_label(&edit)
            .await
            .context("failed to edit label")?;

        let ios = &factory.io;
        if ios.is_stdout_tty() {
            if edit.label.name == updated.name {
                ios_println!(ios, "Updated label '{}'\n", updated.name);
            } else {
                ios_println!(
                    ios,
                    "Renamed label '{}' to '{}'\n",
                    edit.label.name,
                    updated.name,
                );
            }
        }

        let url = text::api_url_to_web(&updated.url).unwrap_or_else(|| updated.url.clone());
        ios_println!(ios, "{url}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ghl_gh::StubBackend;

    use super::*;

    use crate::test_helpers::TestHarness;

    #[tokio::test]
    async fn test_should_update_label() {
        let stored = r#"{"name":"feedback","color":"c046ff","description":"User feedback","url":"https://api.github.com/repos/o/r/labels/feedback"}"#;
        let h = TestHarness::with_backend(StubBackend::new().with_stdout(stored)).tty();

        let args = EditArgs {
            name: "feedback".into(),
            color: Some("c046ff".into()),
            description: Some("User feedback".into()),
            new_name: None,
        };
        args.run(&h.factory).await.unwrap();

        let out = h.stdout();
        assert!(out.contains("Updated label 'feedback'"));
        assert!(out.contains("https://github.com/o/r/labels/feedback"));
        assert_eq!(h.backend.calls(), ["update feedback"]);
    }

    #[tokio::test]
    async fn test_should_report_rename() {
        let stored = r#"{"name":"feedback","color":"c046ff","url":"https://api.github.com/repos/o/r/labels/feedback"}"#;
        let h = TestHarness::with_backend(StubBackend::new().with_stdout(stored)).tty();

        let args = EditArgs {
            name: "general".into(),
            color: None,
            description: None,
            new_name: Some("feedback".into()),
        };
        args.run(&h.factory).await.unwrap();

        let out = h.stdout();
        assert!(out.contains("Renamed label 'general' to 'feedback'"));
    }

    #[tokio::test]
    async fn test_should_reject_malformed_color() {
        let h = TestHarness::with_backend(StubBackend::new());

        let args = EditArgs {
            name: "general".into(),
            color: Some("#12345".into()),
            description: None,
            new_name: None,
        };
        assert!(args.run(&h.factory).await.is_err());
        assert!(h.backend.calls().is_empty());
    }
}
