//! `gh-label create` command.

use anyhow::{Context, Result};
use clap::Args;

use ghl_core::ios_println;
use ghl_core::{colors, text};
use ghl_gh::Label;

/// Create a label in the repository.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Label name.
    #[arg(value_name = "NAME")]
    name: String,

    /// The color of the label with or without "#" prefix. A random color is
    /// assigned if not specified.
    #[arg(short, long)]
    color: Option<String>,

    /// Description of the label.
    #[arg(short, long)]
    description: Option<String>,
}

impl CreateArgs {
    /// Run the create command.
    ///
    /// # Errors
    ///
    /// Returns an error if the color is malformed or the label cannot be
    /// created.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let color = match self.color.as_deref() {
            Some(c) => colors::validate_color(c).context("invalid flag \"color\"")?,
            None => colors::random_color(),
        };

        let client = factory.label_client()?;
        let label = Label {
            name: self.name.clone(),
            color,
            description: self.description.clone().unwrap_or_default(),
            ..Label::default()
        };

        let created = client
            .create_label(&label)
            .await
            .context("failed to create label")?;

        let ios = &factory.io;
        if ios.is_stdout_tty() {
            ios_println!(ios, "Created label '{}'\n", created.name);
        }

        let url = text::api_url_to_web(&created.url).unwrap_or_else(|| created.url.clone());
        ios_println!(ios, "{url}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ghl_gh::StubBackend;

    use super::*;

    use crate::test_helpers::TestHarness;

    const STORED: &str = r#"{"name":"p1","color":"e00808","url":"https://api.github.com/repos/heaths/gh-label/labels/p1"}"#;

    #[tokio::test]
    async fn test_should_create_label_and_print_web_url() {
        let h = TestHarness::with_backend(StubBackend::new().with_stdout(STORED)).tty();

        let args = CreateArgs {
            name: "p1".into(),
            color: Some("e00808".into()),
            description: None,
        };
        args.run(&h.factory).await.unwrap();

        let out = h.stdout();
        assert!(out.contains("Created label 'p1'"));
        assert!(out.contains("https://github.com/heaths/gh-label/labels/p1"));
        assert_eq!(h.backend.calls(), ["create p1"]);
    }

    #[tokio::test]
    async fn test_should_print_only_url_when_not_tty() {
        let h = TestHarness::with_backend(StubBackend::new().with_stdout(STORED));

        let args = CreateArgs {
            name: "p1".into(),
            color: Some("#e00808".into()),
            description: None,
        };
        args.run(&h.factory).await.unwrap();

        let out = h.stdout();
        assert!(!out.contains("Created label"));
        assert!(out.contains("https://github.com/heaths/gh-label/labels/p1"));
    }

    #[tokio::test]
    async fn test_should_reject_malformed_color() {
        let h = TestHarness::with_backend(StubBackend::new());

        let args = CreateArgs {
            name: "p1".into(),
            color: Some("red".into()),
            description: None,
        };
        let err = args.run(&h.factory).await.unwrap_err();
        assert!(err.to_string().contains("invalid flag \"color\""));
        // Validation fails before any remote call.
        assert!(h.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_should_surface_remote_failure() {
        let h = TestHarness::with_backend(StubBackend::new().with_error("HTTP 422: already_exists"));

        let args = CreateArgs {
            name: "p1".into(),
            color: None,
            description: Some("Affects more than a few users".into()),
        };
        let err = args.run(&h.factory).await.unwrap_err();
        assert!(format!("{err:#}").contains("failed to create label"));
    }
}
