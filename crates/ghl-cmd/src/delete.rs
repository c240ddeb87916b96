//! `gh-label delete` command.

use anyhow::{Context, Result};
use clap::Args;

use ghl_core::ios_println;

/// Delete a label from the repository.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Label name to delete.
    #[arg(value_name = "NAME")]
    name: String,
}

impl DeleteArgs {
    /// Run the delete command.
    ///
    /// # Errors
    ///
    /// Returns an error if the label cannot be deleted.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let client = factory.label_client()?;

        client
            .delete_label(&self.name)
            .await
            .context("failed to delete label")?;

        let ios = &factory.io;
        if ios.is_stdout_tty() {
            ios_println!(ios, "Deleted label '{}'", self.name);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ghl_gh::StubBackend;

    use super::*;

    use crate::test_helpers::TestHarness;

    #[tokio::test]
    async fn test_should_delete_label() {
        let h = TestHarness::with_backend(StubBackend::new()).tty();

        let args = DeleteArgs { name: "p1".into() };
        args.run(&h.factory).await.unwrap();

        assert!(h.stdout().contains("Deleted label 'p1'"));
        assert_eq!(h.backend.calls(), ["delete p1"]);
    }

    #[tokio::test]
    async fn test_should_stay_quiet_when_not_tty() {
        let h = TestHarness::with_backend(StubBackend::new());

        let args = DeleteArgs { name: "p1".into() };
        args.run(&h.factory).await.unwrap();

        assert!(h.stdout().is_empty());
    }

    #[tokio::test]
    async fn test_should_surface_remote_failure() {
        let h = TestHarness::with_backend(StubBackend::new().with_error("HTTP 404: Not Found"));

        let args = DeleteArgs { name: "p1".into() };
        let err = args.run(&h.factory).await.unwrap_err();
        assert!(format!("{err:#}").contains("HTTP 404"));
    }
}
