//! Factory for shared command dependencies.
//!
//! Provides the I/O streams, the resolved target repository, and the label
//! client to every command. Supports test mode with an injected stub backend
//! so commands never depend on process execution directly.

use std::sync::Arc;

use async_trait::async_trait;

use ghl_core::Repo;
use ghl_core::iostreams::{IOStreams, TestOutput};
use ghl_gh::{Client, EditLabel, GhCli, GhError, Label, LabelBackend, StubBackend};

/// Shared factory providing dependencies to all commands.
pub struct Factory {
    /// Application version.
    pub app_version: String,
    /// I/O streams.
    pub io: IOStreams,
    repo: Repo,
    backend_override: Option<Arc<StubBackend>>,
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("app_version", &self.app_version)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

impl Factory {
    /// Create a new factory for the given target repository.
    pub fn new(app_version: String, repo: Repo) -> Self {
        Self {
            app_version,
            io: IOStreams::system(),
            repo,
            backend_override: None,
        }
    }

    /// Create a test factory with captured I/O and a placeholder repository.
    ///
    /// Returns the factory and a `TestOutput` for reading captured
    /// stdout/stderr.
    pub fn test() -> (Self, TestOutput) {
        let (io, output) = IOStreams::test_with_output();

        let factory = Self {
            app_version: "test".to_string(),
            io,
            repo: Repo::placeholder(),
            backend_override: None,
        };

        (factory, output)
    }

    /// Inject a stub backend and return the shared handle for verification.
    #[must_use]
    pub fn with_backend(mut self, stub: StubBackend) -> (Self, Arc<StubBackend>) {
        let stub = Arc::new(stub);
        self.backend_override = Some(stub.clone());
        (self, stub)
    }

    /// The target repository.
    pub fn repo(&self) -> &Repo {
        &self.repo
    }

    /// Build a label client for the target repository.
    ///
    /// In test mode with an injected backend, the client wraps the stub.
    ///
    /// # Errors
    ///
    /// Returns an error if gh is not installed.
    pub fn label_client(&self) -> anyhow::Result<Client> {
        if let Some(ref stub) = self.backend_override {
            return Ok(Client::new(Box::new(StubBackendWrapper(stub.clone()))));
        }

        let cli = GhCli::new(&self.repo)?;
        Ok(Client::new(Box::new(cli)))
    }
}

/// Wrapper to use `Arc<StubBackend>` as `Box<dyn LabelBackend>`.
#[derive(Debug)]
struct StubBackendWrapper(Arc<StubBackend>);

#[async_trait]
impl LabelBackend for StubBackendWrapper {
    async fn create_label(&self, label: &Label) -> Result<Vec<u8>, GhError> {
        self.0.create_label(label).await
    }

    async fn list_labels(&self, substr: &str) -> Result<Vec<u8>, GhError> {
        self.0.list_labels(substr).await
    }

    async fn update_label(&self, edit: &EditLabel) -> Result<Vec<u8>, GhError> {
        self.0.update_label(edit).await
    }

    async fn delete_label(&self, name: &str) -> Result<(), GhError> {
        self.0.delete_label(name).await
    }
}
