//! Shared test utilities for command testing.

use std::sync::Arc;

use ghl_core::iostreams::TestOutput;
use ghl_gh::StubBackend;

use crate::factory::Factory;

/// A test harness with captured I/O and an injected stub backend.
#[derive(Debug)]
pub struct TestHarness {
    /// The factory configured for testing.
    pub factory: Factory,
    /// Captured stdout/stderr output.
    pub output: TestOutput,
    /// The injected backend, for call verification.
    pub backend: Arc<StubBackend>,
}

impl TestHarness {
    /// Create a harness over the given stub backend.
    pub fn with_backend(stub: StubBackend) -> Self {
        let (factory, output) = Factory::test();
        let (factory, backend) = factory.with_backend(stub);

        Self {
            factory,
            output,
            backend,
        }
    }

    /// Mark stdout as a TTY so human-facing confirmations are printed.
    #[must_use]
    pub fn tty(mut self) -> Self {
        self.factory.io.set_stdout_tty(true);
        self
    }

    /// Get captured stdout as a string.
    pub fn stdout(&self) -> String {
        self.output.stdout()
    }

    /// Get captured stderr as a string.
    pub fn stderr(&self) -> String {
        self.output.stderr()
    }
}
