//! Remote label operations over the gh CLI.
//!
//! [`LabelBackend`] is the capability seam: command code only ever sees the
//! trait, so nothing above this module depends on process execution. The
//! real implementation builds `gh api` invocations; the stub serves canned
//! payloads for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::Deserialize;

use ghl_core::Repo;
use ghl_core::text::percent_encode;

use crate::errors::GhError;
use crate::exec::GhExec;
use crate::label::{EditLabel, Label};

/// GraphQL query for listing labels, filtered by a substring match against
/// name or description.
///
/// `pageInfo` must stay the last selection: response key order follows the
/// query, so every page envelope closes with the brace run that
/// [`Client::list_labels`] splits on.
const LIST_QUERY: &str = r"query ($owner: String!, $repo: String!, $label: String, $endCursor: String) {
	repository(name: $repo, owner: $owner) {
		labels(query: $label, orderBy: {field: NAME, direction: ASC}, first: 100, after: $endCursor) {
			nodes {
				name
				color
				description
				url
			}
			pageInfo {
				hasNextPage
				endCursor
			}
		}
	}
}";

/// Capability interface over the remote label store.
///
/// Each operation issues one blocking request and returns the raw response
/// bytes; parsing happens in [`Client`]. Failures are never retried.
#[async_trait]
pub trait LabelBackend: Send + Sync {
    /// Create a label, returning the raw response payload.
    async fn create_label(&self, label: &Label) -> Result<Vec<u8>, GhError>;

    /// List labels matching the substring, returning the raw concatenated
    /// page payloads.
    async fn list_labels(&self, substr: &str) -> Result<Vec<u8>, GhError>;

    /// Apply a partial update, returning the raw response payload.
    async fn update_label(&self, edit: &EditLabel) -> Result<Vec<u8>, GhError>;

    /// Delete a label; no body on success.
    async fn delete_label(&self, name: &str) -> Result<(), GhError>;
}

/// Label backend that shells out to `gh api`.
#[derive(Debug, Clone)]
pub struct GhCli {
    owner: String,
    repo: String,
    gh: GhExec,
}

impl GhCli {
    /// Create a backend bound to the given repository.
    ///
    /// # Errors
    ///
    /// Returns [`GhError::NotFound`] if gh is not installed.
    pub fn new(repo: &Repo) -> Result<Self, GhError> {
        Ok(Self {
            owner: repo.owner().to_string(),
            repo: repo.name().to_string(),
            gh: GhExec::new()?,
        })
    }

    /// Run `gh api` with the arguments prepended to every request.
    async fn run_api(&self, args: Vec<String>) -> Result<Vec<u8>, GhError> {
        let mut full_args = vec![
            "api".to_string(),
            "-H".to_string(),
            "accept:application/vnd.github.v3+json".to_string(),
        ];
        full_args.extend(args);

        self.gh.run(&full_args).await
    }
}

#[async_trait]
impl LabelBackend for GhCli {
    async fn create_label(&self, label: &Label) -> Result<Vec<u8>, GhError> {
        self.run_api(create_args(&self.owner, &self.repo, label)).await
    }

    async fn list_labels(&self, substr: &str) -> Result<Vec<u8>, GhError> {
        self.run_api(list_args(&self.owner, &self.repo, substr)).await
    }

    async fn update_label(&self, edit: &EditLabel) -> Result<Vec<u8>, GhError> {
        self.run_api(update_args(&self.owner, &self.repo, edit)).await
    }

    async fn delete_label(&self, name: &str) -> Result<(), GhError> {
        self.run_api(delete_args(&self.owner, &self.repo, name))
            .await?;
        Ok(())
    }
}

fn create_args(owner: &str, repo: &str, label: &Label) -> Vec<String> {
    let mut args = vec![
        "-F".to_string(),
        format!("owner={owner}"),
        "-F".to_string(),
        format!("repo={repo}"),
        "-F".to_string(),
        format!("name={}", label.name),
        "-f".to_string(),
        format!("color={}", label.color),
    ];

    // An empty description means "field omitted", not "field cleared".
    if !label.description.is_empty() {
        args.push("-F".to_string());
        args.push(format!("description={}", label.description));
    }

    args.push("/repos/:owner/:repo/labels".to_string());
    args
}

fn list_args(owner: &str, repo: &str, substr: &str) -> Vec<String> {
    vec![
        "graphql".to_string(),
        "--paginate".to_string(),
        "-F".to_string(),
        format!("owner={owner}"),
        "-F".to_string(),
        format!("repo={repo}"),
        "-F".to_string(),
        format!("label={substr}"),
        "-f".to_string(),
        format!("query={LIST_QUERY}"),
    ]
}

fn update_args(owner: &str, repo: &str, edit: &EditLabel) -> Vec<String> {
    let mut args = vec![
        "-X".to_string(),
        "PATCH".to_string(),
        "-F".to_string(),
        format!("owner={owner}"),
        "-F".to_string(),
        format!("repo={repo}"),
    ];

    // Partial update: only non-empty fields go into the request.
    if !edit.label.color.is_empty() {
        args.push("-f".to_string());
        args.push(format!("color={}", edit.label.color));
    }
    if !edit.label.description.is_empty() {
        args.push("-F".to_string());
        args.push(format!("description={}", edit.label.description));
    }
    if !edit.new_name.is_empty() {
        args.push("-F".to_string());
        args.push(format!("new_name={}", edit.new_name));
    }

    args.push(format!(
        "/repos/:owner/:repo/labels/{}",
        percent_encode(&edit.label.name),
    ));
    args
}

fn delete_args(owner: &str, repo: &str, name: &str) -> Vec<String> {
    vec![
        "-X".to_string(),
        "DELETE".to_string(),
        "-F".to_string(),
        format!("owner={owner}"),
        "-F".to_string(),
        format!("repo={repo}"),
        format!("/repos/:owner/:repo/labels/{}", percent_encode(name)),
    ]
}

/// In-memory backend for tests: canned stdout bytes or errors, with every
/// call recorded for verification.
#[derive(Debug, Default)]
pub struct StubBackend {
    stdout: Vec<u8>,
    error: Option<String>,
    fail_calls: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl StubBackend {
    /// Create a stub that succeeds with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these bytes from every successful call.
    #[must_use]
    pub fn with_stdout(mut self, stdout: impl Into<Vec<u8>>) -> Self {
        self.stdout = stdout.into();
        self
    }

    /// Fail every call with this error message.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Fail only the named call, e.g. `"create bug"` or `"update bug"`.
    #[must_use]
    pub fn failing_on(mut self, call: impl Into<String>) -> Self {
        self.fail_calls.push(call.into());
        self
    }

    /// The calls made so far, e.g. `["list ", "delete bug"]`.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn respond(&self, call: String) -> Result<Vec<u8>, GhError> {
        let failed = self.error.is_some() || self.fail_calls.contains(&call);

        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(call);

        if failed {
            let message = self
                .error
                .clone()
                .unwrap_or_else(|| "HTTP 422: Validation Failed".to_string());
            return Err(GhError::CommandFailed {
                message,
                exit_code: Some(1),
            });
        }

        Ok(self.stdout.clone())
    }
}

#[async_trait]
impl LabelBackend for StubBackend {
    async fn create_label(&self, label: &Label) -> Result<Vec<u8>, GhError> {
        self.respond(format!("create {}", label.name))
    }

    async fn list_labels(&self, substr: &str) -> Result<Vec<u8>, GhError> {
        self.respond(format!("list {substr}"))
    }

    async fn update_label(&self, edit: &EditLabel) -> Result<Vec<u8>, GhError> {
        self.respond(format!("update {}", edit.label.name))
    }

    async fn delete_label(&self, name: &str) -> Result<(), GhError> {
        self.respond(format!("delete {name}")).map(|_| ())
    }
}

/// Each page envelope closes with this brace run (`pageInfo` is the last
/// key at every nesting level; see [`LIST_QUERY`]).
const PAGE_TERMINATOR: &[u8] = b"}}}}}";

#[derive(Debug, Deserialize)]
struct PageEnvelope {
    data: PageData,
}

#[derive(Debug, Deserialize)]
struct PageData {
    repository: PageRepository,
}

#[derive(Debug, Deserialize)]
struct PageRepository {
    labels: PageLabels,
}

#[derive(Debug, Deserialize)]
struct PageLabels {
    nodes: Vec<Label>,
}

/// High-level label client: invokes a [`LabelBackend`] and parses its
/// payloads into [`Label`] records.
pub struct Client {
    backend: Box<dyn LabelBackend>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Client")
    }
}

impl Client {
    /// Create a client over the given backend.
    pub fn new(backend: Box<dyn LabelBackend>) -> Self {
        Self { backend }
    }

    /// Create a label and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call fails or its payload does not
    /// decode as a label.
    pub async fn create_label(&self, label: &Label) -> Result<Label, GhError> {
        let buf = self.backend.create_label(label).await?;
        decode_label(&buf)
    }

    /// Apply a partial update and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call fails or its payload does not
    /// decode as a label.
    pub async fn update_label(&self, edit: &EditLabel) -> Result<Label, GhError> {
        let buf = self.backend.update_label(edit).await?;
        decode_label(&buf)
    }

    /// Create a label, falling back to an update of the same name when the
    /// remote call is rejected (typically because the label exists).
    ///
    /// # Errors
    ///
    /// Returns an error if both the create and the fallback update fail.
    pub async fn create_or_update_label(&self, label: &Label) -> Result<Label, GhError> {
        match self.create_label(label).await {
            Ok(created) => Ok(created),
            Err(GhError::CommandFailed { .. }) => {
                let edit = EditLabel {
                    label: label.clone(),
                    new_name: String::new(),
                };
                self.update_label(&edit).await
            }
            Err(e) => Err(e),
        }
    }

    /// List labels matching the substring, in the remote's order.
    ///
    /// `gh api graphql --paginate` emits one JSON envelope per page with no
    /// enclosing array and no delimiter, so the raw output is a byte
    /// concatenation of page objects. Work around
    /// <https://github.com/cli/cli/issues/1268> by splitting after the brace
    /// run that closes each envelope and decoding every chunk on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call fails or a page payload does not
    /// decode.
    pub async fn list_labels(&self, substr: &str) -> Result<Vec<Label>, GhError> {
        let buf = self.backend.list_labels(substr).await?;

        let mut labels = Vec::new();
        for chunk in split_after(&buf, PAGE_TERMINATOR) {
            if chunk.is_empty() {
                break;
            }

            let page: PageEnvelope =
                serde_json::from_slice(chunk).map_err(|source| GhError::Deserialize {
                    source,
                    data: String::from_utf8_lossy(chunk).into_owned(),
                })?;

            labels.extend(page.data.repository.labels.nodes);
        }

        Ok(labels)
    }

    /// Delete a label by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call fails.
    pub async fn delete_label(&self, name: &str) -> Result<(), GhError> {
        self.backend.delete_label(name).await
    }
}

fn decode_label(buf: &[u8]) -> Result<Label, GhError> {
    serde_json::from_slice(buf).map_err(|source| GhError::Deserialize {
        source,
        data: String::from_utf8_lossy(buf).into_owned(),
    })
}

/// Split like Go's `bytes.SplitAfter`: every chunk keeps its trailing
/// delimiter, and the remainder after the last delimiter is the final chunk
/// (empty when the input ends with the delimiter).
fn split_after<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = haystack;

    while let Some(pos) = find_subslice(rest, needle) {
        let end = pos + needle.len();
        chunks.push(&rest[..end]);
        rest = &rest[end..];
    }

    chunks.push(rest);
    chunks
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
