//! Target repository resolution.
//!
//! A repository is selected by the `--repo OWNER/REPO` flag, falling back to
//! the `GH_REPO` environment variable, falling back to the `:owner`/`:repo`
//! placeholders that `gh api` resolves against the current directory's
//! repository.

use std::fmt;

/// Environment variable consulted when no `--repo` override is given.
pub const GH_REPO_ENV: &str = "GH_REPO";

/// A GitHub repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repo {
    owner: String,
    name: String,
}

impl Repo {
    /// Create a new repo from owner and name.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// The placeholder repo, resolved by `gh api` from the current directory.
    pub fn placeholder() -> Self {
        Self::new(":owner", ":repo")
    }

    /// Resolve the target repository from an optional `--repo` override.
    ///
    /// An empty or absent override falls back to `GH_REPO`, then to the
    /// placeholder.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-empty value is not in `OWNER/REPO` format.
    pub fn resolve(repo_override: Option<&str>) -> Result<Self, RepoParseError> {
        Self::resolve_with_env(repo_override, std::env::var(GH_REPO_ENV).ok().as_deref())
    }

    /// Resolve with an explicit environment fallback value.
    ///
    /// Split out from [`Repo::resolve`] so tests can exercise the fallback
    /// chain without mutating the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected value is not in `OWNER/REPO` format.
    pub fn resolve_with_env(
        repo_override: Option<&str>,
        env_value: Option<&str>,
    ) -> Result<Self, RepoParseError> {
        let value = match repo_override {
            Some(v) if !v.is_empty() => v,
            _ => env_value.unwrap_or_default(),
        };

        if value.is_empty() {
            return Ok(Self::placeholder());
        }

        Self::from_full_name(value)
    }

    /// Parse an "OWNER/REPO" string.
    ///
    /// # Errors
    ///
    /// Returns an error unless the string splits on `/` into exactly two
    /// non-empty parts.
    pub fn from_full_name(nwo: &str) -> Result<Self, RepoParseError> {
        let parts: Vec<&str> = nwo.split('/').collect();
        match parts.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self::new(*owner, *name)),
            _ => Err(RepoParseError::InvalidFormat(nwo.to_string())),
        }
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full name as "OWNER/REPO".
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Errors from parsing repository references.
#[derive(Debug, thiserror::Error)]
pub enum RepoParseError {
    /// String does not match expected format.
    #[error("expected the \"OWNER/REPO\" format, got {0:?}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("heaths/gh-label", "heaths", "gh-label")]
    #[case("owner/repo-name", "owner", "repo-name")]
    #[case("my-org/my.repo", "my-org", "my.repo")]
    fn test_should_parse_owner_repo(#[case] input: &str, #[case] owner: &str, #[case] name: &str) {
        let repo = Repo::from_full_name(input).unwrap();
        assert_eq!(repo.owner(), owner);
        assert_eq!(repo.name(), name);
    }

    #[rstest]
    #[case("just-a-name")]
    #[case("/repo")]
    #[case("owner/")]
    #[case("/")]
    #[case("//")]
    #[case("host/owner/repo")]
    fn test_should_reject_invalid_format(#[case] input: &str) {
        assert!(Repo::from_full_name(input).is_err());
    }

    #[test]
    fn test_should_name_offending_input_in_error() {
        let err = Repo::from_full_name("bad").unwrap_err();
        assert!(err.to_string().contains("bad"));
        assert!(err.to_string().contains("OWNER/REPO"));
    }

    #[test]
    fn test_should_resolve_explicit_override() {
        let repo = Repo::resolve_with_env(Some("owner/repo"), Some("env-owner/env-repo")).unwrap();
        assert_eq!(repo.full_name(), "owner/repo");
    }

    #[test]
    fn test_should_fall_back_to_env_when_override_empty() {
        let repo = Repo::resolve_with_env(Some(""), Some("env-owner/env-repo")).unwrap();
        assert_eq!(repo.full_name(), "env-owner/env-repo");
    }

    #[test]
    fn test_should_fall_back_to_env_when_override_absent() {
        let repo = Repo::resolve_with_env(None, Some("env-owner/env-repo")).unwrap();
        assert_eq!(repo.full_name(), "env-owner/env-repo");
    }

    #[test]
    fn test_should_fall_back_to_placeholder_when_unset() {
        let repo = Repo::resolve_with_env(None, None).unwrap();
        assert_eq!(repo.owner(), ":owner");
        assert_eq!(repo.name(), ":repo");
    }

    #[test]
    fn test_should_reject_invalid_env_value() {
        assert!(Repo::resolve_with_env(None, Some("not-a-repo")).is_err());
    }

    #[test]
    fn test_should_display_as_full_name() {
        let repo = Repo::new("heaths", "gh-label");
        assert_eq!(repo.to_string(), "heaths/gh-label");
    }

    // --- property-based tests ---

    mod prop {
        use proptest::prelude::*;

        use super::super::*;

        proptest! {
            #[test]
            fn roundtrip_parse_full_name(
                owner in "[a-zA-Z][a-zA-Z0-9-]{0,15}",
                name in "[a-zA-Z][a-zA-Z0-9._-]{0,15}",
            ) {
                let input = format!("{owner}/{name}");
                let repo = Repo::from_full_name(&input)?;
                prop_assert_eq!(repo.full_name(), input);
            }

            #[test]
            fn never_parses_without_exactly_one_slash(s in "[a-zA-Z0-9._-]{0,20}") {
                // No slash at all can never be a valid OWNER/REPO.
                prop_assert!(Repo::from_full_name(&s).is_err());
            }
        }
    }
}
