//! Error types for gh invocation and label parsing.

/// Errors from gh invocation, label parsing, and the import/export codec.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GhError {
    /// The gh binary was not found in PATH.
    #[error("cannot find gh; is it installed?")]
    NotFound,

    /// gh exited with a non-zero status; carries the captured stderr text.
    #[error("gh returned error: {message}")]
    CommandFailed {
        /// Error text from gh's stderr, surfaced verbatim.
        message: String,
        /// Process exit code, if available.
        exit_code: Option<i32>,
    },

    /// I/O error from the subprocess or a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A payload from gh or an import file failed to decode.
    #[error("failed to read labels; error: {source}, data: {data}")]
    Deserialize {
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
        /// The offending payload text.
        data: String,
    },

    /// A CSV record had the wrong number of fields.
    #[error("expected {expected} label fields, got {got}")]
    MalformedRecord {
        /// Required field count.
        expected: usize,
        /// Observed field count.
        got: usize,
    },

    /// An unrecognized import/export format.
    #[error("unsupported format {0:?}, expected one of: csv, json")]
    UnsupportedFormat(String),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON read/write error from an import/export file.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_display_not_found() {
        let err = GhError::NotFound;
        assert!(err.to_string().contains("cannot find gh"));
    }

    #[test]
    fn test_should_surface_stderr_verbatim() {
        let err = GhError::CommandFailed {
            message: "HTTP 404: Not Found (https://api.github.com/repos/x/y/labels)".to_string(),
            exit_code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("gh returned error"));
        assert!(msg.contains("HTTP 404"));
    }

    #[test]
    fn test_should_display_malformed_record() {
        let err = GhError::MalformedRecord {
            expected: 4,
            got: 2,
        };
        assert_eq!(err.to_string(), "expected 4 label fields, got 2");
    }

    #[test]
    fn test_should_display_unsupported_format() {
        let err = GhError::UnsupportedFormat("yaml".to_string());
        let msg = err.to_string();
        assert!(msg.contains("yaml"));
        assert!(msg.contains("csv"));
        assert!(msg.contains("json"));
    }

    #[test]
    fn test_should_include_offending_payload_in_deserialize_error() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = GhError::Deserialize {
            source,
            data: "not json".to_string(),
        };
        assert!(err.to_string().contains("not json"));
    }

    #[test]
    fn test_should_convert_io_error() {
        let io_err = std::io::Error::other("boom");
        let err: GhError = io_err.into();
        assert!(matches!(err, GhError::Io(_)));
    }
}
