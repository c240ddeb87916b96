//! Text formatting utilities.

use std::sync::LazyLock;

use regex::Regex;

static API_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^https://api\\.([^/]+)/repos/(.*)$").expect("valid api url regex"));

/// Truncate a string to a maximum display width, appending "..." if truncated.
pub fn truncate(text: &str, max_width: usize) -> String {
    if max_width < 4 {
        return text.chars().take(max_width).collect();
    }

    let char_count: usize = text.chars().count();
    if char_count <= max_width {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_width - 3).collect();
    format!("{truncated}...")
}

/// Rewrite an API resource URL to its web counterpart.
///
/// `https://api.github.com/repos/owner/repo/labels/bug` becomes
/// `https://github.com/owner/repo/labels/bug`. Returns `None` when the
/// input is not an API repos URL.
pub fn api_url_to_web(url: &str) -> Option<String> {
    let captures = API_URL_RE.captures(url)?;
    Some(format!("https://{}/{}", &captures[1], &captures[2]))
}

/// Percent-encode a string for use in URL path segments.
pub fn percent_encode(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len() * 2);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                use std::fmt::Write;
                encoded.push('%');
                let _ = write!(encoded, "{byte:02X}");
            }
        }
    }
    encoded
}
