use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Canonical watch URL prefix for building deep links
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Pattern capturing the 11-character video ID after `v=` or the last `/`,
/// bounded by `?`, `&`, `/`, or end of input.
fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})(?:[?&/]|$)")
            .expect("hard-coded video ID pattern compiles")
    })
}

/// The 11-character token uniquely naming a remote video.
///
/// Derived once per pipeline run and immutable afterward. Inputs that don't
/// match the extraction pattern pass through verbatim (see [`resolve`]), so a
/// `VideoId` is not guaranteed to be well-formed; providers reject bad IDs at
/// their own boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video
    pub fn watch_url(&self) -> String {
        format!("{}{}", WATCH_URL_BASE, self.0)
    }

    /// Whether the token has the shape of a real video ID
    pub fn looks_valid(&self) -> bool {
        self.0.len() == 11
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract a video ID from free-form input (bare ID or full URL).
///
/// A single pattern match is applied; on a hit the captured group is returned.
/// Inputs with no match pass through unchanged, byte for byte, so downstream
/// providers see the original token and fail with their own errors. A warning
/// is logged when the fallthrough doesn't look like a valid ID. Callers own
/// intake normalization such as whitespace trimming.
pub fn resolve(input: &str) -> VideoId {
    if let Some(captures) = id_pattern().captures(input) {
        return VideoId(captures[1].to_string());
    }

    let id = VideoId(input.to_string());
    if !id.looks_valid() {
        tracing::warn!(
            "Reference {:?} doesn't look like a video ID; passing through as-is",
            input
        );
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_watch_url() {
        let id = resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_resolve_watch_url_with_extra_params() {
        let id = resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s&list=PL1");
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_resolve_short_url() {
        let id = resolve("https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_resolve_short_url_with_query() {
        let id = resolve("https://youtu.be/dQw4w9WgXcQ?si=abc123");
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_resolve_embed_url() {
        let id = resolve("https://www.youtube.com/embed/dQw4w9WgXcQ/");
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_resolve_bare_id_identity() {
        let id = resolve("dQw4w9WgXcQ");
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
        assert!(id.looks_valid());
    }

    #[test]
    fn test_resolve_no_match_identity() {
        let id = resolve("not a video reference at all");
        assert_eq!(id.as_str(), "not a video reference at all");
        assert!(!id.looks_valid());
    }

    #[test]
    fn test_resolve_padded_url_still_matches() {
        // The pattern match runs anywhere in the input, so leading padding
        // doesn't defeat extraction
        let id = resolve("  https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_resolve_padded_non_match_is_untouched() {
        // No normalization on the fallthrough path; intake owns trimming
        let id = resolve("  dQw4w9WgXcQ\n");
        assert_eq!(id.as_str(), "  dQw4w9WgXcQ\n");
    }

    #[test]
    fn test_watch_url() {
        let id = resolve("dQw4w9WgXcQ");
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }
}
