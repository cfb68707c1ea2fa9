//! Small text and time helpers shared by config, auth and the CLI.

/// Trimmed text, or `None` when nothing is left.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

pub fn is_http_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}

/// Seconds since the Unix epoch.
pub fn unix_timestamp_now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_becomes_none() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some(" \t ".to_string())), None);
        assert_eq!(
            normalize_text_option(Some("  portfolio ".to_string())),
            Some("portfolio".to_string())
        );
    }

    #[test]
    fn only_http_schemes_count_as_urls() {
        assert!(is_http_url("https://hyscop.com"));
        assert!(is_http_url("http://localhost:54321"));
        assert!(!is_http_url("mailto:hello@hyscop.com"));
        assert!(!is_http_url("hyscop.com"));
    }
}
