use crate::error::ValidationError;
use url::Url;

/// Returns `true` when `candidate` is an absolute URL with a scheme and a host.
///
/// This is a purely syntactic check, nothing is resolved or fetched.
pub fn validate_url(candidate: &str) -> bool {
    check_url(candidate).is_ok()
}

/// Parses `candidate` as an absolute URL, reporting why it was rejected.
pub fn check_url(candidate: &str) -> Result<Url, ValidationError> {
    if candidate.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    let url = Url::parse(candidate).map_err(|e| ValidationError::Malformed(e.to_string()))?;

    // `cannot-be-a-base` urls such as `mailto:` parse fine but carry no host
    match url.host_str() {
        Some(host) if !host.is_empty() && !url.scheme().is_empty() => Ok(url),
        _ => Err(ValidationError::MissingHost(candidate.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_urls() {
        assert!(validate_url("https://example.com"));
        assert!(validate_url("http://example.com/path?q=1#frag"));
        assert!(validate_url("https://sub.example.co.uk:8443/a/b"));
        assert!(validate_url("ftp://files.example.com"));
        assert!(validate_url("http://127.0.0.1:3000"));
    }

    #[test]
    fn rejects_relative_or_bare_strings() {
        assert!(!validate_url("not-a-url"));
        assert!(!validate_url("example.com"));
        assert!(!validate_url("/relative/path"));
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(check_url(""), Err(ValidationError::Empty));
        assert_eq!(check_url("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn rejects_urls_without_host() {
        assert!(matches!(
            check_url("mailto:someone@example.com"),
            Err(ValidationError::MissingHost(_))
        ));
        assert!(!validate_url("file:///etc/hosts"));
        assert!(!validate_url("https://"));
    }

    #[test]
    fn parse_errors_are_malformed() {
        assert!(matches!(
            check_url("not-a-url"),
            Err(ValidationError::Malformed(_))
        ));
    }
}
