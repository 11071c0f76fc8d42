use crate::error::ApiError;

const MIN_CODE_LENGTH: usize = 6;
const MAX_CODE_LENGTH: usize = 8;

/// Checks that the target is an absolute http(s) URL with a host part.
pub fn validate_url(url: &str) -> Result<(), ApiError> {
    let Some((scheme, rest)) = url.split_once("://") else {
        return Err(ApiError::InvalidUrl);
    };

    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(ApiError::InvalidUrl);
    }

    // The host is everything up to the first path, query, or fragment
    // delimiter; it must not be empty.
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() {
        return Err(ApiError::InvalidUrl);
    }

    Ok(())
}

/// Checks that a caller-supplied code is 6-8 alphanumeric characters.
pub fn validate_code(code: &str) -> Result<(), ApiError> {
    let length_ok = (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len());
    if !length_ok || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::InvalidCode);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_urls() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?q=1").is_ok());
        assert!(validate_url("HTTPS://example.com").is_ok());
    }

    #[test]
    fn invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("example.com").is_err());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("https://").is_err());
    }

    #[test]
    fn urls_without_a_host_are_rejected() {
        assert!(validate_url("http:///path").is_err());
        assert!(validate_url("https://?q=1").is_err());
        assert!(validate_url("https://#frag").is_err());
    }

    #[test]
    fn valid_codes() {
        assert!(validate_code("Abc123").is_ok());
        assert!(validate_code("abcdefgh").is_ok());
        assert!(validate_code("1234567").is_ok());
    }

    #[test]
    fn invalid_codes() {
        assert!(validate_code("").is_err());
        assert!(validate_code("abc12").is_err());
        assert!(validate_code("abcdefghi").is_err());
        assert!(validate_code("abc-123").is_err());
        assert!(validate_code("abc 12").is_err());
    }
}
