/// Authentication scheme accepted in the Authorization header
const BEARER_SCHEME: &str = "bearer";

/// Extract the bearer token from a raw Authorization header value.
///
/// Accepts `Bearer <token>` with a case-insensitive scheme, one or more spaces
/// between scheme and token, and optional surrounding spaces. Returns an empty
/// string when the header is absent or does not match.
pub fn extract_access_token(authorization_header: Option<&str>) -> String {
    let Some(header) = authorization_header else {
        return String::new();
    };

    let Some((scheme, rest)) = header.trim_matches(' ').split_once(' ') else {
        return String::new();
    };
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return String::new();
    }

    let token = rest.trim_start_matches(' ');
    if token.is_empty() || token.contains(' ') {
        return String::new();
    }
    token.to_string()
}
