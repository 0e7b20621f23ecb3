//! Redirect URL scheme normalization.

/// Ensures a redirect target carries an explicit scheme.
///
/// Stored rule and base URLs may be schemeless (`merchant.de/a`); a redirect
/// to such a value would be interpreted by clients as a relative path.
/// Schemeless URLs are prefixed with `https://`; URLs that already carry
/// `http://` or `https://` pass through unchanged.
pub fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}
