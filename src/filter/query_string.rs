use url::form_urlencoded;

use super::error::FilterError;

/// Decode a raw `application/x-www-form-urlencoded` query string into ordered pairs.
///
/// Pairs keep their order of appearance, repeated keys included; callers decide
/// which occurrence wins. A leading `?` is ignored and empty segments are skipped.
pub fn parse_query_string(raw: &str) -> Result<Vec<(String, String)>, FilterError> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    check_encoding(raw)?;

    let mut pairs = Vec::new();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        if key.is_empty() {
            return Err(FilterError::MalformedQueryString("empty parameter name".to_string()));
        }
        pairs.push((key.into_owned(), value.into_owned()));
    }
    Ok(pairs)
}

// form_urlencoded decodes leniently; reject what it would silently repair.
fn check_encoding(raw: &str) -> Result<(), FilterError> {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let octet = bytes
                .get(i + 1..i + 3)
                .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| {
                    FilterError::MalformedQueryString(format!("invalid percent escape at offset {}", i))
                })?;
            decoded.push(octet);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded)
        .map(|_| ())
        .map_err(|_| FilterError::MalformedQueryString("decoded text is not valid UTF-8".to_string()))
}
