//! Data URI helpers
//!
//! Photos travel between the providers as plain base64 strings. The UI on the
//! web runtime renders them as `data:<mime>;base64,<payload>` URIs.

use base64::{engine::general_purpose, Engine as _};

/// Guess a mime type from a file extension, defaulting to JPEG
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" | "heif" => "image/heic",
        _ => "image/jpeg",
    }
}

/// Wrap an already encoded base64 payload into a data URI
pub fn data_url_from_base64(mime: &str, payload: &str) -> String {
    format!("data:{};base64,{}", mime, payload)
}

/// Encode raw bytes as a data URI
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    data_url_from_base64(mime, &general_purpose::STANDARD.encode(bytes))
}

/// Base64 payload of a data URI; other strings are returned unchanged
pub fn data_url_payload(s: &str) -> &str {
    if !s.starts_with("data:") {
        return s;
    }
    match s.find("base64,") {
        Some(idx) => &s[idx + "base64,".len()..],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_data_url() {
        assert_eq!(to_data_url("image/jpeg", b"f"), "data:image/jpeg;base64,Zg==");
    }

    #[test]
    fn test_payload_strips_header_only_for_data_urls() {
        assert_eq!(data_url_payload("data:image/png;base64,Zg=="), "Zg==");
        assert_eq!(data_url_payload("Zg=="), "Zg==");
        assert_eq!(data_url_payload("data:text/plain,hello"), "data:text/plain,hello");
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for_extension("JPG"), "image/jpeg");
        assert_eq!(mime_for_extension(".webp"), "image/webp");
        assert_eq!(mime_for_extension("raw"), "image/jpeg");
    }
}
