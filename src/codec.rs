use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Decodes standard base64 holding UTF-8 text.
pub fn decode(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}

/// Like [`decode`], but hands back `encoded` untouched when it isn't
/// base64 text.
pub fn decode_or_raw(encoded: &str) -> String {
    decode(encoded).unwrap_or_else(|| encoded.to_owned())
}
