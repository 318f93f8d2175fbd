// Single-byte text encoding for fixed-width tag fields

use encoding_rs::WINDOWS_1252;

/// Byte written for characters the single-byte charset cannot represent.
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Encode text as one byte per character.
///
/// Characters outside the charset become `?`, so the output length always
/// equals the number of characters in `text`.
pub fn encode_single_byte(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let (bytes, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if had_errors || bytes.len() != 1 {
            out.push(REPLACEMENT_BYTE);
        } else {
            out.push(bytes[0]);
        }
    }
    out
}

/// Decode single-byte text.
pub fn decode_single_byte(data: &[u8]) -> String {
    WINDOWS_1252.decode_without_bom_handling(data).0.into_owned()
}

/// Encode `text` into a field of exactly `width` bytes: truncated to `width`
/// characters, right-padded with spaces.
pub fn fixed_width(text: &str, width: usize) -> Vec<u8> {
    let truncated: String = text.chars().take(width).collect();
    let mut bytes = encode_single_byte(&truncated);
    bytes.resize(width, b' ');
    bytes
}

/// Decode a fixed-width field, stripping trailing null and space padding.
pub fn trim_field(data: &[u8]) -> String {
    decode_single_byte(data)
        .trim_end_matches(['\0', ' '])
        .to_string()
}
