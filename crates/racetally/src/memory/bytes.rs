//! Fixed-width legacy string decoding.
//!
//! Every in-memory string in the target (player names, the map slug) is a
//! fixed-size buffer: windows-1251 bytes, zero-terminated, garbage after the
//! terminator. One decode rule covers both widths.

use encoding_rs::WINDOWS_1251;

use crate::error::{Error, Result};

/// Decode a fixed-width windows-1251 buffer, truncating at the first zero
/// byte. Bytes past the terminator are ignored; if there is no terminator the
/// whole buffer is decoded.
///
/// Any byte with no assignment in the real code page fails the decode
/// outright rather than producing a stand-in character. The WHATWG index
/// behind `encoding_rs` assigns all 256 bytes, mapping the code page's holes
/// (0x98) to C1 controls, so unmapped bytes are caught by rejecting decoded
/// characters in the C1 range.
pub fn decode_windows_1251(buf: &[u8]) -> Result<String> {
    let len = memchr::memchr(0, buf).unwrap_or(buf.len());
    let (decoded, _, _) = WINDOWS_1251.decode(&buf[..len]);
    if decoded.chars().any(|c| ('\u{80}'..='\u{9F}').contains(&c)) {
        return Err(Error::Encoding(format!(
            "invalid windows-1251 byte sequence in {:02x?}",
            &buf[..len]
        )));
    }
    Ok(decoded.into_owned())
}
