//! Hex helpers shared by the cursor and tests.

use crate::Error;

/// Converts bytes to a lowercase hexadecimal string (no prefix).
pub fn hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push(nibble_to_char(byte >> 4));
        hex.push(nibble_to_char(byte & 0x0f));
    }
    hex
}

/// Converts a hexadecimal string to bytes.
///
/// An optional `0x` prefix is stripped. An odd number of digits is read as if
/// a leading `0` were present, so `"abc"` decodes to `[0x0a, 0xbc]`.
pub fn from_hex(hex: &str) -> Result<Vec<u8>, Error> {
    let digits = hex.strip_prefix("0x").unwrap_or(hex).as_bytes();
    let mut out = Vec::with_capacity(digits.len().div_ceil(2));
    let (head, pairs) = digits.split_at(digits.len() % 2);
    if let [lo] = head {
        out.push(char_to_nibble(*lo)?);
    }
    for pair in pairs.chunks_exact(2) {
        out.push((char_to_nibble(pair[0])? << 4) | char_to_nibble(pair[1])?);
    }
    Ok(out)
}

const fn nibble_to_char(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        _ => (b'a' + nibble - 10) as char,
    }
}

fn char_to_nibble(c: u8) -> Result<u8, Error> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(Error::InvalidHex),
    }
}
