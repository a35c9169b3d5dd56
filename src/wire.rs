//! Shared helpers for writing SSH wire-format fields: `u32` length-prefixed
//! strings and byte strings. Mirrors the framing `reader::WireReader` reads.

/// Appends a length-prefixed byte string to `buf`.
pub fn put_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    buf.extend((data.len() as u32).to_be_bytes());
    buf.extend(data);
}

/// Appends a length-prefixed UTF-8 string to `buf`.
pub fn put_string(buf: &mut Vec<u8>, s: &str) {
    put_bytes(buf, s.as_bytes());
}

/// Appends an unsigned big-endian integer as an SSH mpint: a leading zero
/// byte is inserted iff the high bit of the most-significant byte is set,
/// so the value is never misread as negative. A representation that is
/// all zero bytes (or empty) encodes as the zero mpint (length 0).
pub fn put_mpint_unsigned(buf: &mut Vec<u8>, value: &[u8]) {
    let trimmed = {
        let mut i = 0;
        while i < value.len() && value[i] == 0 {
            i += 1;
        }
        &value[i..]
    };
    if trimmed.is_empty() {
        buf.extend(0u32.to_be_bytes());
        return;
    }
    let mut mpint = Vec::with_capacity(trimmed.len() + 1);
    if trimmed[0] & 0x80 != 0 {
        mpint.push(0);
    }
    mpint.extend(trimmed);
    put_bytes(buf, &mpint);
}
