//! MAC verification (C5): HMAC-SHA-1 for v2, HMAC-SHA-256 for v3, both over
//! the same five-field canonical framing.

use crate::error::{PpkError, Result};
use crate::wire::put_bytes;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

fn frame(
    algorithm: &str,
    encryption: &str,
    comment: &str,
    public_blob: &[u8],
    private_blob_plaintext: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::new();
    put_bytes(&mut buf, algorithm.as_bytes());
    put_bytes(&mut buf, encryption.as_bytes());
    put_bytes(&mut buf, comment.as_bytes());
    put_bytes(&mut buf, public_blob);
    put_bytes(&mut buf, private_blob_plaintext);
    buf
}

/// The 32-byte all-zero MAC key PPK v3 uses for unencrypted files. This
/// must never be derived from an empty passphrase.
pub const V3_UNENCRYPTED_MAC_KEY: [u8; 32] = [0u8; 32];

/// v2 MAC key: `SHA1("putty-private-key-file-mac-key" ‖ passphrase)`, where
/// `passphrase` is `""` for an unencrypted file.
pub fn mac_key_v2(passphrase: &str) -> [u8; 20] {
    use sha1::Digest;
    let mut hasher = Sha1::new();
    hasher.update(b"putty-private-key-file-mac-key");
    hasher.update(passphrase.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest);
    out
}

pub fn compute_v2(
    mac_key: &[u8; 20],
    algorithm: &str,
    encryption: &str,
    comment: &str,
    public_blob: &[u8],
    private_blob_plaintext: &[u8],
) -> [u8; 20] {
    let data = frame(algorithm, encryption, comment, public_blob, private_blob_plaintext);
    let mut mac =
        <Hmac<Sha1> as Mac>::new_from_slice(mac_key).expect("HMAC accepts a key of any length");
    mac.update(&data);
    let result = mac.finalize().into_bytes();
    let mut out = [0u8; 20];
    out.copy_from_slice(&result);
    out
}

pub fn compute_v3(
    mac_key: &[u8; 32],
    algorithm: &str,
    encryption: &str,
    comment: &str,
    public_blob: &[u8],
    private_blob_plaintext: &[u8],
) -> [u8; 32] {
    let data = frame(algorithm, encryption, comment, public_blob, private_blob_plaintext);
    let mut mac =
        <Hmac<Sha256> as Mac>::new_from_slice(mac_key).expect("HMAC accepts a key of any length");
    mac.update(&data);
    let result = mac.finalize().into_bytes();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

/// Compares `computed` against the hex-encoded `mac_hex` field in constant
/// time (case-insensitively, since hex decoding is case-insensitive).
/// Any mismatch, including a `mac_hex` that fails to decode or whose byte
/// length doesn't match, surfaces as `InvalidMac`.
pub fn verify_hex(computed: &[u8], mac_hex: &str, encrypted: bool) -> Result<()> {
    let expected = hex::decode(mac_hex.trim()).map_err(|_| PpkError::InvalidMac { encrypted })?;
    if expected.len() != computed.len() {
        return Err(PpkError::InvalidMac { encrypted });
    }
    let mut diff = 0u8;
    for (a, b) in computed.iter().zip(expected.iter()) {
        diff |= a ^ b;
    }
    if diff == 0 {
        Ok(())
    } else {
        Err(PpkError::InvalidMac { encrypted })
    }
}
