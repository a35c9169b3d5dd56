//! Fingerprint computation (C10): `"SHA256:" ‖ base64(SHA256(public_blob))`
//! with trailing `=` padding stripped.

use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};

pub fn compute(public_blob: &[u8]) -> String {
    let digest = Sha256::digest(public_blob);
    let encoded = STANDARD.encode(digest);
    format!("SHA256:{}", encoded.trim_end_matches('='))
}
