//! Key derivation (C4): PPK v2's SHA-1 chain and PPK v3's Argon2.

use crate::error::{PpkError, Result};
use crate::ppk::Argon2Params;
use argon2::{Algorithm, Argon2, Params, Version};
use sha1::{Digest, Sha1};
use zeroize::Zeroizing;

/// AES-256 key and IV derived for a v2-encrypted payload. v2 carries no
/// separate MAC key from this path; `mac::key_for_v2` derives that on its
/// own from the same passphrase.
pub struct V2Material {
    pub key: Zeroizing<[u8; 32]>,
    pub iv: [u8; 16],
}

pub fn derive_v2(passphrase: &str) -> V2Material {
    let mut hash0 = Sha1::new();
    hash0.update(0u32.to_be_bytes());
    hash0.update(passphrase.as_bytes());
    let h0 = hash0.finalize();

    let mut hash1 = Sha1::new();
    hash1.update(1u32.to_be_bytes());
    hash1.update(passphrase.as_bytes());
    let h1 = hash1.finalize();

    let mut key = [0u8; 32];
    key[0..20].copy_from_slice(&h0);
    key[20..32].copy_from_slice(&h1[0..12]);

    V2Material {
        key: Zeroizing::new(key),
        iv: [0u8; 16],
    }
}

/// Key, IV, and MAC key derived from Argon2 for a v3-encrypted payload.
pub struct V3Material {
    pub key: [u8; 32],
    pub iv: [u8; 16],
    pub mac_key: [u8; 32],
}

impl Drop for V3Material {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.key.zeroize();
        self.iv.zeroize();
        self.mac_key.zeroize();
    }
}

fn argon2_algorithm(flavor: &str) -> Result<Algorithm> {
    match flavor {
        "Argon2i" => Ok(Algorithm::Argon2i),
        "Argon2d" => Ok(Algorithm::Argon2d),
        "Argon2id" => Ok(Algorithm::Argon2id),
        other => Err(PpkError::UnsupportedArgon2 {
            flavor: other.to_string(),
        }),
    }
}

pub fn derive_v3(passphrase: &str, params: &Argon2Params) -> Result<V3Material> {
    let algorithm = argon2_algorithm(&params.flavor)?;

    if params.passes < 1 {
        return Err(PpkError::UnsupportedArgon2 {
            flavor: "passes must be >= 1".to_string(),
        });
    }
    if params.parallelism < 1 {
        return Err(PpkError::UnsupportedArgon2 {
            flavor: "parallelism must be >= 1".to_string(),
        });
    }
    if params.memory_kib < 8 * params.parallelism {
        return Err(PpkError::UnsupportedArgon2 {
            flavor: "memory must be >= 8 * parallelism KiB".to_string(),
        });
    }

    let argon_params = Params::new(
        params.memory_kib,
        params.passes,
        params.parallelism,
        Some(80),
    )
    .map_err(|_| PpkError::UnsupportedArgon2 {
        flavor: params.flavor.clone(),
    })?;

    let argon2 = Argon2::new(algorithm, Version::V0x13, argon_params);
    let mut output = [0u8; 80];
    argon2
        .hash_password_into(passphrase.as_bytes(), &params.salt, &mut output)
        .map_err(|_| PpkError::UnsupportedArgon2 {
            flavor: params.flavor.clone(),
        })?;

    let mut key = [0u8; 32];
    let mut iv = [0u8; 16];
    let mut mac_key = [0u8; 32];
    key.copy_from_slice(&output[0..32]);
    iv.copy_from_slice(&output[32..48]);
    mac_key.copy_from_slice(&output[48..80]);

    use zeroize::Zeroize;
    output.zeroize();

    Ok(V3Material { key, iv, mac_key })
}
