//! Payload decryption (C6): AES-256-CBC, no padding. PPK always pads the
//! plaintext private blob to a multiple of 16 bytes itself before encrypting
//! (see `ppk::PpkRecord::private_blob` docs), so there is never a PKCS#7
//! trailer to strip.

use crate::error::{PpkError, Result};
use aes::Aes256;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};

type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Decrypts `ciphertext` in place given a 32-byte key and 16-byte IV.
/// `ciphertext.len()` must be a multiple of 16. PPK payloads always are,
/// so a non-multiple indicates a corrupt or truncated file.
pub fn decrypt_aes256_cbc_no_padding(key: &[u8; 32], iv: &[u8; 16], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.len() % 16 != 0 {
        return Err(PpkError::BufferUnderrun);
    }
    let mut buf = ciphertext.to_vec();
    let decryptor = Aes256CbcDec::new(key.into(), iv.into());
    decryptor
        .decrypt_padded_mut::<cbc::cipher::block_padding::NoPadding>(&mut buf)
        .map_err(|_| PpkError::BufferUnderrun)?;
    Ok(buf)
}

/// Returns `Ok(())` if `name` names an encryption scheme this crate can
/// decrypt, `Err(UnsupportedEncryption)` otherwise. PPK only ever names
/// `"none"` or `"aes256-cbc"`.
pub fn require_supported_encryption(name: &str) -> Result<()> {
    match name {
        "none" | "aes256-cbc" => Ok(()),
        other => Err(PpkError::UnsupportedEncryption {
            name: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbc::cipher::{BlockEncryptMut, KeyIvInit as _};

    fn encrypt(key: &[u8; 32], iv: &[u8; 16], plaintext: &[u8]) -> Vec<u8> {
        type Enc = cbc::Encryptor<Aes256>;
        let mut buf = plaintext.to_vec();
        let enc = Enc::new(key.into(), iv.into());
        enc.encrypt_padded_mut::<cbc::cipher::block_padding::NoPadding>(&mut buf, plaintext.len())
            .unwrap()
            .to_vec()
    }

    #[test]
    fn roundtrips_a_multiple_of_16_byte_payload() {
        let key = [0x11u8; 32];
        let iv = [0x22u8; 16];
        let plaintext = b"sixteen-bytes-!!another-block!!";
        assert_eq!(plaintext.len() % 16, 0);
        let ct = encrypt(&key, &iv, plaintext);
        let pt = decrypt_aes256_cbc_no_padding(&key, &iv, &ct).unwrap();
        assert_eq!(pt, plaintext);
    }

    #[test]
    fn wrong_key_produces_different_plaintext_not_an_error() {
        let key = [0x11u8; 32];
        let iv = [0x22u8; 16];
        let plaintext = b"sixteen-bytes-!!another-block!!";
        let ct = encrypt(&key, &iv, plaintext);
        let wrong_key = [0x33u8; 32];
        let pt = decrypt_aes256_cbc_no_padding(&wrong_key, &iv, &ct).unwrap();
        assert_ne!(pt, plaintext);
    }

    #[test]
    fn non_multiple_of_block_size_is_rejected() {
        let key = [0u8; 32];
        let iv = [0u8; 16];
        let err = decrypt_aes256_cbc_no_padding(&key, &iv, &[1, 2, 3]).unwrap_err();
        assert_eq!(err, PpkError::BufferUnderrun);
    }

    #[test]
    fn none_and_aes256_cbc_are_supported_everything_else_is_not() {
        assert!(require_supported_encryption("none").is_ok());
        assert!(require_supported_encryption("aes256-cbc").is_ok());
        assert!(matches!(
            require_supported_encryption("aes128-cbc"),
            Err(PpkError::UnsupportedEncryption { .. })
        ));
    }
}
