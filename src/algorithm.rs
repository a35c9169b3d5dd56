//! Algorithm decoders (C7): pull algorithm-specific key parameters out of
//! the SSH wire-format public/private blobs produced by `ppk::parse`.

use crate::error::{PpkError, Result};
use crate::reader::WireReader;
use rsa::BigUint;

/// The six key algorithms this crate understands, named as they appear on
/// the wire (`"ssh-rsa"`, `"ecdsa-sha2-nistp256"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Rsa,
    Dss,
    EcdsaP256,
    EcdsaP384,
    EcdsaP521,
    Ed25519,
}

impl KeyAlgorithm {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "ssh-rsa" => Ok(KeyAlgorithm::Rsa),
            "ssh-dss" => Ok(KeyAlgorithm::Dss),
            "ecdsa-sha2-nistp256" => Ok(KeyAlgorithm::EcdsaP256),
            "ecdsa-sha2-nistp384" => Ok(KeyAlgorithm::EcdsaP384),
            "ecdsa-sha2-nistp521" => Ok(KeyAlgorithm::EcdsaP521),
            "ssh-ed25519" => Ok(KeyAlgorithm::Ed25519),
            other => Err(PpkError::UnsupportedAlgorithm {
                name: other.to_string(),
            }),
        }
    }

    /// The algorithm name as it appears on the wire and in `ConvertedKey::algorithm`.
    pub fn wire_name(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => "ssh-rsa",
            KeyAlgorithm::Dss => "ssh-dss",
            KeyAlgorithm::EcdsaP256 => "ecdsa-sha2-nistp256",
            KeyAlgorithm::EcdsaP384 => "ecdsa-sha2-nistp384",
            KeyAlgorithm::EcdsaP521 => "ecdsa-sha2-nistp521",
            KeyAlgorithm::Ed25519 => "ssh-ed25519",
        }
    }

    /// The SSH curve name used inside the wire blob (`"nistp256"` etc), for
    /// ECDSA algorithms only.
    fn ssh_curve_name(&self) -> Option<&'static str> {
        match self {
            KeyAlgorithm::EcdsaP256 => Some("nistp256"),
            KeyAlgorithm::EcdsaP384 => Some("nistp384"),
            KeyAlgorithm::EcdsaP521 => Some("nistp521"),
            _ => None,
        }
    }

    /// Human-facing curve label for `ConvertedKey::curve`.
    pub fn curve_label(&self) -> Option<&'static str> {
        match self {
            KeyAlgorithm::EcdsaP256 => Some("P-256"),
            KeyAlgorithm::EcdsaP384 => Some("P-384"),
            KeyAlgorithm::EcdsaP521 => Some("P-521"),
            _ => None,
        }
    }
}

/// A decoded, algorithm-specific view of a private key. All integer fields
/// are canonical unsigned big-endian byte strings with no sign-extension
/// padding stripped or re-added here (that happens at the DER/OpenSSH
/// writer boundary).
pub enum DecodedKey {
    Rsa {
        e: Vec<u8>,
        n: Vec<u8>,
        d: Vec<u8>,
        p: Vec<u8>,
        q: Vec<u8>,
        iqmp: Vec<u8>,
        d_p: Vec<u8>,
        d_q: Vec<u8>,
    },
    Dss {
        p: Vec<u8>,
        q: Vec<u8>,
        g: Vec<u8>,
        y: Vec<u8>,
        x: Vec<u8>,
    },
    Ecdsa {
        curve_name: &'static str,
        q: Vec<u8>,
        d: Vec<u8>,
    },
    Ed25519 {
        public: [u8; 32],
        seed: [u8; 32],
    },
}

fn read_fixed_32(reader: &mut WireReader) -> Result<[u8; 32]> {
    let bytes = reader.read_bytes()?;
    bytes
        .try_into()
        .map_err(|_| PpkError::BufferUnderrun)
}

/// Decodes the public and (already-decrypted) private blobs into a
/// `DecodedKey`, performing each algorithm's wire layout and, for ECDSA and
/// Ed25519, a consistency check between the public and private halves.
pub fn decode(
    algorithm: KeyAlgorithm,
    public_blob: &[u8],
    private_blob: &[u8],
    max_field_size: u32,
) -> Result<DecodedKey> {
    let mut pub_reader = WireReader::new(public_blob, max_field_size);
    let mut priv_reader = WireReader::new(private_blob, max_field_size);

    let pub_algorithm_name = pub_reader.read_string()?;
    if pub_algorithm_name != algorithm.wire_name() {
        return Err(PpkError::UnsupportedAlgorithm {
            name: pub_algorithm_name,
        });
    }

    match algorithm {
        KeyAlgorithm::Rsa => {
            let e = pub_reader.read_mpint_unsigned()?;
            let n = pub_reader.read_mpint_unsigned()?;

            let d = priv_reader.read_mpint_unsigned()?;
            let p = priv_reader.read_mpint_unsigned()?;
            let q = priv_reader.read_mpint_unsigned()?;
            let iqmp = priv_reader.read_mpint_unsigned()?;

            let d_big = BigUint::from_bytes_be(&d);
            let p_big = BigUint::from_bytes_be(&p);
            let q_big = BigUint::from_bytes_be(&q);
            let one = BigUint::from(1u32);
            let p_minus_1 = &p_big - &one;
            let q_minus_1 = &q_big - &one;
            let d_p = (&d_big % &p_minus_1).to_bytes_be();
            let d_q = (&d_big % &q_minus_1).to_bytes_be();

            Ok(DecodedKey::Rsa {
                e,
                n,
                d,
                p,
                q,
                iqmp,
                d_p,
                d_q,
            })
        }
        KeyAlgorithm::Dss => {
            let p = pub_reader.read_mpint_unsigned()?;
            let q = pub_reader.read_mpint_unsigned()?;
            let g = pub_reader.read_mpint_unsigned()?;
            let y = pub_reader.read_mpint_unsigned()?;

            let x = priv_reader.read_mpint_unsigned()?;

            Ok(DecodedKey::Dss { p, q, g, y, x })
        }
        KeyAlgorithm::EcdsaP256 | KeyAlgorithm::EcdsaP384 | KeyAlgorithm::EcdsaP521 => {
            let curve_name = pub_reader.read_string()?;
            if curve_name != algorithm.ssh_curve_name().unwrap() {
                return Err(PpkError::UnsupportedAlgorithm { name: curve_name });
            }
            let q = pub_reader.read_bytes()?;
            let d = priv_reader.read_mpint_unsigned()?;

            validate_ec_point(algorithm, &q)?;

            Ok(DecodedKey::Ecdsa {
                curve_name: algorithm.ssh_curve_name().unwrap(),
                q,
                d,
            })
        }
        KeyAlgorithm::Ed25519 => {
            let public = read_fixed_32(&mut pub_reader)?;
            let seed = read_fixed_32(&mut priv_reader)?;

            let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
            let derived_public = signing_key.verifying_key().to_bytes();
            if derived_public != public {
                return Err(PpkError::UnsupportedAlgorithm {
                    name: "ssh-ed25519 (seed does not match public key)".to_string(),
                });
            }

            Ok(DecodedKey::Ed25519 { public, seed })
        }
    }
}

fn validate_ec_point(algorithm: KeyAlgorithm, q: &[u8]) -> Result<()> {
    let ok = match algorithm {
        KeyAlgorithm::EcdsaP256 => p256::PublicKey::from_sec1_bytes(q).is_ok(),
        KeyAlgorithm::EcdsaP384 => p384::PublicKey::from_sec1_bytes(q).is_ok(),
        KeyAlgorithm::EcdsaP521 => p521::PublicKey::from_sec1_bytes(q).is_ok(),
        _ => true,
    };
    if ok {
        Ok(())
    } else {
        Err(PpkError::UnsupportedAlgorithm {
            name: format!("{} (invalid curve point)", algorithm.wire_name()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{put_bytes, put_mpint_unsigned, put_string};

    #[test]
    fn unknown_algorithm_name_is_rejected() {
        assert_eq!(
            KeyAlgorithm::from_name("ssh-ed448").unwrap_err(),
            PpkError::UnsupportedAlgorithm {
                name: "ssh-ed448".to_string()
            }
        );
    }

    #[test]
    fn decodes_ed25519_when_seed_matches_public_key() {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&[7u8; 32]);
        let public = signing_key.verifying_key().to_bytes();

        let mut public_blob = Vec::new();
        put_string(&mut public_blob, "ssh-ed25519");
        put_bytes(&mut public_blob, &public);

        let mut private_blob = Vec::new();
        put_bytes(&mut private_blob, &[7u8; 32]);

        let decoded =
            decode(KeyAlgorithm::Ed25519, &public_blob, &private_blob, 1 << 20).unwrap();
        match decoded {
            DecodedKey::Ed25519 { public: p, seed } => {
                assert_eq!(p, public);
                assert_eq!(seed, [7u8; 32]);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn ed25519_seed_public_mismatch_is_rejected() {
        let mut public_blob = Vec::new();
        put_string(&mut public_blob, "ssh-ed25519");
        put_bytes(&mut public_blob, &[9u8; 32]);

        let mut private_blob = Vec::new();
        put_bytes(&mut private_blob, &[7u8; 32]);

        assert!(decode(KeyAlgorithm::Ed25519, &public_blob, &private_blob, 1 << 20).is_err());
    }

    #[test]
    fn rsa_decodes_dp_dq_from_d_p_q() {
        // A tiny RSA-ish triple, not a real key, just checking the arithmetic.
        let e = vec![0x01, 0x00, 0x01];
        let n = vec![0x00, 0xFF];
        let d = vec![0x07];
        let p = vec![0x05];
        let q = vec![0x03];
        let iqmp = vec![0x01];

        let mut public_blob = Vec::new();
        put_string(&mut public_blob, "ssh-rsa");
        put_mpint_unsigned(&mut public_blob, &e);
        put_mpint_unsigned(&mut public_blob, &n);

        let mut private_blob = Vec::new();
        put_mpint_unsigned(&mut private_blob, &d);
        put_mpint_unsigned(&mut private_blob, &p);
        put_mpint_unsigned(&mut private_blob, &q);
        put_mpint_unsigned(&mut private_blob, &iqmp);

        let decoded = decode(KeyAlgorithm::Rsa, &public_blob, &private_blob, 1 << 20).unwrap();
        match decoded {
            DecodedKey::Rsa { d_p, d_q, .. } => {
                // d=7, p-1=4 -> dP=3; d=7, q-1=2 -> dQ=1
                assert_eq!(d_p, vec![3]);
                assert_eq!(d_q, vec![1]);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn ecdsa_rejects_malformed_curve_point() {
        let mut public_blob = Vec::new();
        put_string(&mut public_blob, "ecdsa-sha2-nistp256");
        put_string(&mut public_blob, "nistp256");
        put_bytes(&mut public_blob, &[0x04, 0x01, 0x02]); // far too short to be a valid point

        let mut private_blob = Vec::new();
        put_mpint_unsigned(&mut private_blob, &[0x01]);

        assert!(decode(KeyAlgorithm::EcdsaP256, &public_blob, &private_blob, 1 << 20).is_err());
    }
}
