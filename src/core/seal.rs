//! Libsodium-compatible sealed boxes for repository secrets.

use crate::constants::PUBLIC_KEY_LEN;
use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use crypto_box::aead::OsRng;
use crypto_box::PublicKey;

/// Decode a base64 X25519 public key as served by the secrets API.
pub fn decode_public_key(b64: &str) -> Result<PublicKey> {
    let bytes = STANDARD
        .decode(b64.trim())
        .context("decode repository public key")?;
    if bytes.len() != PUBLIC_KEY_LEN {
        bail!(
            "repository public key has {} bytes, expected {}",
            bytes.len(),
            PUBLIC_KEY_LEN
        );
    }
    let mut raw = [0u8; PUBLIC_KEY_LEN];
    raw.copy_from_slice(&bytes);
    Ok(PublicKey::from(raw))
}

/// Seal `value` for `public_key_b64`; returns base64 ciphertext.
pub fn seal(public_key_b64: &str, value: &str) -> Result<String> {
    let key = decode_public_key(public_key_b64)?;
    let sealed = key
        .seal(&mut OsRng, value.as_bytes())
        .map_err(|_| anyhow!("seal secret value"))?;
    Ok(STANDARD.encode(sealed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_box::SecretKey;

    #[test]
    fn test_seal_opens_with_matching_secret_key() {
        let secret = SecretKey::generate(&mut OsRng);
        let public_b64 = STANDARD.encode(secret.public_key().as_bytes());

        let sealed_b64 = seal(&public_b64, "hunter2").unwrap();
        let sealed = STANDARD.decode(sealed_b64).unwrap();
        // ephemeral public key (32) + MAC (16) + plaintext
        assert_eq!(sealed.len(), 32 + 16 + "hunter2".len());
        assert_eq!(secret.unseal(&sealed).unwrap(), b"hunter2");
    }

    #[test]
    fn test_seal_is_randomized() {
        let secret = SecretKey::generate(&mut OsRng);
        let public_b64 = STANDARD.encode(secret.public_key().as_bytes());
        assert_ne!(seal(&public_b64, "x").unwrap(), seal(&public_b64, "x").unwrap());
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert!(seal("not base64!", "x").is_err());
        assert!(seal(&STANDARD.encode([1u8; 16]), "x").is_err());
    }
}
