//! Phone number protection.
//!
//! A phone number is kept in two independent forms: a SHA-256 digest of the
//! trimmed number used as a lookup key, and an AES-256-GCM ciphertext that can
//! be reversed by whoever holds the configured secret. Neither form is derived
//! from the other.

use std::{fmt, str::FromStr};

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use tracing::error;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum PiiError {
    #[error("malformed ciphertext triple")]
    Malformed,
    #[error("ciphertext failed integrity check")]
    Integrity,
    #[error("cipher failure")]
    Crypto,
}

/// `iv || auth_tag || ciphertext`, stored as colon separated hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPhone {
    pub iv: Vec<u8>,
    pub tag: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl fmt::Display for EncryptedPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            hex::encode(&self.iv),
            hex::encode(&self.tag),
            hex::encode(&self.ciphertext)
        )
    }
}

impl FromStr for EncryptedPhone {
    type Err = PiiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (Some(iv), Some(tag), Some(ciphertext), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(PiiError::Malformed);
        };
        let iv = hex::decode(iv).map_err(|_| PiiError::Malformed)?;
        let tag = hex::decode(tag).map_err(|_| PiiError::Malformed)?;
        let ciphertext = hex::decode(ciphertext).map_err(|_| PiiError::Malformed)?;
        if iv.len() != NONCE_LEN || tag.len() != TAG_LEN {
            return Err(PiiError::Malformed);
        }
        Ok(Self { iv, tag, ciphertext })
    }
}

pub fn normalize_phone(phone: &str) -> &str {
    phone.trim()
}

/// Hex SHA-256 of the trimmed phone number.
pub fn hash_phone(phone: &str) -> String {
    hex::encode(Sha256::digest(normalize_phone(phone).as_bytes()))
}

fn derive_key(secret: &str) -> [u8; 32] {
    let mut key = [0u8; 32];
    key.copy_from_slice(&Sha256::digest(secret.as_bytes()));
    key
}

/// Encrypts the trimmed phone number. Returns `Ok(None)` when no secret is
/// configured. Every call draws a fresh nonce.
pub fn encrypt_phone(phone: &str, secret: Option<&str>) -> Result<Option<EncryptedPhone>, PiiError> {
    let Some(secret) = secret.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let cipher = Aes256Gcm::new_from_slice(&derive_key(secret)).map_err(|_| PiiError::Crypto)?;
    let mut iv = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut iv);

    // aes-gcm appends the tag to the ciphertext
    let mut sealed = cipher
        .encrypt(Nonce::from_slice(&iv), normalize_phone(phone).as_bytes())
        .map_err(|e| {
            error!(error = %e, "aes-gcm encrypt error");
            PiiError::Crypto
        })?;
    let tag = sealed.split_off(sealed.len() - TAG_LEN);

    Ok(Some(EncryptedPhone {
        iv: iv.to_vec(),
        tag,
        ciphertext: sealed,
    }))
}

// Nothing reveals stored numbers yet.
#[allow(dead_code)]
pub fn decrypt_phone(encrypted: &EncryptedPhone, secret: &str) -> Result<String, PiiError> {
    if encrypted.iv.len() != NONCE_LEN || encrypted.tag.len() != TAG_LEN {
        return Err(PiiError::Malformed);
    }
    let cipher = Aes256Gcm::new_from_slice(&derive_key(secret)).map_err(|_| PiiError::Crypto)?;

    let mut sealed = Vec::with_capacity(encrypted.ciphertext.len() + TAG_LEN);
    sealed.extend_from_slice(&encrypted.ciphertext);
    sealed.extend_from_slice(&encrypted.tag);

    let plain = cipher
        .decrypt(Nonce::from_slice(&encrypted.iv), sealed.as_ref())
        .map_err(|_| PiiError::Integrity)?;
    String::from_utf8(plain).map_err(|_| PiiError::Integrity)
}
