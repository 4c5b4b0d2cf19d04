//! Sealing and opening the token byte string.
//!
//! `nonce[12] ‖ ciphertext ‖ tag[16]`, base64url without padding.

use crate::NONCE_SIZE;
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use tubegate_error::{TokenError, TokenErrorKind, TokenResult};

/// AES-GCM authentication tag length in bytes (128 bits).
pub const TAG_SIZE: usize = 16;

/// URL-safe alphabet, never emits `=`, tolerates it on input.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub(crate) fn seal(
    cipher: &Aes256Gcm,
    nonce: &[u8; NONCE_SIZE],
    plaintext: &[u8],
) -> TokenResult<String> {
    // aes-gcm appends the tag to the ciphertext
    let sealed = cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|_| TokenError::malformed("record too large to seal"))?;

    let mut raw = Vec::with_capacity(NONCE_SIZE + sealed.len());
    raw.extend_from_slice(nonce);
    raw.extend_from_slice(&sealed);
    Ok(TOKEN_ENGINE.encode(raw))
}

pub(crate) fn open(cipher: &Aes256Gcm, token: &str) -> TokenResult<Vec<u8>> {
    if token.is_empty() {
        return Err(TokenError::malformed("empty token"));
    }

    let raw = TOKEN_ENGINE
        .decode(token)
        .map_err(|e| TokenError::malformed(format!("not base64url: {}", e)))?;

    if raw.len() < NONCE_SIZE + TAG_SIZE {
        return Err(TokenError::malformed(format!(
            "token is {} bytes, need at least {}",
            raw.len(),
            NONCE_SIZE + TAG_SIZE
        )));
    }

    let (nonce, sealed) = raw.split_at(NONCE_SIZE);
    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| TokenError::new(TokenErrorKind::Tampered))
}
