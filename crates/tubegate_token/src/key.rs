//! Symmetric key derivation.

use core::fmt;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the token key in bytes (256 bits).
pub const TOKEN_KEY_SIZE: usize = 32;

/// AES-256 key used to seal and open tokens.
///
/// Derived once per process from the configured secret. Key material is
/// wiped on drop and never printed.
///
/// # Example
///
/// ```
/// use tubegate_token::TokenKey;
///
/// let a = TokenKey::derive(b"secret");
/// let b = TokenKey::derive(b"secret");
/// assert_eq!(a.as_bytes(), b.as_bytes());
/// assert_eq!(format!("{a:?}"), "TokenKey([redacted])");
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct TokenKey {
    bytes: [u8; TOKEN_KEY_SIZE],
}

impl TokenKey {
    /// Use raw key bytes directly.
    pub const fn from_bytes(bytes: [u8; TOKEN_KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Hash an arbitrary-length secret down to a key with SHA-256.
    pub fn derive(secret: impl AsRef<[u8]>) -> Self {
        let digest = Sha256::digest(secret.as_ref());
        let mut bytes = [0u8; TOKEN_KEY_SIZE];
        bytes.copy_from_slice(&digest);
        Self { bytes }
    }

    /// The key bytes.
    pub fn as_bytes(&self) -> &[u8; TOKEN_KEY_SIZE] {
        &self.bytes
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenKey([redacted])")
    }
}
