//! Nonce generation.

use rand::RngCore;
use rand::rngs::OsRng;

/// AES-GCM nonce length in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// Produces the per-token nonce.
///
/// GCM loses both confidentiality and integrity if a nonce repeats under the
/// same key, so production code must use [`OsNonceSource`].
pub trait NonceSource: Send + Sync + std::fmt::Debug {
    /// A nonce for one sealing operation.
    fn next_nonce(&self) -> [u8; NONCE_SIZE];
}

/// Fresh nonces from the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsNonceSource;

impl NonceSource for OsNonceSource {
    fn next_nonce(&self) -> [u8; NONCE_SIZE] {
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }
}

/// Always returns the same nonce. Test use only.
#[derive(Debug, Clone, Copy)]
pub struct FixedNonceSource {
    nonce: [u8; NONCE_SIZE],
}

impl FixedNonceSource {
    /// Repeat `nonce` forever.
    pub const fn new(nonce: [u8; NONCE_SIZE]) -> Self {
        Self { nonce }
    }
}

impl NonceSource for FixedNonceSource {
    fn next_nonce(&self) -> [u8; NONCE_SIZE] {
        self.nonce
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn os_nonces_do_not_repeat() {
        let source = OsNonceSource;
        let nonces: HashSet<_> = (0..1000).map(|_| source.next_nonce()).collect();
        assert_eq!(nonces.len(), 1000);
    }

    #[test]
    fn fixed_source_is_fixed() {
        let source = FixedNonceSource::new([7; NONCE_SIZE]);
        assert_eq!(source.next_nonce(), source.next_nonce());
    }
}
