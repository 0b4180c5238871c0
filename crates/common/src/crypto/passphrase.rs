use std::ops::Deref;

use base64::{engine::general_purpose::STANDARD, Engine};
use zeroize::Zeroizing;

/// Bytes of entropy behind every generated passphrase
pub const PASSPHRASE_ENTROPY_BYTES: usize = 32;
/// Length of a generated passphrase (base64 of the entropy bytes)
pub const PASSPHRASE_MIN_LEN: usize = 44;

/// A random secret string that locks exactly one private key
///
/// Passphrases are scoped: the backing string is wiped on drop, `Debug`
/// never prints it, and nothing in the crate stores one in a long-lived
/// structure. The same shape doubles as a node hash key.
#[derive(Clone, PartialEq, Eq)]
pub struct Passphrase(Zeroizing<String>);

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase(..)")
    }
}

impl Deref for Passphrase {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl From<String> for Passphrase {
    fn from(value: String) -> Self {
        Passphrase(Zeroizing::new(value))
    }
}

impl Passphrase {
    /// Generate a fresh passphrase from the OS entropy source.
    ///
    /// # Panics
    ///
    /// Panics if the entropy source is unavailable; that is not recoverable.
    pub fn generate() -> Self {
        let mut entropy = Zeroizing::new([0u8; PASSPHRASE_ENTROPY_BYTES]);
        getrandom::getrandom(&mut entropy[..]).expect("failed to generate random bytes");
        Passphrase(Zeroizing::new(STANDARD.encode(&entropy[..])))
    }

    pub fn as_str(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_passphrases_are_distinct() {
        let generated: HashSet<String> = (0..256)
            .map(|_| Passphrase::generate().as_str().to_string())
            .collect();
        assert_eq!(generated.len(), 256);
    }

    #[test]
    fn test_passphrase_length_floor() {
        for _ in 0..32 {
            assert!(Passphrase::generate().len() >= PASSPHRASE_MIN_LEN);
        }
    }

    #[test]
    fn test_passphrase_decodes_to_entropy() {
        let passphrase = Passphrase::generate();
        let decoded = STANDARD.decode(passphrase.as_bytes()).unwrap();
        assert_eq!(decoded.len(), PASSPHRASE_ENTROPY_BYTES);
    }

    #[test]
    fn test_debug_is_redacted() {
        let passphrase = Passphrase::generate();
        assert_eq!(format!("{:?}", passphrase), "Passphrase(..)");
    }
}
