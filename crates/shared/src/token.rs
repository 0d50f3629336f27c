//! Opaque token generation and hashing.
//!
//! Session refresh tokens and password-reset tokens are random opaque
//! strings. Only their SHA-256 hash is stored, so a database leak does not
//! expose usable tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes in a generated token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Generates a URL-safe random token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Computes the SHA-256 hash of the input as a lowercase hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_length() {
        // 32 bytes base64url without padding = 43 characters
        assert_eq!(generate_token().len(), 43);
    }

    #[test]
    fn test_generate_token_unique() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn test_generate_token_url_safe() {
        let token = generate_token();
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.contains('='));
    }

    #[test]
    fn test_sha256_hex_known_value() {
        assert_eq!(
            sha256_hex("test"),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        assert_eq!(sha256_hex("same"), sha256_hex("same"));
        assert_ne!(sha256_hex("one"), sha256_hex("two"));
    }

    #[test]
    fn test_sha256_hex_length() {
        assert_eq!(sha256_hex("").len(), 64);
        assert_eq!(sha256_hex(&"a".repeat(10_000)).len(), 64);
    }
}
