//! Company API key generation and hashing.
//!
//! Only the SHA-256 digest of a key is ever persisted. The plaintext is
//! handed back to the caller once, when the company is created.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a generated API key (alphanumeric characters).
pub const KEY_LENGTH: usize = 48;

/// Number of leading characters kept in clear for identification.
pub const KEY_PREFIX_LENGTH: usize = 8;

/// Freshly generated key material.
pub struct GeneratedApiKey {
    /// The plaintext key. Never stored.
    pub plaintext: String,
    /// The first [`KEY_PREFIX_LENGTH`] characters of the key.
    pub prefix: String,
    /// Lowercase hex SHA-256 digest of the plaintext.
    pub hash: String,
}

/// Generate a new random API key.
pub fn generate_api_key() -> GeneratedApiKey {
    let key: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(KEY_LENGTH)
        .map(char::from)
        .collect();

    GeneratedApiKey {
        prefix: extract_prefix(&key).to_string(),
        hash: hash_api_key(&key),
        plaintext: key,
    }
}

/// Digest used both when issuing a key and when authenticating a request.
pub fn hash_api_key(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("{digest:x}")
}

/// Leading characters of a key, safe to show in listings and logs.
pub fn extract_prefix(key: &str) -> &str {
    match key.char_indices().nth(KEY_PREFIX_LENGTH) {
        Some((idx, _)) => &key[..idx],
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_has_expected_shape() {
        let key = generate_api_key();
        assert_eq!(key.plaintext.len(), KEY_LENGTH);
        assert!(key.plaintext.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(&key.plaintext[..KEY_PREFIX_LENGTH], key.prefix);
    }

    #[test]
    fn stored_hash_matches_rehash_of_plaintext() {
        let key = generate_api_key();
        assert_eq!(key.hash, hash_api_key(&key.plaintext));
        assert_eq!(key.hash.len(), 64);
    }

    #[test]
    fn two_keys_never_collide() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert_ne!(a.plaintext, b.plaintext);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn empty_key_hashes_to_known_digest() {
        assert_eq!(
            hash_api_key(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn prefix_of_short_key_is_whole_key() {
        assert_eq!(extract_prefix("abc"), "abc");
        assert_eq!(extract_prefix("abcdefghijk"), "abcdefgh");
    }
}
