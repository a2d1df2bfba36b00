use rand::RngCore;
use sha2::{Digest, Sha256};

/// Password digest capability consumed by the registration and login
/// commands. KDF choice and parameters live behind this seam; the commands
/// only ever see `hash` and `matches`.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, word: &str) -> String;
    fn matches(&self, digest: &str, word: &str) -> bool;
}

/// Salted SHA-256 digest in `salt$hex` form.
#[derive(Debug, Default)]
pub struct SaltedSha256Hasher;

impl SaltedSha256Hasher {
    fn digest(salt: &str, word: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(word.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl PasswordHasher for SaltedSha256Hasher {
    fn hash(&self, word: &str) -> String {
        let mut salt_bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt: String = salt_bytes.iter().map(|b| format!("{:02x}", b)).collect();

        format!("{}${}", salt, Self::digest(&salt, word))
    }

    fn matches(&self, digest: &str, word: &str) -> bool {
        match digest.split_once('$') {
            Some((salt, expected)) => Self::digest(salt, word) == expected,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_match_round_trip() {
        let hasher = SaltedSha256Hasher;
        let digest = hasher.hash("hunter2");

        assert!(hasher.matches(&digest, "hunter2"));
        assert!(!hasher.matches(&digest, "hunter3"));
    }

    #[test]
    fn same_password_gets_distinct_digests() {
        let hasher = SaltedSha256Hasher;
        assert_ne!(hasher.hash("hunter2"), hasher.hash("hunter2"));
    }

    #[test]
    fn malformed_digest_never_matches() {
        let hasher = SaltedSha256Hasher;
        assert!(!hasher.matches("no-salt-separator", "anything"));
    }
}
