//! Argon2 password hashing.
//!
//! Hashes are salted PHC strings; verification re-parses the stored hash and
//! treats any malformed hash as a non-match rather than an error surface.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{EngineError, ResultEngine};

/// Hash a plaintext password with a fresh random salt.
pub fn hash(plain: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|err| EngineError::Internal(format!("password hash: {err}")))?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC hash.
pub fn verify(plain: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash("correct-horse-battery-staple").unwrap();
        assert!(verify("correct-horse-battery-staple", &hash));
        assert!(!verify("wrong-password", &hash));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!verify("anything", "not-a-phc-string"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash("hunter22").unwrap();
        let b = hash("hunter22").unwrap();
        assert_ne!(a, b);
    }
}
