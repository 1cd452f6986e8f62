// Password hashing and verification service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::auth::error::AuthError;

/// Password service for hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a fresh random salt
    ///
    /// The output is a PHC string carrying the salt and parameters, so the
    /// same input hashes differently on every call.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| AuthError::PasswordHashError)?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash
    ///
    /// Returns `Ok(false)` for a wrong password and for a stored hash that
    /// cannot be parsed; a caller sees one "does not match" outcome either
    /// way. Only a genuine algorithm fault surfaces as an error.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(false),
        };

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(AuthError::PasswordHashError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_verify_accepts_own_hash() {
        let hash = PasswordService::hash_password("secret123").unwrap();
        assert!(PasswordService::verify_password("secret123", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = PasswordService::hash_password("secret123").unwrap();
        assert!(!PasswordService::verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted_per_call() {
        let first = PasswordService::hash_password("secret123").unwrap();
        let second = PasswordService::hash_password("secret123").unwrap();

        // Different salts, different strings, yet both verify
        assert_ne!(first, second);
        assert!(PasswordService::verify_password("secret123", &first).unwrap());
        assert!(PasswordService::verify_password("secret123", &second).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch_not_an_error() {
        for bad_hash in ["", "not-a-hash", "$argon2id$garbage", "plaintext"] {
            let result = PasswordService::verify_password("secret123", bad_hash);
            assert_eq!(result.unwrap(), false, "hash {bad_hash:?} should not verify");
        }
    }

    proptest! {
        // Hashing is intentionally expensive; keep the case count low.
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_roundtrip_verifies(password in "[a-zA-Z0-9!@#$%^&*]{8,32}") {
            let hash = PasswordService::hash_password(&password).unwrap();
            prop_assert!(PasswordService::verify_password(&password, &hash).unwrap());
        }

        #[test]
        fn prop_distinct_passwords_do_not_cross_verify(
            first in "[a-z]{8,16}",
            second in "[A-Z]{8,16}"
        ) {
            let hash = PasswordService::hash_password(&first).unwrap();
            prop_assert!(!PasswordService::verify_password(&second, &hash).unwrap());
        }
    }
}
