use crate::error::{AuthError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};

const MIN_LENGTH: usize = 6;
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

pub struct PasswordHasher;

impl PasswordHasher {
    /// Hash a password using Argon2id
    pub fn hash(password: &str) -> Result<String> {
        // Validate password strength
        Self::validate_password(password)?;

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a hash
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))?;

        let argon2 = Argon2::default();

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::PasswordHashError(e.to_string())),
        }
    }

    /// Validate password strength: minimum length, one letter, one digit,
    /// one special character.
    fn validate_password(password: &str) -> Result<()> {
        if password.len() < MIN_LENGTH {
            return Err(AuthError::WeakPassword(format!(
                "Password must be at least {} characters long",
                MIN_LENGTH
            )));
        }

        if !password.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(AuthError::WeakPassword(
                "Password must contain at least one letter".to_string(),
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AuthError::WeakPassword(
                "Password must contain at least one number".to_string(),
            ));
        }

        if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
            return Err(AuthError::WeakPassword(
                "Password must contain at least one special character".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "pass1!word";
        let hash = PasswordHasher::hash(password).expect("Failed to hash password");

        assert!(PasswordHasher::verify(password, &hash).unwrap());
        assert!(!PasswordHasher::verify("wrong1!pass", &hash).unwrap());
    }

    #[test]
    fn test_password_validation() {
        // Too short
        assert!(PasswordHasher::hash("a1!").is_err());

        // No letter
        assert!(PasswordHasher::hash("123456!").is_err());

        // No number
        assert!(PasswordHasher::hash("abcdef!").is_err());

        // No special character
        assert!(PasswordHasher::hash("abc123def").is_err());

        // Valid password
        assert!(PasswordHasher::hash("abc123!").is_ok());
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = "same1!pass";
        let first = PasswordHasher::hash(password).unwrap();
        let second = PasswordHasher::hash(password).unwrap();

        assert_ne!(first, second);
        assert!(PasswordHasher::verify(password, &first).unwrap());
        assert!(PasswordHasher::verify(password, &second).unwrap());
    }
}
