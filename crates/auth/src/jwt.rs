use crate::error::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rollcall_models::{Role, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,  // User ID
    pub email: String,
    pub role: Role,
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
    pub jti: String,  // JWT ID (unique identifier)
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    token_exp_hours: i64,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            token_exp_hours: 24, // 1 day default
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let token_exp_hours = std::env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            token_exp_hours,
        }
    }

    /// Generate a bearer token for a user
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.token_exp_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(self.algorithm);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }
}

/// SHA-256 hash of a token, for storing at rest instead of the raw value
pub fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
            role,
            roll_number: None,
            active_token_hash: None,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let jwt = JwtService::new("test-secret-key-min-32-characters-long");
        let user = test_user(Role::Student);

        let token = jwt.generate_token(&user).expect("Failed to generate token");
        let claims = jwt.validate_token(&token).expect("Failed to validate token");

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, Role::Student);
    }

    #[test]
    fn test_wrong_secret_fails() {
        let jwt = JwtService::new("test-secret-key-min-32-characters-long");
        let other = JwtService::new("a-completely-different-secret-key!!");
        let user = test_user(Role::Admin);

        let token = jwt.generate_token(&user).unwrap();
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_hash_token() {
        let token = "some-bearer-token";
        let hash1 = hash_token(token);
        let hash2 = hash_token(token);

        // Same token should produce same hash
        assert_eq!(hash1, hash2);

        // Different token should produce different hash
        let hash3 = hash_token("different-token");
        assert_ne!(hash1, hash3);
    }
}
