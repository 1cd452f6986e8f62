// JWT token generation and validation service

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;

/// Identity claims embedded in every issued token
///
/// Immutable once issued; changing any field means issuing a new token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token service for JWT operations
///
/// Holds the process-wide signing secret, loaded once at startup and
/// injected where needed. Access tokens expire in 15 minutes, refresh
/// tokens in 7 days.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    access_token_duration: i64,  // in seconds
    refresh_token_duration: i64, // in seconds
}

impl TokenService {
    /// Create a new TokenService with the signing secret
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            access_token_duration: 900,     // 15 minutes
            refresh_token_duration: 604800, // 7 days
        }
    }

    /// Generate an access and refresh token from one identity claims set
    ///
    /// The two tokens differ only in expiry.
    pub fn issue_pair(
        &self,
        user_id: i32,
        email: &str,
        first_name: &str,
        last_name: &str,
        role: &str,
    ) -> Result<(String, String), AuthError> {
        let now = Utc::now().timestamp();

        let access = self.sign(Claims {
            sub: user_id,
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.access_token_duration,
        })?;

        let refresh = self.sign(Claims {
            sub: user_id,
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.refresh_token_duration,
        })?;

        Ok((access, refresh))
    }

    fn sign(&self, claims: Claims) -> Result<String, AuthError> {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Validate a token's signature and expiry, recovering its claims
    ///
    /// Expiry, bad signature, and unparseable structure come back as
    /// distinct errors; the HTTP layer maps all of them to 401.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::MalformedToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Helper to create a test token service
    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string())
    }

    fn issue_test_pair(service: &TokenService) -> (String, String) {
        service
            .issue_pair(42, "test@example.com", "Test", "User", "user")
            .unwrap()
    }

    // Helper to encode arbitrary claims with a given secret
    fn encode_claims(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_validate_recovers_issued_claims() {
        let service = test_token_service();
        let (access, _) = issue_test_pair(&service);

        let claims = service.validate(&access).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.first_name, "Test");
        assert_eq!(claims.last_name, "User");
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn test_access_token_expires_in_15_minutes() {
        let service = test_token_service();
        let (access, _) = issue_test_pair(&service);

        let claims = service.validate(&access).unwrap();
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_refresh_token_expires_in_7_days() {
        let service = test_token_service();
        let (_, refresh) = issue_test_pair(&service);

        let claims = service.validate(&refresh).unwrap();
        assert_eq!(claims.exp - claims.iat, 604800);
    }

    #[test]
    fn test_pair_tokens_are_distinct() {
        let service = test_token_service();
        let (access, refresh) = issue_test_pair(&service);
        assert_ne!(access, refresh);
    }

    #[test]
    fn test_expired_token_is_rejected_as_expired() {
        let service = test_token_service();
        let now = Utc::now().timestamp();

        // Valid signature, expiry well past the validation leeway
        let claims = Claims {
            sub: 1,
            email: "test@example.com".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: "user".to_string(),
            iat: now - 1000,
            exp: now - 500,
        };
        let token = encode_claims(&claims, "test_secret_key_for_testing_purposes");

        let result = service.validate(&token);
        assert!(matches!(result.unwrap_err(), AuthError::ExpiredToken));
    }

    #[test]
    fn test_tampered_signature_is_rejected_as_invalid_signature() {
        let service = test_token_service();
        let (access, _) = issue_test_pair(&service);

        // Flip one character of the signature segment
        let dot = access.rfind('.').unwrap();
        let (head, signature) = access.split_at(dot + 1);
        let flipped = if signature.starts_with('A') { "B" } else { "A" };
        let tampered = format!("{}{}{}", head, flipped, &signature[1..]);
        assert_ne!(tampered, access);

        let result = service.validate(&tampered);
        assert!(matches!(result.unwrap_err(), AuthError::InvalidSignature));
    }

    #[test]
    fn test_foreign_secret_is_rejected_as_invalid_signature() {
        let issuer = TokenService::new("secret1".to_string());
        let validator = TokenService::new("secret2".to_string());

        let (access, _) = issuer
            .issue_pair(1, "test@example.com", "Test", "User", "user")
            .unwrap();

        let result = validator.validate(&access);
        assert!(matches!(result.unwrap_err(), AuthError::InvalidSignature));
    }

    #[test]
    fn test_unparseable_tokens_are_rejected_as_malformed() {
        let service = test_token_service();

        for garbage in ["", "not.a.token", "no-dots-at-all", "a.b"] {
            let result = service.validate(garbage);
            assert!(
                matches!(result.unwrap_err(), AuthError::MalformedToken),
                "token {garbage:?} should be malformed"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_issued_claims_survive_validation(
            user_id in 1i32..1000000,
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)",
            first_name in "[A-Z][a-z]{2,12}",
            last_name in "[A-Z][a-z]{2,12}"
        ) {
            let service = test_token_service();
            let (access, refresh) = service
                .issue_pair(user_id, &email, &first_name, &last_name, "user")?;

            for token in [&access, &refresh] {
                let claims = service.validate(token)?;
                prop_assert_eq!(claims.sub, user_id);
                prop_assert_eq!(&claims.email, &email);
                prop_assert_eq!(&claims.first_name, &first_name);
                prop_assert_eq!(&claims.last_name, &last_name);
            }
        }

        #[test]
        fn prop_random_strings_are_rejected(malformed in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert!(service.validate(&malformed).is_err());
        }
    }
}
