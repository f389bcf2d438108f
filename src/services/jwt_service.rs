use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::environment::EnvironmentConfig;
use crate::models::{JwtClaims, User};

/// Signs and checks the HS256 access tokens stored in the session cookie.
#[derive(Clone)]
pub struct JwtService {
    algorithm: Algorithm,
    access_token_duration: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str, access_token_seconds: u64) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            access_token_duration: Duration::seconds(access_token_seconds as i64),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expiration)
    }

    /// Token for `user`, valid for the configured number of seconds.
    pub fn generate_access_token(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let exp = now + self.access_token_duration;

        let claims = JwtClaims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
    }

    /// Fails on a bad signature, a malformed token or an expired `exp`.
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<JwtClaims>(token, &self.decoding_key, &validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: 12,
            first_name: "Ada".to_string(),
            last_name: "Byron".to_string(),
            email: "ada@fleet.test".to_string(),
            password_hash: String::new(),
            role: Role::Staff,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let service = JwtService::new("test-secret", 1800);
        let token = service.generate_access_token(&sample_user()).unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, 12);
        assert_eq!(claims.email, "ada@fleet.test");
        assert_eq!(claims.role, Role::Staff);
        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn rejects_token_signed_with_another_secret() {
        let issuer = JwtService::new("one-secret", 1800);
        let verifier = JwtService::new("other-secret", 1800);
        let token = issuer.generate_access_token(&sample_user()).unwrap();

        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let service = JwtService::new("test-secret", 1800);
        let claims = JwtClaims {
            sub: 1,
            email: "old@fleet.test".to_string(),
            role: Role::Admin,
            exp: Utc::now().timestamp() - 60,
            iat: Utc::now().timestamp() - 1860,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &service.encoding_key).unwrap();

        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        let service = JwtService::new("test-secret", 1800);
        assert!(service.validate_token("not.a.jwt").is_err());
    }
}
