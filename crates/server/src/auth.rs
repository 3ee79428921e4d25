//! Bearer-token verification.
//!
//! Token issuance and rotation live in the external auth service; this
//! module only verifies HS256 bearer tokens and exposes the claims as an
//! [`AuthUser`] request extension. `company_id` from the verified token is
//! the sole source of tenant scoping.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::Error as JwtError,
};
use serde::{Deserialize, Serialize};

/// Claims carried by the auth service's tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject).
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub company_id: String,
    /// Expiration timestamp.
    pub exp: i64,
    /// Issued-at timestamp.
    pub iat: i64,
}

/// Keys derived from the shared HS256 secret.
#[derive(Clone)]
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mints a token for development and tests; production tokens come from
    /// the auth service, signed with the same secret.
    pub fn issue(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        role: &str,
        company_id: &str,
        ttl_minutes: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            company_id: company_id.to_string(),
            exp: (now + chrono::Duration::minutes(ttl_minutes)).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

/// The authenticated principal, injected by the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub company_id: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
            company_id: claims.company_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> AuthKeys {
        AuthKeys::from_secret("test-secret-which-is-long-enough")
    }

    #[test]
    fn issue_and_verify_round_trips() {
        let keys = keys();
        let token = keys
            .issue("u1", "Ada", "ada@example.com", "admin", "c1", 60)
            .unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.company_id, "c1");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = keys()
            .issue("u1", "Ada", "ada@example.com", "admin", "c1", 60)
            .unwrap();
        let other = AuthKeys::from_secret("a-different-secret-entirely-here");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = keys();
        let token = keys
            .issue("u1", "Ada", "ada@example.com", "admin", "c1", -5)
            .unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(keys().verify("not-a-token").is_err());
    }
}
