use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token time-to-live
pub const ACCESS_TOKEN_TTL: i64 = 900; // 15 minutes

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,  // Subject (user ID)
    pub role: String, // Role name
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
}

/// Verified caller identity attached to request extensions by the
/// authentication middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role_name: String,
}

impl TryFrom<&JwtClaims> for AuthUser {
    type Error = uuid::Error;

    fn try_from(claims: &JwtClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: Uuid::parse_str(&claims.sub)?,
            role_name: claims.role.clone(),
        })
    }
}

/// Stateless JWT authentication.
///
/// Verifies HS256-signed bearer tokens. No session store: a token is valid
/// until it expires.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    /// Create a new JWT auth instance.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let config = JwtConfig::from_env()?;
    /// let auth = JwtAuth::new(&config);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Create a signed token carrying a user id and role name.
    ///
    /// Token issuance belongs to the external identity service; this exists
    /// for tests and local tooling.
    pub fn create_token(
        &self,
        user_id: &str,
        role_name: &str,
        ttl_seconds: i64,
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(ttl_seconds)).timestamp();
        let iat = now.timestamp();

        let claims = JwtClaims {
            sub: user_id.to_string(),
            role: role_name.to_string(),
            exp,
            iat,
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify JWT token signature and decode claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-at-least-32-chars"))
    }

    #[test]
    fn test_token_roundtrip() {
        let auth = test_auth();
        let user_id = Uuid::new_v4();

        let token = auth
            .create_token(&user_id.to_string(), "Seller", ACCESS_TOKEN_TTL)
            .unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "Seller");

        let user = AuthUser::try_from(&claims).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role_name, "Seller");
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let auth = test_auth();
        let other = JwtAuth::new(&JwtConfig::new("another-secret-that-is-32-chars-long!"));

        let token = auth
            .create_token(&Uuid::new_v4().to_string(), "Admin", ACCESS_TOKEN_TTL)
            .unwrap();

        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let auth = test_auth();

        let token = auth
            .create_token(&Uuid::new_v4().to_string(), "Seller", -120)
            .unwrap();

        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_auth_user_rejects_non_uuid_subject() {
        let claims = JwtClaims {
            sub: "not-a-uuid".to_string(),
            role: "Seller".to_string(),
            exp: Utc::now().timestamp() + 900,
            iat: Utc::now().timestamp(),
        };

        assert!(AuthUser::try_from(&claims).is_err());
    }
}
