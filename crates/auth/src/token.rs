//! Access-token issuing and verification (HS256 JWT).
//!
//! There is exactly one token scheme: every token is signed with the shared
//! secret, and verification always checks the signature before any claim is
//! trusted.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use thiserror::Error;

use admissions_core::UserId;

use crate::{Role, TokenClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed token, wrong algorithm, missing claims.
    #[error("invalid token: {0}")]
    Invalid(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Verifies a bearer string and returns its claims.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError>;
}

/// Mints access tokens for authenticated accounts.
pub trait TokenIssuer: Send + Sync {
    fn issue(
        &self,
        sub: UserId,
        email: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Shared-secret token service.
#[derive(Clone)]
pub struct Hs256Tokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl Hs256Tokens {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl core::fmt::Debug for Hs256Tokens {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256Tokens")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier for Hs256Tokens {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                TokenError::Invalid(e.to_string())
            })?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

impl TokenIssuer for Hs256Tokens {
    fn issue(
        &self,
        sub: UserId,
        email: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing(format!("token lifetime {} overflows", self.ttl)))?;

        let claims = TokenClaims {
            sub,
            email: email.to_string(),
            role,
            issued_at: now,
            expires_at,
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(secret: &str) -> Hs256Tokens {
        Hs256Tokens::new(secret.as_bytes(), Duration::minutes(30))
    }

    #[test]
    fn issued_token_verifies() {
        let svc = tokens("test-secret");
        let sub = UserId::new();
        let now = Utc::now();

        let issued = svc.issue(sub, "dean@uni.edu", Role::admin(), now).unwrap();
        let claims = svc.verify(&issued.token, now).unwrap();

        assert_eq!(claims.sub, sub);
        assert_eq!(claims.email, "dean@uni.edu");
        assert_eq!(claims.role, Role::admin());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let now = Utc::now();
        let issued = tokens("secret-a")
            .issue(UserId::new(), "a@uni.edu", Role::student(), now)
            .unwrap();

        let err = tokens("secret-b").verify(&issued.token, now).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let svc = tokens("test-secret");
        let now = Utc::now();
        let issued = svc.issue(UserId::new(), "a@uni.edu", Role::student(), now).unwrap();

        // Swap the payload for one claiming admin; the signature no longer matches.
        let forged = svc.issue(UserId::new(), "a@uni.edu", Role::admin(), now).unwrap();
        let parts: Vec<&str> = issued.token.split('.').collect();
        let forged_parts: Vec<&str> = forged.token.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert!(svc.verify(&spliced, now).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = tokens("test-secret");
        let issued_at = Utc::now() - Duration::hours(2);
        let issued = svc.issue(UserId::new(), "a@uni.edu", Role::staff(), issued_at).unwrap();

        assert!(svc.verify(&issued.token, Utc::now()).is_err());
    }

    #[test]
    fn overflowing_lifetime_is_an_error() {
        let svc = Hs256Tokens::new(b"test-secret", Duration::days(1_000_000_000));
        let err = svc
            .issue(UserId::new(), "a@uni.edu", Role::staff(), Utc::now())
            .unwrap_err();

        assert!(matches!(err, TokenError::Signing(_)));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = tokens("test-secret").verify("not.a.jwt", Utc::now()).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn debug_does_not_print_keys() {
        let rendered = format!("{:?}", tokens("super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
