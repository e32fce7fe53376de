use crate::error::{ApiError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Claims this service reads from an access token.
///
/// Tokens are issued upstream; only the subject and expiry matter here.
/// Extra claims in the token are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's stable identifier.
    pub sub: String,
    /// Expiry as a unix timestamp.
    pub exp: u64,
}

/// HS256 token verifier.
///
/// Cheap to clone; the decoding key is shared.
#[derive(Clone)]
pub struct AuthVerifier {
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
}

impl AuthVerifier {
    /// Create a verifier from a shared secret.
    #[must_use]
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(secret)),
            validation,
        }
    }

    /// Require a specific issuer claim.
    ///
    /// Tokens without an `iss` claim are rejected, not just tokens with a
    /// mismatching one.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.validation.set_issuer(&[issuer.into()]);
        self.validation.required_spec_claims.insert("iss".to_owned());
        self
    }

    /// Require a specific audience claim.
    ///
    /// Tokens without an `aud` claim are rejected, not just tokens with a
    /// mismatching one.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.validation.set_audience(&[audience.into()]);
        self.validation.required_spec_claims.insert("aud".to_owned());
        self
    }

    /// Verify a token and return its claims.
    ///
    /// The decode failure reason is logged but not sent to the client; every
    /// bad token gets the same unauthorized message.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            ApiError::unauthorized("Authentication failed: invalid or expired token")
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &[u8] = b"test-secret-key-1234567890";

    fn token_with_exp(secret: &[u8], exp: i64) -> String {
        let claims = Claims {
            sub: "user-123".to_string(),
            exp: exp as u64,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    fn future_exp() -> i64 {
        (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp()
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = AuthVerifier::from_secret(SECRET);
        let token = token_with_exp(SECRET, future_exp());

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-123");
    }

    #[test]
    fn test_verify_wrong_secret_rejected() {
        let verifier = AuthVerifier::from_secret(SECRET);
        let token = token_with_exp(b"some-other-secret", future_exp());

        let err = verifier.verify(&token).unwrap_err();
        assert!(err.to_string().contains("Authentication"));
    }

    #[test]
    fn test_verify_expired_token_rejected() {
        let verifier = AuthVerifier::from_secret(SECRET);
        let token = token_with_exp(
            SECRET,
            (chrono::Utc::now() - chrono::Duration::hours(1)).timestamp(),
        );

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_verify_garbage_rejected() {
        let verifier = AuthVerifier::from_secret(SECRET);
        assert!(verifier.verify("not.a.jwt").is_err());
    }

    #[test]
    fn test_verify_missing_issuer_rejected() {
        let verifier = AuthVerifier::from_secret(SECRET).with_issuer("https://auth.example.com");
        // Token has no issuer claim at all.
        let token = token_with_exp(SECRET, future_exp());

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_verify_missing_audience_rejected() {
        let verifier = AuthVerifier::from_secret(SECRET).with_audience("voxanne-dashboard");
        // Token has no audience claim at all.
        let token = token_with_exp(SECRET, future_exp());

        assert!(verifier.verify(&token).is_err());
    }

    #[derive(Serialize)]
    struct IssuedClaims {
        sub: String,
        exp: u64,
        iss: String,
    }

    #[test]
    fn test_verify_issuer_match_and_mismatch() {
        let verifier = AuthVerifier::from_secret(SECRET).with_issuer("https://auth.example.com");

        let mut claims = IssuedClaims {
            sub: "user-123".to_string(),
            exp: future_exp() as u64,
            iss: "https://auth.example.com".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert_eq!(verifier.verify(&token).unwrap().sub, "user-123");

        claims.iss = "https://evil.example.com".to_string();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(verifier.verify(&token).is_err());
    }
}
