use std::collections::HashSet;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::errors::ApiError;

// Session lifetime for issued tokens (in seconds).
pub const SESSION_TTL_SECONDS: u64 = 2 * 60 * 60;

// Claims embedded in a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    // Opaque player identity the token was issued for.
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

// Issues and verifies stateless session tokens. No token is ever stored
// server-side; possession of a valid token is the session.
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
}

impl TokenSigner {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    // Issue a signed token binding the identity, with a fixed TTL.
    pub fn issue(&self, identity: &str, now_epoch_seconds: u64) -> Result<String, ApiError> {
        let claims = SessionClaims {
            sub: identity.to_string(),
            iat: now_epoch_seconds,
            exp: now_epoch_seconds + SESSION_TTL_SECONDS,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(format!("token encoding failed: {e}")))
    }

    // Verify the signature through the library, then check expiry manually
    // against the supplied clock so the check stays deterministic under test.
    pub fn verify(&self, token: &str, now_epoch_seconds: u64) -> Result<String, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| ApiError::InvalidToken)?;

        if now_epoch_seconds >= data.claims.exp {
            return Err(ApiError::TokenExpired);
        }

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-token-secret".to_string())
    }

    #[test]
    fn when_token_is_verified_immediately_then_returns_the_same_identity() {
        let signer = signer();
        let token = signer
            .issue("player-1", NOW)
            .expect("expected token to issue");

        let identity = signer
            .verify(&token, NOW)
            .expect("expected fresh token to verify");

        assert_eq!(identity, "player-1");
    }

    #[test]
    fn when_token_is_verified_just_before_expiry_then_it_still_passes() {
        let signer = signer();
        let token = signer
            .issue("player-1", NOW)
            .expect("expected token to issue");

        let result = signer.verify(&token, NOW + SESSION_TTL_SECONDS - 1);

        assert!(result.is_ok());
    }

    #[test]
    fn when_token_reaches_expiry_then_returns_token_expired() {
        let signer = signer();
        let token = signer
            .issue("player-1", NOW)
            .expect("expected token to issue");

        let result = signer.verify(&token, NOW + SESSION_TTL_SECONDS);

        assert!(matches!(result, Err(ApiError::TokenExpired)));
    }

    #[test]
    fn when_token_signature_is_tampered_then_returns_invalid_token() {
        let signer = signer();
        let token = signer
            .issue("player-1", NOW)
            .expect("expected token to issue");

        // Flip the last character of the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().expect("expected non-empty token");
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_ne!(token, tampered);

        let result = signer.verify(&tampered, NOW);

        assert!(matches!(result, Err(ApiError::InvalidToken)));
    }

    #[test]
    fn when_token_was_signed_with_another_secret_then_returns_invalid_token() {
        let other = TokenSigner::new("another-secret".to_string());
        let token = other
            .issue("player-1", NOW)
            .expect("expected token to issue");

        let result = signer().verify(&token, NOW);

        assert!(matches!(result, Err(ApiError::InvalidToken)));
    }

    #[test]
    fn when_token_is_garbage_then_returns_invalid_token() {
        let result = signer().verify("%%%not-a-token%%%", NOW);

        assert!(matches!(result, Err(ApiError::InvalidToken)));
    }
}
