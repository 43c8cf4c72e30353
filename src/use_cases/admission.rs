use crate::domain::entities::RequestHeaders;
use crate::domain::errors::ApiError;
use crate::domain::ports::Clock;
use crate::use_cases::headers::validate_headers;
use crate::use_cases::signature::verify_signature;
use crate::use_cases::tokens::TokenSigner;

// Composed admission decision run before every protected operation: header
// validation, bearer token verification, then the request signature check.
pub struct AdmissionGate<C> {
    pub clock: C,
    pub signer: TokenSigner,
    // Base64-encoded shared secret for the request signature check.
    pub hmac_secret: String,
}

impl<C> AdmissionGate<C>
where
    C: Clock,
{
    // Admit or reject a request. Pure decision evaluated fresh per request;
    // on success, returns the verified player identity.
    pub fn admit(
        &self,
        headers: &RequestHeaders,
        authorization: Option<&str>,
    ) -> Result<String, ApiError> {
        let now = self.clock.now_epoch_seconds();
        validate_headers(headers, now)?;

        let authorization = authorization.ok_or(ApiError::MissingToken)?;
        // Bearer scheme: the credential is the second whitespace-separated part.
        let token = authorization
            .split_whitespace()
            .nth(1)
            .ok_or(ApiError::InvalidToken)?;

        let identity = self.signer.verify(token, now)?;

        let timestamp = headers.timestamp.as_deref().unwrap_or_default();
        let provided = headers.signature.as_deref().unwrap_or_default();
        if !verify_signature(&self.hmac_secret, token, timestamp, provided) {
            return Err(ApiError::InvalidSignature);
        }

        Ok(identity)
    }
}
