use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

// Recompute the request signature and compare it to the client-supplied one.
// The signature is HMAC-SHA256 over the token followed by the raw timestamp
// header value, keyed with the base64-encoded shared secret. The comparison
// runs in constant time. Malformed inputs never panic; they simply fail.
pub fn verify_signature(
    shared_secret_b64: &str,
    token: &str,
    timestamp: &str,
    provided_b64: &str,
) -> bool {
    let Ok(key) = STANDARD.decode(shared_secret_b64) else {
        return false;
    };
    let Ok(provided) = STANDARD.decode(provided_b64) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(&key) else {
        return false;
    };

    mac.update(token.as_bytes());
    mac.update(timestamp.as_bytes());
    mac.verify_slice(&provided).is_ok()
}
