use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::domain::errors::ApiError;
use crate::domain::ports::{Clock, PlayerStore};
use crate::interface_adapters::protocol::EnrollRequest;
use crate::use_cases::tokens::TokenSigner;

// Result returned by the enrollment use case.
pub struct EnrollResult {
    pub token: String,
    pub player_id: String,
}

// Player enrollment use case with injected dependencies. Creates the player
// record and issues the first session token for it.
pub struct EnrollPlayerUseCase<C> {
    pub clock: C,
    pub store: Arc<dyn PlayerStore>,
    pub signer: TokenSigner,
}

impl<C> EnrollPlayerUseCase<C>
where
    C: Clock,
{
    pub async fn execute(&self, payload: EnrollRequest) -> Result<EnrollResult, ApiError> {
        let name = match payload.name.as_deref() {
            Some(value) if !value.trim().is_empty() => validate_name(value)?,
            _ => return Err(ApiError::MissingFields),
        };
        require_character_id(payload.character_id.as_ref())?;

        // Identity is minted once at enrollment and never reused.
        let player_id = Uuid::new_v4().to_string();
        self.store
            .create_player(&player_id, &name)
            .await
            .map_err(ApiError::StorageFailure)?;

        let token = self
            .signer
            .issue(&player_id, self.clock.now_epoch_seconds())?;

        Ok(EnrollResult { token, player_id })
    }
}

// Keep names compact and readable for game UI and logs.
fn validate_name(value: &str) -> Result<String, ApiError> {
    const MAX_LEN: usize = 32;

    if value.chars().count() > MAX_LEN {
        return Err(ApiError::InvalidName);
    }
    if value.trim() != value {
        return Err(ApiError::InvalidName);
    }

    // Allow a simple safe charset across the stack.
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
    {
        return Err(ApiError::InvalidName);
    }

    Ok(value.to_string())
}

// The client may send the character id as a JSON string or number.
fn require_character_id(value: Option<&Value>) -> Result<(), ApiError> {
    match value {
        Some(v) if v.is_string() || v.is_number() => Ok(()),
        _ => Err(ApiError::MissingFields),
    }
}
