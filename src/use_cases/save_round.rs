use std::sync::Arc;

use crate::domain::errors::ApiError;
use crate::domain::ports::PlayerStore;
use crate::interface_adapters::protocol::SaveRoundRequest;

// Round-state submission use case for an admitted player.
pub struct SaveRoundUseCase {
    pub store: Arc<dyn PlayerStore>,
}

impl SaveRoundUseCase {
    pub async fn execute(&self, player_id: &str, payload: SaveRoundRequest) -> Result<(), ApiError> {
        let (Some(health), Some(inventory), Some(round)) =
            (payload.health, payload.inventory, payload.round)
        else {
            return Err(ApiError::MissingFields);
        };

        // Inventory is persisted in its JSON text form.
        let inventory_json = inventory.to_string();
        self.store
            .save_round(player_id, round, health, &inventory_json)
            .await
            .map_err(ApiError::StorageFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FailureFlags, RecordingStore};
    use serde_json::json;

    fn payload() -> SaveRoundRequest {
        SaveRoundRequest {
            health: Some(87),
            inventory: Some(json!(["rolling-pin", "flour"])),
            round: Some(3),
        }
    }

    #[tokio::test]
    async fn when_payload_is_valid_then_round_state_is_stored() {
        let store = Arc::new(RecordingStore::new());
        let use_case = SaveRoundUseCase {
            store: store.clone(),
        };

        use_case
            .execute("player-1", payload())
            .await
            .expect("expected save to succeed");

        let rows = store.round_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player_id, "player-1");
        assert_eq!(rows[0].round, 3);
        assert_eq!(rows[0].health, 87);
        assert_eq!(rows[0].inventory_json, r#"["rolling-pin","flour"]"#);
    }

    #[tokio::test]
    async fn when_same_round_is_saved_twice_then_the_latest_state_wins() {
        let store = Arc::new(RecordingStore::new());
        let use_case = SaveRoundUseCase {
            store: store.clone(),
        };

        use_case
            .execute("player-1", payload())
            .await
            .expect("expected first save to succeed");
        use_case
            .execute(
                "player-1",
                SaveRoundRequest {
                    health: Some(12),
                    inventory: Some(json!([])),
                    round: Some(3),
                },
            )
            .await
            .expect("expected second save to succeed");

        let rows = store.round_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].health, 12);
        assert_eq!(rows[0].inventory_json, "[]");
    }

    #[tokio::test]
    async fn when_health_is_missing_then_returns_missing_fields() {
        let use_case = SaveRoundUseCase {
            store: Arc::new(RecordingStore::new()),
        };

        let result = use_case
            .execute(
                "player-1",
                SaveRoundRequest {
                    health: None,
                    inventory: Some(json!([])),
                    round: Some(3),
                },
            )
            .await;

        assert!(matches!(result, Err(ApiError::MissingFields)));
    }

    #[tokio::test]
    async fn when_inventory_is_missing_then_returns_missing_fields() {
        let use_case = SaveRoundUseCase {
            store: Arc::new(RecordingStore::new()),
        };

        let result = use_case
            .execute(
                "player-1",
                SaveRoundRequest {
                    health: Some(87),
                    inventory: None,
                    round: Some(3),
                },
            )
            .await;

        assert!(matches!(result, Err(ApiError::MissingFields)));
    }

    #[tokio::test]
    async fn when_round_is_missing_then_returns_missing_fields() {
        let use_case = SaveRoundUseCase {
            store: Arc::new(RecordingStore::new()),
        };

        let result = use_case
            .execute(
                "player-1",
                SaveRoundRequest {
                    health: Some(87),
                    inventory: Some(json!([])),
                    round: None,
                },
            )
            .await;

        assert!(matches!(result, Err(ApiError::MissingFields)));
    }

    #[tokio::test]
    async fn when_store_save_fails_then_returns_storage_failure() {
        let store = Arc::new(RecordingStore::new().with_failures(FailureFlags {
            save_round: true,
            ..Default::default()
        }));
        let use_case = SaveRoundUseCase { store };

        let result = use_case.execute("player-1", payload()).await;

        assert!(matches!(result, Err(ApiError::StorageFailure(_))));
    }
}
