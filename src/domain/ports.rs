use async_trait::async_trait;

use crate::domain::entities::OpponentView;

// Port for player persistence used by the request workflows.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn create_player(&self, player_id: &str, name: &str) -> Result<(), String>;
    async fn save_round(
        &self,
        player_id: &str,
        round: i32,
        health: i32,
        inventory_json: &str,
    ) -> Result<(), String>;
    async fn pick_random_opponent(
        &self,
        exclude_player_id: &str,
        round: i32,
    ) -> Result<Option<OpponentView>, String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_seconds(&self) -> u64;
}
