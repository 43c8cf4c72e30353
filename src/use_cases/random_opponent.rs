use std::sync::Arc;

use crate::domain::entities::OpponentView;
use crate::domain::errors::ApiError;
use crate::domain::ports::PlayerStore;

// Random opponent lookup for an admitted player. Selection excludes the
// requesting identity and is scoped to the requested round; both predicates
// live in the store query itself.
pub struct RandomOpponentUseCase {
    pub store: Arc<dyn PlayerStore>,
}

impl RandomOpponentUseCase {
    pub async fn execute(
        &self,
        player_id: &str,
        round: i32,
    ) -> Result<Option<OpponentView>, ApiError> {
        self.store
            .pick_random_opponent(player_id, round)
            .await
            .map_err(ApiError::StorageFailure)
    }
}
