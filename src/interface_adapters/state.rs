use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};

use crate::domain::entities::OpponentView;
use crate::domain::ports::{Clock, PlayerStore};

// Application state shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    pub store: Arc<dyn PlayerStore>,
    pub auth: AuthSettings,
}

// Process-wide secrets loaded once at startup and passed in explicitly.
#[derive(Clone)]
pub struct AuthSettings {
    pub token_secret: String,
    // Base64-encoded shared secret for the request signature check.
    pub hmac_secret: String,
}

// PostgreSQL-backed player store.
#[derive(Clone)]
pub struct PostgresPlayerStore {
    pub db: PgPool,
}

#[async_trait]
impl PlayerStore for PostgresPlayerStore {
    async fn create_player(&self, player_id: &str, name: &str) -> Result<(), String> {
        sqlx::query("INSERT INTO players (player_id, name) VALUES ($1, $2)")
            .bind(player_id)
            .bind(name)
            .execute(&self.db)
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }

    async fn save_round(
        &self,
        player_id: &str,
        round: i32,
        health: i32,
        inventory_json: &str,
    ) -> Result<(), String> {
        // Latest state wins for a given (player, round).
        sqlx::query(
            r#"
            INSERT INTO player_rounds (player_id, round, health, inventory)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (player_id, round) DO UPDATE SET
                health = EXCLUDED.health,
                inventory = EXCLUDED.inventory,
                updated_at = now()
            "#,
        )
        .bind(player_id)
        .bind(round)
        .bind(health)
        .bind(inventory_json)
        .execute(&self.db)
        .await
        .map_err(|e| e.to_string())?;

        Ok(())
    }

    async fn pick_random_opponent(
        &self,
        exclude_player_id: &str,
        round: i32,
    ) -> Result<Option<OpponentView>, String> {
        let row = sqlx::query(
            r#"
            SELECT p.name, r.health, r.inventory, r.round
            FROM player_rounds r
            JOIN players p ON p.player_id = r.player_id
            WHERE r.round = $1 AND r.player_id <> $2
            ORDER BY random()
            LIMIT 1
            "#,
        )
        .bind(round)
        .bind(exclude_player_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| e.to_string())?;

        let Some(row) = row else {
            return Ok(None);
        };

        let name: String = row.try_get("name").map_err(|e| e.to_string())?;
        let health: i32 = row.try_get("health").map_err(|e| e.to_string())?;
        let inventory: String = row.try_get("inventory").map_err(|e| e.to_string())?;
        let round: i32 = row.try_get("round").map_err(|e| e.to_string())?;

        Ok(Some(OpponentView {
            name,
            health,
            inventory: parse_inventory(inventory),
            round,
        }))
    }
}

// Inventory is stored as JSON text; fall back to the raw string for a row
// that does not parse.
fn parse_inventory(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or_else(|_| Value::String(raw))
}

// System clock adapter used by the request workflows.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
