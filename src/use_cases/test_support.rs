use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::OpponentView;
use crate::domain::ports::{Clock, PlayerStore};

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub create_player: bool,
    pub save_round: bool,
    pub pick_random_opponent: bool,
}

// Stored round-state row for the in-memory fake.
#[derive(Clone, Debug)]
pub(crate) struct RoundRow {
    pub player_id: String,
    pub round: i32,
    pub health: i32,
    pub inventory_json: String,
}

// In-memory player store used as a stand-in for Postgres in tests. Shared
// behind an Arc so tests can inspect what execute() stored.
pub(crate) struct RecordingStore {
    players: Mutex<HashMap<String, String>>,
    rounds: Mutex<Vec<RoundRow>>,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            players: Mutex::new(HashMap::new()),
            rounds: Mutex::new(Vec::new()),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_player(
        &self,
        player_id: impl Into<String>,
        name: impl Into<String>,
    ) {
        let mut guard = self.players.lock().expect("players mutex poisoned");
        guard.insert(player_id.into(), name.into());
    }

    pub(crate) fn insert_test_round(
        &self,
        player_id: impl Into<String>,
        round: i32,
        health: i32,
        inventory_json: impl Into<String>,
    ) {
        let mut guard = self.rounds.lock().expect("rounds mutex poisoned");
        guard.push(RoundRow {
            player_id: player_id.into(),
            round,
            health,
            inventory_json: inventory_json.into(),
        });
    }

    pub(crate) fn player_count(&self) -> usize {
        let guard = self.players.lock().expect("players mutex poisoned");
        guard.len()
    }

    pub(crate) fn player_name(&self, player_id: &str) -> Option<String> {
        let guard = self.players.lock().expect("players mutex poisoned");
        guard.get(player_id).cloned()
    }

    pub(crate) fn round_rows(&self) -> Vec<RoundRow> {
        let guard = self.rounds.lock().expect("rounds mutex poisoned");
        guard.clone()
    }
}

#[async_trait]
impl PlayerStore for RecordingStore {
    async fn create_player(&self, player_id: &str, name: &str) -> Result<(), String> {
        if self.failures.create_player {
            return Err("create player failed".to_string());
        }

        let mut guard = self.players.lock().expect("players mutex poisoned");
        if guard.contains_key(player_id) {
            return Err("duplicate player id".to_string());
        }
        guard.insert(player_id.to_string(), name.to_string());
        Ok(())
    }

    async fn save_round(
        &self,
        player_id: &str,
        round: i32,
        health: i32,
        inventory_json: &str,
    ) -> Result<(), String> {
        if self.failures.save_round {
            return Err("save round failed".to_string());
        }

        let mut guard = self.rounds.lock().expect("rounds mutex poisoned");
        // Mirror the upsert semantics of the real store.
        if let Some(row) = guard
            .iter_mut()
            .find(|row| row.player_id == player_id && row.round == round)
        {
            row.health = health;
            row.inventory_json = inventory_json.to_string();
        } else {
            guard.push(RoundRow {
                player_id: player_id.to_string(),
                round,
                health,
                inventory_json: inventory_json.to_string(),
            });
        }
        Ok(())
    }

    async fn pick_random_opponent(
        &self,
        exclude_player_id: &str,
        round: i32,
    ) -> Result<Option<OpponentView>, String> {
        if self.failures.pick_random_opponent {
            return Err("pick opponent failed".to_string());
        }

        let players = self.players.lock().expect("players mutex poisoned");
        let rounds = self.rounds.lock().expect("rounds mutex poisoned");
        // The first matching row stands in for the database's random pick.
        let row = rounds
            .iter()
            .find(|row| row.round == round && row.player_id != exclude_player_id);

        Ok(row.map(|row| OpponentView {
            name: players.get(&row.player_id).cloned().unwrap_or_default(),
            health: row.health,
            inventory: serde_json::from_str(&row.inventory_json).unwrap_or(Value::Null),
            round: row.round,
        }))
    }
}
