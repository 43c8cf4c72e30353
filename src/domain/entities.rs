use serde_json::Value;

// Per-request bundle of the headers the client must send. Values are raw
// strings; validation happens in the use-case layer.
#[derive(Clone, Debug, Default)]
pub struct RequestHeaders {
    pub client_type: Option<String>,
    pub game_client: Option<String>,
    pub timestamp: Option<String>,
    pub platform: Option<String>,
    pub signature: Option<String>,
}

impl RequestHeaders {
    // Raw value lookup by wire header name.
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "x-client-type" => self.client_type.as_deref(),
            "x-game-client" => self.game_client.as_deref(),
            "x-timestamp" => self.timestamp.as_deref(),
            "x-platform" => self.platform.as_deref(),
            "x-signature" => self.signature.as_deref(),
            _ => None,
        }
    }
}

// An opposing player's state for one round, as read from the store.
#[derive(Clone, Debug, PartialEq)]
pub struct OpponentView {
    pub name: String,
    pub health: i32,
    pub inventory: Value,
    pub round: i32,
}
