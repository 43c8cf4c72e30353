use crate::domain::entities::RequestHeaders;
use crate::domain::errors::ApiError;

// Fixed client constants the mobile build sends on every request.
pub const EXPECTED_CLIENT_TYPE: &str = "unity-game";
pub const EXPECTED_GAME_CLIENT: &str = "bakerybattle";

// Maximum allowed clock skew between client and server (in seconds).
pub const TIMESTAMP_WINDOW_SECONDS: i64 = 300;

// Header names required on every request, checked in order.
pub const REQUIRED_HEADERS: [&str; 5] = [
    "x-client-type",
    "x-game-client",
    "x-timestamp",
    "x-platform",
    "x-signature",
];

// Validate the per-request header bundle. Pure and deterministic given the
// headers and the current time; the first missing header wins.
pub fn validate_headers(headers: &RequestHeaders, now_epoch_seconds: u64) -> Result<(), ApiError> {
    for name in REQUIRED_HEADERS {
        if headers.get(name).is_none() {
            return Err(ApiError::MissingHeader(name));
        }
    }

    if headers.client_type.as_deref() != Some(EXPECTED_CLIENT_TYPE) {
        return Err(ApiError::InvalidClientType);
    }
    if headers.game_client.as_deref() != Some(EXPECTED_GAME_CLIENT) {
        return Err(ApiError::InvalidGameClient);
    }

    // Unparseable timestamps fall outside any window and read as expired.
    let timestamp = headers
        .timestamp
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .ok_or(ApiError::RequestExpired)?;

    let now = now_epoch_seconds as i64;
    if (now - timestamp).abs() > TIMESTAMP_WINDOW_SECONDS {
        return Err(ApiError::RequestExpired);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    fn valid_headers() -> RequestHeaders {
        RequestHeaders {
            client_type: Some(EXPECTED_CLIENT_TYPE.to_string()),
            game_client: Some(EXPECTED_GAME_CLIENT.to_string()),
            timestamp: Some(NOW.to_string()),
            platform: Some("ios".to_string()),
            signature: Some("placeholder".to_string()),
        }
    }

    fn clear(headers: &mut RequestHeaders, name: &str) {
        match name {
            "x-client-type" => headers.client_type = None,
            "x-game-client" => headers.game_client = None,
            "x-timestamp" => headers.timestamp = None,
            "x-platform" => headers.platform = None,
            "x-signature" => headers.signature = None,
            other => panic!("unknown header {other}"),
        }
    }

    #[test]
    fn when_all_headers_are_valid_then_validation_passes() {
        assert!(validate_headers(&valid_headers(), NOW).is_ok());
    }

    #[test]
    fn when_any_required_header_is_missing_then_reason_names_it() {
        for name in REQUIRED_HEADERS {
            let mut headers = valid_headers();
            clear(&mut headers, name);

            let result = validate_headers(&headers, NOW);

            match result {
                Err(ApiError::MissingHeader(missing)) => assert_eq!(missing, name),
                other => panic!("expected missing header error for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn when_several_headers_are_missing_then_first_missing_wins() {
        let mut headers = valid_headers();
        clear(&mut headers, "x-client-type");
        clear(&mut headers, "x-platform");

        let result = validate_headers(&headers, NOW);

        assert!(matches!(result, Err(ApiError::MissingHeader("x-client-type"))));
    }

    #[test]
    fn when_client_type_is_wrong_then_returns_invalid_client_type() {
        let mut headers = valid_headers();
        headers.client_type = Some("web-game".to_string());

        let result = validate_headers(&headers, NOW);

        assert!(matches!(result, Err(ApiError::InvalidClientType)));
    }

    #[test]
    fn when_game_client_is_wrong_then_returns_invalid_game_client() {
        let mut headers = valid_headers();
        headers.game_client = Some("otherbattle".to_string());

        let result = validate_headers(&headers, NOW);

        assert!(matches!(result, Err(ApiError::InvalidGameClient)));
    }

    #[test]
    fn when_timestamp_is_at_window_edge_then_validation_passes() {
        for timestamp in [
            NOW as i64 - TIMESTAMP_WINDOW_SECONDS,
            NOW as i64 + TIMESTAMP_WINDOW_SECONDS,
        ] {
            let mut headers = valid_headers();
            headers.timestamp = Some(timestamp.to_string());

            assert!(validate_headers(&headers, NOW).is_ok());
        }
    }

    #[test]
    fn when_timestamp_is_just_outside_window_then_request_is_expired() {
        for timestamp in [
            NOW as i64 - TIMESTAMP_WINDOW_SECONDS - 1,
            NOW as i64 + TIMESTAMP_WINDOW_SECONDS + 1,
        ] {
            let mut headers = valid_headers();
            headers.timestamp = Some(timestamp.to_string());

            let result = validate_headers(&headers, NOW);

            assert!(matches!(result, Err(ApiError::RequestExpired)));
        }
    }

    #[test]
    fn when_timestamp_is_not_numeric_then_request_is_expired() {
        let mut headers = valid_headers();
        headers.timestamp = Some("yesterday".to_string());

        let result = validate_headers(&headers, NOW);

        assert!(matches!(result, Err(ApiError::RequestExpired)));
    }
}
