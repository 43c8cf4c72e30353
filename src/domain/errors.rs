// Domain-level errors for request admission and player workflows.
#[derive(Debug)]
pub enum ApiError {
    MissingHeader(&'static str),
    InvalidClientType,
    InvalidGameClient,
    RequestExpired,
    MissingToken,
    InvalidToken,
    TokenExpired,
    InvalidSignature,
    MissingFields,
    InvalidName,
    // These carry the underlying detail for logging; it is never shown to
    // the caller.
    StorageFailure(String),
    Internal(String),
}
