// Domain layer: entities, errors, and ports for the game backend.

pub mod entities;
pub mod errors;
pub mod ports;
