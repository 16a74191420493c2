#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod game;
pub mod net;
pub mod protocol;
pub mod session;
pub mod telemetry;

// Re-exports for public API
pub use config::{RoundPolicy, ServerConfig};
pub use error::AppError;
pub use game::GameServer;
