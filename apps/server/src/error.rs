use thiserror::Error;

/// Startup-level failures. Everything that can go wrong once a round is
/// underway (bad messages, lost claim races, dead peers) is absorbed in
/// place and never becomes an `AppError`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }
}
