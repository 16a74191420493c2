use std::time::Duration;

use crate::error::AppError;

/// What happens to the server once a round reaches `Finished`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RoundPolicy {
    /// The process serves exactly one round; later connects spectate a
    /// finished game.
    Single,
    /// Reset to the lobby with a fresh board, cleared scores and readiness.
    Relobby,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub board_size: usize,
    pub time_limit: Duration,
    pub preview: Duration,
    pub reveal_delay: Duration,
    pub round_policy: RoundPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 6000,
            board_size: 10,
            time_limit: Duration::from_secs(60),
            preview: Duration::from_secs(3),
            reveal_delay: Duration::from_millis(300),
            round_policy: RoundPolicy::Single,
        }
    }
}

impl ServerConfig {
    /// Overrides come from the environment; every unset variable falls back
    /// to the defaults above.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("COINGRID_HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var::<u16>("COINGRID_PORT")? {
            config.port = port;
        }
        if let Some(size) = parse_var::<usize>("COINGRID_BOARD_SIZE")? {
            if size == 0 {
                return Err(AppError::config(
                    "COINGRID_BOARD_SIZE must be at least 1".to_string(),
                ));
            }
            config.board_size = size;
        }
        if let Some(secs) = parse_var::<u64>("COINGRID_TIME_LIMIT_SECS")? {
            config.time_limit = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>("COINGRID_PREVIEW_SECS")? {
            config.preview = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_var::<u64>("COINGRID_REVEAL_DELAY_MS")? {
            config.reveal_delay = Duration::from_millis(ms);
        }
        if let Ok(policy) = std::env::var("COINGRID_ROUND_POLICY") {
            config.round_policy = match policy.as_str() {
                "single" => RoundPolicy::Single,
                "relobby" => RoundPolicy::Relobby,
                other => {
                    return Err(AppError::config(format!(
                        "COINGRID_ROUND_POLICY must be `single` or `relobby`, got `{other}`"
                    )))
                }
            };
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match std::env::var(name) {
        Ok(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            AppError::config(format!("{name} must be a valid number, got `{raw}`"))
        }),
        Err(_) => Ok(None),
    }
}
