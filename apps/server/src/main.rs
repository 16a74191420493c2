use coingrid_server::{net, telemetry, GameServer, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment; the
    // first CLI argument, when present, overrides the listening port.
    let mut config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    if let Some(arg) = std::env::args().nth(1) {
        config.port = arg.parse::<u16>().unwrap_or_else(|_| {
            eprintln!("❌ port argument must be a valid port number");
            std::process::exit(1);
        });
    }

    println!(
        "🚀 Starting coingrid server on {}:{}",
        config.host, config.port
    );

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        port = config.port,
        board_size = config.board_size,
        time_limit_secs = config.time_limit.as_secs(),
        "listening"
    );

    let server = GameServer::new(config);
    net::run(server, listener).await
}
