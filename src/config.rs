//! Command-line and environment configuration.

use clap::Parser;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:3000/ws";

#[derive(Debug, Clone, Parser)]
#[command(name = "chessboard-client", version, about = "Play chess against a remote opponent")]
pub struct ClientConfig {
    /// WebSocket endpoint of the game server
    #[arg(long, env = "CHESS_SERVER_URL", default_value = DEFAULT_SERVER_URL, value_parser = parse_server_url)]
    pub server_url: Url,

    /// Log filter, e.g. "info" or "chessboard_client=debug"
    #[arg(long = "log", env = "CHESS_LOG", default_value = "info")]
    pub log_filter: String,

    /// Position to show until the server sends one
    #[arg(long = "fen", env = "CHESS_START_FEN")]
    pub start_fen: Option<String>,
}

fn parse_server_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL: {e}"))?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => Err(format!("unsupported scheme {other:?}, expected ws or wss")),
    }
}
