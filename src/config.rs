//! Command-line and environment configuration
//!
//! The `clap` argument structs are parsed in `main` and validated into the
//! plain config structs the server and clients consume.

use crate::game::{DEFAULT_STEP_DELAY, MAX_BOARDS, MIN_BOARDS, clamp_board_count};
use anyhow::{Result, bail};
use clap::Args;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Arguments of `termox serve`
#[derive(Debug, Clone, Args)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "TERMOX_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "TERMOX_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Word list file, one word per line
    #[arg(short, long, env = "TERMOX_WORDLIST", default_value = "wordlist.txt")]
    pub wordlist: PathBuf,

    /// Directory of static files
    #[arg(long, env = "TERMOX_PUBLIC", default_value = "public")]
    pub public: PathBuf,
}

/// Word server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub wordlist: PathBuf,
    pub public_root: PathBuf,
}

impl ServerConfig {
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl From<ServerArgs> for ServerConfig {
    fn from(args: ServerArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            wordlist: args.wordlist,
            public_root: args.public,
        }
    }
}

/// Arguments shared by `termox play` and `termox simple`
#[derive(Debug, Clone, Args)]
pub struct ClientArgs {
    /// Word server base URL
    #[arg(short, long, env = "TERMOX_SERVER", default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    /// Number of simultaneous boards (1 to 4)
    #[arg(short = 'q', long, default_value_t = 1)]
    pub boards: usize,

    /// Delay between revealed letters, in milliseconds
    #[arg(long, default_value_t = DEFAULT_STEP_DELAY.as_millis() as u64)]
    pub step_ms: u64,

    /// Play without a server, using the bundled word list
    #[arg(long)]
    pub offline: bool,

    /// Word list file for offline play instead of the bundled one
    #[arg(short, long, requires = "offline")]
    pub wordlist: Option<PathBuf>,

    /// Write logs to this file; the terminal itself is left to the game
    #[arg(long, env = "TERMOX_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Where a client gets its words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSourceConfig {
    /// A word server, with offline fallback for targets
    Server(String),
    /// The bundled list
    Embedded,
    /// A local file
    File(PathBuf),
}

/// Game client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub source: WordSourceConfig,
    pub boards: usize,
    pub step_delay: Duration,
}

impl TryFrom<ClientArgs> for ClientConfig {
    type Error = anyhow::Error;

    fn try_from(args: ClientArgs) -> Result<Self> {
        let boards = clamp_board_count(args.boards);
        if boards != args.boards {
            warn!(
                requested = args.boards,
                boards, "board count must be between {MIN_BOARDS} and {MAX_BOARDS}"
            );
        }

        let source = match (args.offline, args.wordlist) {
            (true, Some(path)) => WordSourceConfig::File(path),
            (true, None) => WordSourceConfig::Embedded,
            (false, _) => {
                let url = args.server.trim();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    bail!("server URL must start with http:// or https://, got {url:?}");
                }
                WordSourceConfig::Server(url.trim_end_matches('/').to_string())
            }
        };

        Ok(Self {
            source,
            boards,
            step_delay: Duration::from_millis(args.step_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_args() -> ClientArgs {
        ClientArgs {
            server: DEFAULT_SERVER_URL.to_string(),
            boards: 1,
            step_ms: 450,
            offline: false,
            wordlist: None,
            log_file: None,
        }
    }

    #[test]
    fn server_url_is_validated() {
        let args = ClientArgs {
            server: "localhost:3000".to_string(),
            ..client_args()
        };
        assert!(ClientConfig::try_from(args).is_err());

        let args = ClientArgs {
            server: "http://example.test/".to_string(),
            ..client_args()
        };
        let config = ClientConfig::try_from(args).unwrap();
        assert_eq!(
            config.source,
            WordSourceConfig::Server("http://example.test".to_string())
        );
    }

    #[test]
    fn offline_ignores_server_url() {
        let args = ClientArgs {
            server: "not a url".to_string(),
            offline: true,
            ..client_args()
        };
        let config = ClientConfig::try_from(args).unwrap();
        assert_eq!(config.source, WordSourceConfig::Embedded);

        let args = ClientArgs {
            offline: true,
            wordlist: Some(PathBuf::from("words.txt")),
            ..client_args()
        };
        let config = ClientConfig::try_from(args).unwrap();
        assert_eq!(config.source, WordSourceConfig::File(PathBuf::from("words.txt")));
    }

    #[test]
    fn boards_are_clamped() {
        let args = ClientArgs {
            boards: 7,
            ..client_args()
        };
        assert_eq!(ClientConfig::try_from(args).unwrap().boards, 4);

        let args = ClientArgs {
            boards: 0,
            ..client_args()
        };
        assert_eq!(ClientConfig::try_from(args).unwrap().boards, 1);
    }

    #[test]
    fn step_delay_from_millis() {
        let args = ClientArgs {
            step_ms: 0,
            ..client_args()
        };
        assert_eq!(ClientConfig::try_from(args).unwrap().step_delay, Duration::ZERO);
        assert_eq!(
            ClientConfig::try_from(client_args()).unwrap().step_delay,
            Duration::from_millis(450)
        );
    }

    #[test]
    fn server_bind_addr() {
        let config = ServerConfig::from(ServerArgs {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            wordlist: PathBuf::from("wordlist.txt"),
            public: PathBuf::from("public"),
        });
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
    }
}
