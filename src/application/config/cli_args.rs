use std::net::IpAddr;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::protocol::address::EntryCreditSecret;

/// The `pegnet-rpc` command-line program serves the PegNet JSON-RPC API.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about)]
pub struct Args {
    /// IP on which to listen for JSON-RPC connections.
    #[clap(long, default_value = "127.0.0.1")]
    pub listen_addr: IpAddr,

    /// Port on which to listen for JSON-RPC connections.
    #[clap(long, default_value = "8070", value_name = "PORT")]
    pub rpc_port: u16,

    /// URL of the factomd JSON-RPC v2 endpoint.
    #[clap(long, default_value = "http://localhost:8088/v2", value_name = "URL")]
    pub factomd_url: String,

    /// Timeout for each request to factomd, e.g. "10s" or "1m 30s".
    #[clap(long, default_value = "10s", value_parser = humantime::parse_duration)]
    pub factomd_timeout: Duration,

    /// Private entry credit address (`Es...`) paying for submitted
    /// transactions.
    ///
    /// Without it, `send-transaction` only accepts dry runs.
    #[clap(long, value_name = "ES_ADDRESS", env = "PEGNET_EC_PRIVATE_KEY")]
    pub ec_private_key: Option<EntryCreditSecret>,

    /// JSON ledger snapshot to serve. An empty ledger is served without one.
    #[clap(long, value_name = "FILE")]
    pub ledger_snapshot: Option<PathBuf>,

    /// Re-read `--ledger-snapshot` this often, e.g. "1m". Off when absent.
    #[clap(long, value_parser = humantime::parse_duration, requires = "ledger_snapshot")]
    pub snapshot_reload_interval: Option<Duration>,
}

impl Default for Args {
    fn default() -> Self {
        let empty: Vec<String> = vec![];
        Self::parse_from(empty)
    }
}

impl Args {
    pub fn rpc_socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_addr, self.rpc_port)
    }
}
