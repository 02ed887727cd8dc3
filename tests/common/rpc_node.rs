use std::sync::Arc;
use std::time::Duration;

use pegnet_rpc::application::json_rpc::server::rpc::RpcServer;
use pegnet_rpc::chain::factomd::FactomdClient;
use pegnet_rpc::ledger::memory::LedgerSnapshot;
use pegnet_rpc::ledger::memory::MemoryLedger;
use serde_json::json;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Nothing listens here, so every factomd call fails fast.
const DEAD_FACTOMD_URL: &str = "http://127.0.0.1:1/v2";

/// A JSON-RPC server on an ephemeral local port, serving a fixed ledger
/// without entry credits.
pub struct RpcNode {
    url: String,
    client: reqwest::Client,
    server: JoinHandle<anyhow::Result<()>>,
}

impl RpcNode {
    pub async fn start(snapshot: Value) -> anyhow::Result<Self> {
        let snapshot: LedgerSnapshot = serde_json::from_value(snapshot)?;
        let ledger = Arc::new(MemoryLedger::new(snapshot));
        let chain = Arc::new(FactomdClient::new(
            DEAD_FACTOMD_URL,
            Duration::from_millis(500),
        )?);
        let rpc_server = RpcServer::new(ledger, chain, None);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}/", listener.local_addr()?);
        let server = tokio::spawn(async move { rpc_server.serve(listener).await });

        Ok(Self {
            url,
            client: reqwest::Client::new(),
            server,
        })
    }

    pub async fn call(&self, method: &str, params: Value) -> anyhow::Result<Value> {
        let request = json!({"jsonrpc": "2.0", "id": 1, "method": method, "params": params});
        Ok(self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?)
    }

    /// Posts `body` as is, with a JSON content type.
    pub async fn post_raw(&self, body: &'static str) -> anyhow::Result<Value> {
        Ok(self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?
            .json()
            .await?)
    }
}

impl Drop for RpcNode {
    fn drop(&mut self) {
        self.server.abort();
    }
}
