mod common;

use common::logging::tracing_logger;
use common::rpc_node::RpcNode;
use pegnet_rpc::protocol::address::FactoidAddress;
use pegnet_rpc::protocol::entry::Entry;
use pegnet_rpc::protocol::TRANSACTION_CHAIN_ID;
use serde_json::json;
use serde_json::Value;

const HEIGHT: u32 = 42;

fn holder() -> FactoidAddress {
    FactoidAddress::from_payload([1; 32])
}

async fn start_node() -> anyhow::Result<RpcNode> {
    tracing_logger();

    RpcNode::start(json!({
        "syncheight": HEIGHT,
        "balances": {
            holder().to_string(): {"PEG": 100_000_000_000u64, "pUSD": 300_000_000}
        },
        "issuance": {"PEG": 100_000_000_000u64, "pUSD": 300_000_000},
        "rates": {
            HEIGHT.to_string(): {"pUSD": 100_000_000, "PEG": 1_000_000}
        }
    }))
    .await
}

#[tokio::test(flavor = "multi_thread")]
pub async fn serves_ledger_queries() -> anyhow::Result<()> {
    let node = start_node().await?;

    let balances = node
        .call("get-pegnet-balances", json!({ "address": holder() }))
        .await?;
    assert_eq!(
        json!({"PEG": 100_000_000_000u64, "pUSD": 300_000_000}),
        balances["result"]
    );

    let rates = node
        .call("get-pegnet-rates", json!({ "height": HEIGHT }))
        .await?;
    assert_eq!(json!(1_000_000), rates["result"]["PEG"]);

    // 1000 PEG at $0.01 plus 3 pUSD
    let rich_list = node.call("get-rich-list", Value::Null).await?;
    assert_eq!(json!(13.0), rich_list["result"]["top100"][0]["usdequiv"]);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
pub async fn sync_status_without_factomd() -> anyhow::Result<()> {
    let node = start_node().await?;

    let status = node.call("get-sync-status", Value::Null).await?;
    assert_eq!(
        json!({"jsonrpc": "2.0", "id": 1, "result": {"syncheight": HEIGHT, "factomheight": -1}}),
        status
    );

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
pub async fn protocol_errors() -> anyhow::Result<()> {
    let node = start_node().await?;

    let unknown = node.call("get-everything", Value::Null).await?;
    assert_eq!(json!(1), unknown["id"]);
    assert_eq!(json!(-32601), unknown["error"]["code"]);

    let garbage = node.post_raw("[1, 2").await?;
    assert_eq!(Value::Null, garbage["id"]);
    assert_eq!(json!(-32700), garbage["error"]["code"]);

    let missing = node
        .call("get-pegnet-balances", json!({ "address": FactoidAddress::from_payload([2; 32]) }))
        .await?;
    assert_eq!(json!(-32808), missing["error"]["code"]);

    let positional = node.call("get-pegnet-rates", json!([HEIGHT])).await?;
    assert_eq!(json!(-32602), positional["error"]["code"]);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
pub async fn send_transaction_without_credits() -> anyhow::Result<()> {
    let node = start_node().await?;
    let params = json!({"extids": ["01"], "content": "7b7d"});

    let refused = node.call("send-transaction", params.clone()).await?;
    assert_eq!(json!(-32806), refused["error"]["code"]);
    assert_eq!(
        json!("not configured with entry credits"),
        refused["error"]["data"]
    );

    let mut dry_run = params;
    dry_run["dryrun"] = json!(true);
    let receipt = node.call("send-transaction", dry_run).await?;

    let expected = Entry {
        chain_id: TRANSACTION_CHAIN_ID,
        ext_ids: vec![vec![0x01]],
        content: b"{}".to_vec(),
    };
    assert_eq!(
        json!({"chainid": TRANSACTION_CHAIN_ID, "entryhash": expected.hash()?}),
        receipt["result"]
    );

    Ok(())
}
