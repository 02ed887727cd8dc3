use std::sync::Arc;

use serde::Serialize;
use strum::EnumIter;
use strum::EnumString;
use strum::IntoEnumIterator;
use strum::IntoStaticStr;

use crate::application::json_rpc::core::api::router::RpcRouter;
use crate::application::json_rpc::core::api::rpc::RpcApi;
use crate::application::json_rpc::core::error::RpcError;
use crate::application::json_rpc::core::error::RpcResult;
use crate::application::json_rpc::core::model::params::decode_params;
use crate::application::json_rpc::core::model::params::expect_no_params;

/// Every method the server answers, by wire name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum RpcMethods {
    GetRichList,
    GetTransactions,
    GetTransactionStatus,
    GetTransaction,
    GetTransactionEntry,
    GetPegnetBalances,
    GetPegnetIssuance,
    GetPegnetRates,
    GetSyncStatus,
    SendTransaction,
}

fn encode<T: Serialize>(method: &str, result: T) -> RpcResult<serde_json::Value> {
    serde_json::to_value(result).map_err(|e| RpcError::internal(method, e))
}

/// Registers a handler that checks the params, calls `$call` on the api and
/// encodes its result. `no_params` methods reject any payload; the others
/// decode theirs from the argument type of `$call`.
macro_rules! route {
    ($router:expr, $name:expr, $call:ident, no_params) => {
        $router.insert($name, move |api: Arc<dyn RpcApi>, params| async move {
            expect_no_params(&params)?;
            encode($name, api.$call().await?)
        })
    };
    ($router:expr, $name:expr, $call:ident, infallible) => {
        $router.insert($name, move |api: Arc<dyn RpcApi>, params| async move {
            expect_no_params(&params)?;
            encode($name, api.$call().await)
        })
    };
    ($router:expr, $name:expr, $call:ident) => {
        $router.insert($name, move |api: Arc<dyn RpcApi>, params| async move {
            let params = decode_params(params, &api.transaction_chain())?;
            encode($name, api.$call(params).await?)
        })
    };
}

impl RpcMethods {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn new_router(api: Arc<dyn RpcApi>) -> RpcRouter {
        let mut router = RpcRouter::new(api);

        for method in Self::iter() {
            let name = method.name();
            match method {
                Self::GetRichList => route!(router, name, get_rich_list, no_params),
                Self::GetTransactions => route!(router, name, get_transactions),
                Self::GetTransactionStatus => route!(router, name, get_transaction_status),
                Self::GetTransaction => route!(router, name, get_transaction),
                Self::GetTransactionEntry => route!(router, name, get_transaction_entry),
                Self::GetPegnetBalances => route!(router, name, get_pegnet_balances),
                Self::GetPegnetIssuance => route!(router, name, get_pegnet_issuance, no_params),
                Self::GetPegnetRates => route!(router, name, get_pegnet_rates),
                Self::GetSyncStatus => route!(router, name, get_sync_status, infallible),
                Self::SendTransaction => route!(router, name, send_transaction),
            }
        }

        router
    }
}
