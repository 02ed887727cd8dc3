use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::application::json_rpc::core::api::rpc::RpcApi;
use crate::application::json_rpc::core::error::RpcError;
use crate::application::json_rpc::core::error::RpcResult;

type HandlerFn = Box<
    dyn Fn(serde_json::Value) -> Pin<Box<dyn Future<Output = RpcResult<serde_json::Value>> + Send>>
        + Send
        + Sync,
>;

/// Method name to handler table. Every handler shares one [RpcApi].
#[allow(missing_debug_implementations)]
pub struct RpcRouter {
    routes: HashMap<&'static str, HandlerFn>,
    api: Arc<dyn RpcApi>,
}

impl RpcRouter {
    pub fn new(api: Arc<dyn RpcApi>) -> Self {
        Self {
            routes: HashMap::new(),
            api,
        }
    }

    pub fn insert<F, Fut>(&mut self, method: &'static str, handler: F)
    where
        F: Fn(Arc<dyn RpcApi>, serde_json::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RpcResult<serde_json::Value>> + Send + 'static,
    {
        let api = self.api.clone();
        self.routes.insert(
            method,
            Box::new(move |params| Box::pin(handler(api.clone(), params))),
        );
    }

    pub fn methods(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.keys().copied()
    }

    pub async fn dispatch(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> RpcResult<serde_json::Value> {
        match self.routes.get(method) {
            Some(handler) => handler(params).await,
            None => Err(RpcError::MethodNotFound),
        }
    }
}
