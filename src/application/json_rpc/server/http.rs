use std::sync::Arc;

use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use tokio::net::TcpListener;
use tracing::debug;
use tracing::info;

use crate::application::json_rpc::core::api::ops::RpcMethods;
use crate::application::json_rpc::core::api::router::RpcRouter;
use crate::application::json_rpc::core::api::rpc::RpcApi;
use crate::application::json_rpc::core::error::RpcError;
use crate::application::json_rpc::core::error::RpcRequest;
use crate::application::json_rpc::core::error::RpcResponse;
use crate::application::json_rpc::server::rpc::RpcServer;

impl RpcServer {
    /// Serves JSON-RPC 2.0 on `POST /` until the listener fails.
    ///
    /// The `method` field of the body selects the method by its wire name,
    /// e.g. `get-pegnet-balances`.
    pub async fn serve(&self, listener: TcpListener) -> anyhow::Result<()> {
        let api: Arc<dyn RpcApi> = Arc::new(self.clone());
        let router = RpcMethods::new_router(api);

        let app = Router::new()
            .route("/", post(Self::rpc_handler))
            .with_state(Arc::new(router));

        info!("serving JSON-RPC on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .await
            .context("JSON-RPC server stopped")
    }

    /// Handles one JSON-RPC request.
    ///
    /// A body that is not a request object gets a `Parse error` with a null
    /// id. A `jsonrpc` version other than `"2.0"` gets `Invalid Request`.
    ///
    /// Request:
    /// ```json
    /// {"jsonrpc": "2.0", "method": "get-sync-status", "id": 1}
    /// ```
    ///
    /// Response:
    /// ```json
    /// {"jsonrpc": "2.0", "id": 1, "result": {"syncheight": 210000, "factomheight": 210001}}
    /// ```
    pub(crate) async fn rpc_handler(
        State(router): State<Arc<RpcRouter>>,
        body: Result<Json<RpcRequest>, JsonRejection>,
    ) -> Json<RpcResponse> {
        let request = match body {
            Ok(Json(request)) => request,
            Err(rejection) => {
                debug!("rejected JSON-RPC body: {rejection}");
                return Json(RpcResponse::error(None, RpcError::ParseError));
            }
        };

        if request
            .jsonrpc
            .as_deref()
            .is_some_and(|version| version != RpcResponse::VERSION)
        {
            return Json(RpcResponse::error(request.id, RpcError::InvalidRequest));
        }

        let response = match router.dispatch(&request.method, request.params).await {
            Ok(result) => RpcResponse::success(request.id, result),
            Err(error) => RpcResponse::error(request.id, error),
        };

        Json(response)
    }
}
