pub mod ops;
pub mod router;
pub mod rpc;
