//! The request/response boundary between the client and a ledger node.

use crate::address::StateAddress;
use crate::api::response::{BatchStatusResponse, StateListResponse, StateResponse};
use crate::error::XoResult;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Types that implement this trait carry requests to a ledger node's REST
/// gateway. [`crate::api::RestGateway`] talks HTTP; tests substitute
/// in-memory fakes.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Submits a serialized [`crate::transaction::BatchList`], returning the
    /// gateway's raw response body.
    async fn submit_batches(&self, body: Vec<u8>) -> XoResult<String>;

    /// Fetches the commit status of `batch_id`. The gateway may hold the
    /// request for up to `wait` before answering.
    async fn batch_status(&self, batch_id: &str, wait: Duration) -> XoResult<BatchStatusResponse>;

    /// Fetches the state entry at `address`.
    async fn state(&self, address: &StateAddress) -> XoResult<StateResponse>;

    /// Fetches every state entry whose address starts with `prefix`.
    async fn state_by_prefix(&self, prefix: &str) -> XoResult<StateListResponse>;
}

#[async_trait]
impl<G: Gateway + ?Sized> Gateway for Arc<G> {
    async fn submit_batches(&self, body: Vec<u8>) -> XoResult<String> {
        (**self).submit_batches(body).await
    }

    async fn batch_status(&self, batch_id: &str, wait: Duration) -> XoResult<BatchStatusResponse> {
        (**self).batch_status(batch_id, wait).await
    }

    async fn state(&self, address: &StateAddress) -> XoResult<StateResponse> {
        (**self).state(address).await
    }

    async fn state_by_prefix(&self, prefix: &str) -> XoResult<StateListResponse> {
        (**self).state_by_prefix(prefix).await
    }
}
