//! Access to a ledger node's REST gateway.
//!
//! - [`Gateway`] - the request/response boundary the client is written against
//! - [`RestGateway`] - HTTP implementation on `reqwest`
//! - [`response`] - the documents the gateway answers with

pub mod gateway;
pub mod response;
pub mod rest;

pub use gateway::Gateway;
pub use response::{
    BatchStatus, BatchStatusResponse, StateEntry, StateListResponse, StateResponse,
};
pub use rest::RestGateway;
