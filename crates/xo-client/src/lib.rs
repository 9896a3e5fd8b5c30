//! # xo-client
//!
//! Client library for playing XO (tic-tac-toe) on a batch ledger.
//!
//! Moves are encoded as CSV payloads, addressed by a hash of the game name
//! under the `xo` namespace, wrapped into signed protobuf transactions and
//! batches, and submitted to a node's REST gateway. The client can wait for
//! a batch to settle and read game state back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use xo_client::crypto::Secp256k1PrivateKey;
//! use xo_client::{XoClient, XoConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let signer = Secp256k1PrivateKey::from_key_file("/home/alice/.sawtooth/keys/alice.priv")?;
//!     let client = XoClient::connect(XoConfig::new("localhost:8008")?, signer)?;
//!
//!     client.create("game1", Some(Duration::from_secs(5))).await?;
//!     client.take("game1", 5, Some(Duration::from_secs(5))).await?;
//!
//!     for game in client.list().await.unwrap_or_default() {
//!         println!("{}", String::from_utf8_lossy(&game));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`address`] - state address derivation
//! - [`payload`] - move payload encoding
//! - [`transaction`] - transaction and batch assembly
//! - [`crypto`] - signers and hashing
//! - [`api`] - the gateway boundary and its HTTP implementation
//! - [`client`] - submission, commit polling and reads

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod address;
pub mod api;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod payload;
pub mod transaction;

pub use client::{SubmitOutcome, Submission, XoClient};
pub use config::XoConfig;
pub use error::{XoError, XoResult};
