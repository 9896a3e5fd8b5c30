//! Integration tests for the XO client.
//!
//! ## Test Categories
//!
//! - **behavioral**: the public API against a mocked gateway, no network access
//! - **e2e**: against a running ledger node
//!
//! ## Running Tests
//!
//! ```bash
//! # Unit + behavioral tests (default)
//! cargo test -p xo-client
//!
//! # Include E2E tests (requires a node with the XO transaction processor)
//! cargo test -p xo-client --features e2e -- --ignored
//! ```

mod behavioral;

#[cfg(feature = "e2e")]
mod e2e;
