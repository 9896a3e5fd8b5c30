//! The XO submission client.
//!
//! [`XoClient`] turns game moves into signed batch lists, hands them to a
//! [`Gateway`], and optionally polls the ledger until the batch settles.

use crate::address::{xo_address, xo_prefix};
use crate::api::response::missing_batch;
use crate::api::{BatchStatus, Gateway, RestGateway};
use crate::config::{XoConfig, DEFAULT_POLL_INTERVAL};
use crate::crypto::Signer;
use crate::error::{XoError, XoResult};
use crate::payload::XoPayload;
use crate::transaction::{build_batch_list, build_transaction, BatchList};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// How a waited-on batch settled.
///
/// Rejection, unknown batches and timeouts are expected outcomes the caller
/// branches on, so they are values here rather than [`XoError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The batch was committed.
    Committed {
        /// Time from the start of polling until the commit was observed.
        elapsed: Duration,
    },
    /// The ledger rejected the batch.
    Invalid,
    /// The ledger does not know the batch; it was dropped or never arrived.
    Unknown,
    /// No terminal status was observed in time. The batch may still commit;
    /// resubmitting means building a new batch.
    TimedOut {
        /// How long polling ran.
        waited: Duration,
    },
}

impl SubmitOutcome {
    /// Returns true if the batch was committed.
    pub fn is_committed(&self) -> bool {
        matches!(self, SubmitOutcome::Committed { .. })
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitOutcome::Committed { elapsed } => {
                write!(
                    f,
                    "Game created in {} sec",
                    significant_digits(elapsed.as_secs_f64(), 6)
                )
            }
            SubmitOutcome::Invalid => f.write_str(
                "Error: You chose an invalid game name. Try again with a different name",
            ),
            SubmitOutcome::Unknown => f.write_str(
                "Error: Something went wrong with your game. Try again with a different name.",
            ),
            SubmitOutcome::TimedOut { .. } => f.write_str(
                "Timed out while waiting for game to be created. It may need to be resubmitted.",
            ),
        }
    }
}

/// Formats `value` to `digits` significant digits, dropping trailing zeros
/// but keeping one fractional digit in positional form ("0.6", "12.0",
/// "1.5e-05").
fn significant_digits(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value:?}");
    }
    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    // Positional form needs a fractional digit, so it stops one exponent early
    if exponent < -4 || exponent >= digits as i32 - 1 {
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.abs());
    }

    let decimals = (digits as i32 - 1 - exponent) as usize;
    let fixed = format!("{value:.decimals$}");
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// Result of [`XoClient::create`] and [`XoClient::take`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Submitted without waiting; holds the gateway's response body.
    Submitted(String),
    /// Submitted and waited on.
    Completed(SubmitOutcome),
}

/// Client for playing XO on a ledger.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use xo_client::crypto::Secp256k1PrivateKey;
/// use xo_client::{Submission, XoClient, XoConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let signer = Secp256k1PrivateKey::generate();
///     let client = XoClient::connect(XoConfig::new("localhost:8008")?, signer)?;
///
///     match client.create("game1", Some(Duration::from_secs(5))).await? {
///         Submission::Completed(outcome) => println!("{outcome}"),
///         Submission::Submitted(response) => println!("{response}"),
///     }
///
///     if let Some(game) = client.show("game1").await {
///         println!("{}", String::from_utf8_lossy(&game));
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct XoClient<G, S> {
    gateway: G,
    signer: S,
    poll_interval: Duration,
}

impl<S: Signer> XoClient<RestGateway, S> {
    /// Creates a client that talks HTTP to the gateway named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn connect(config: XoConfig, signer: S) -> XoResult<Self> {
        let poll_interval = config.poll_interval();
        let gateway = RestGateway::new(config)?;
        Ok(Self {
            gateway,
            signer,
            poll_interval,
        })
    }
}

impl<G: Gateway, S: Signer> XoClient<G, S> {
    /// Creates a client over any gateway with the default poll interval.
    pub fn new(gateway: G, signer: S) -> Self {
        Self {
            gateway,
            signer,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the interval between batch-status polls.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Returns the gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Returns the signer.
    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Creates a new game.
    ///
    /// With `wait` unset or zero the batch is only submitted; otherwise the
    /// client polls for up to `wait`.
    ///
    /// # Errors
    ///
    /// Returns an error on signing failure, transport failure or a
    /// malformed gateway response.
    pub async fn create(&self, name: &str, wait: Option<Duration>) -> XoResult<Submission> {
        self.send_move(XoPayload::create(name), wait).await
    }

    /// Marks `space` (1 to 9) in game `name` for the signer's player.
    ///
    /// # Errors
    ///
    /// Same as [`XoClient::create`].
    pub async fn take(&self, name: &str, space: u8, wait: Option<Duration>) -> XoResult<Submission> {
        self.send_move(XoPayload::take(name, space), wait).await
    }

    async fn send_move(&self, payload: XoPayload, wait: Option<Duration>) -> XoResult<Submission> {
        let game_address = xo_address(&payload.name);
        let transaction = build_transaction(payload.to_bytes(), game_address, &self.signer)?;
        let batch_list = build_batch_list(vec![transaction], &self.signer)?;

        match wait {
            Some(timeout) if !timeout.is_zero() => self
                .submit_and_wait(&batch_list, timeout)
                .await
                .map(Submission::Completed),
            _ => self.submit(&batch_list).await.map(Submission::Submitted),
        }
    }

    /// Sends `batch_list` to the gateway once, returning its response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx answer. Nothing is
    /// retried.
    pub async fn submit(&self, batch_list: &BatchList) -> XoResult<String> {
        let batch_ids = batch_list.batch_ids().join(",");
        let response = self.gateway.submit_batches(batch_list.to_bytes()).await?;
        info!(batch_ids = %batch_ids, "Submitted batch list");
        Ok(response)
    }

    /// Submits `batch_list` and polls the status of its first batch until it
    /// settles or `timeout` runs out.
    ///
    /// At least one poll is always made. Polls are `poll_interval` apart and
    /// each asks the gateway to hold the request for the remaining budget.
    ///
    /// # Errors
    ///
    /// Returns an error if `batch_list` is empty, if submission fails, or if
    /// any poll fails (transport, malformed document, or batch missing from
    /// the document). A rejected, unknown or slow batch is an `Ok` outcome.
    pub async fn submit_and_wait(
        &self,
        batch_list: &BatchList,
        timeout: Duration,
    ) -> XoResult<SubmitOutcome> {
        let batch_id = batch_list
            .batches
            .first()
            .map(|batch| batch.id().to_string())
            .ok_or_else(|| XoError::Config("batch list has no batches".into()))?;

        self.submit(batch_list).await?;

        let start = Instant::now();
        let mut polls = 0u32;
        loop {
            let remaining = timeout.saturating_sub(start.elapsed());
            let response = self.gateway.batch_status(&batch_id, remaining).await?;
            let status = response
                .status_of(&batch_id)
                .ok_or_else(|| missing_batch(&batch_id))?;
            polls += 1;
            let elapsed = start.elapsed();
            debug!(batch_id = %batch_id, %status, polls, ?elapsed, "Polled batch status");

            match status {
                BatchStatus::Committed => {
                    info!(batch_id = %batch_id, ?elapsed, polls, "Batch committed");
                    return Ok(SubmitOutcome::Committed { elapsed });
                }
                BatchStatus::Invalid => {
                    for txn in response.invalid_transactions(&batch_id) {
                        warn!(batch_id = %batch_id, txn_id = %txn.id, reason = %txn.message, "Transaction rejected");
                    }
                    warn!(batch_id = %batch_id, "Batch invalid");
                    return Ok(SubmitOutcome::Invalid);
                }
                BatchStatus::Unknown => {
                    warn!(batch_id = %batch_id, "Batch unknown to the ledger");
                    return Ok(SubmitOutcome::Unknown);
                }
                BatchStatus::Pending => {}
            }

            if elapsed >= timeout {
                return Ok(self.timed_out(&batch_id, elapsed));
            }
            tokio::time::sleep(self.poll_interval).await;
            let waited = start.elapsed();
            if waited >= timeout {
                return Ok(self.timed_out(&batch_id, waited));
            }
        }
    }

    fn timed_out(&self, batch_id: &str, waited: Duration) -> SubmitOutcome {
        warn!(batch_id = %batch_id, ?waited, "Timed out waiting for batch");
        SubmitOutcome::TimedOut { waited }
    }

    /// Returns the stored bytes of game `name`, or `None` if the game does
    /// not exist or cannot be read for any reason.
    pub async fn show(&self, name: &str) -> Option<Vec<u8>> {
        match self.read_state(name).await {
            Ok(data) => Some(data),
            Err(e) => {
                debug!(game = %name, error = %e, "Could not read game");
                None
            }
        }
    }

    /// Returns the stored bytes of every game, or `None` if they cannot be
    /// read for any reason.
    pub async fn list(&self) -> Option<Vec<Vec<u8>>> {
        match self.read_all().await {
            Ok(games) => Some(games),
            Err(e) => {
                debug!(error = %e, "Could not list games");
                None
            }
        }
    }

    /// Returns the stored bytes of game `name`, or `Ok(None)` if the gateway
    /// reports it as not found.
    ///
    /// # Errors
    ///
    /// Returns any failure other than not-found.
    pub async fn fetch_state(&self, name: &str) -> XoResult<Option<Vec<u8>>> {
        match self.read_state(name).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Returns the stored bytes of every game; empty if the gateway reports
    /// the namespace as not found.
    ///
    /// # Errors
    ///
    /// Returns any failure other than not-found.
    pub async fn fetch_all(&self) -> XoResult<Vec<Vec<u8>>> {
        match self.read_all().await {
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            other => other,
        }
    }

    async fn read_state(&self, name: &str) -> XoResult<Vec<u8>> {
        let game_address = xo_address(name);
        self.gateway.state(&game_address).await?.decode()
    }

    async fn read_all(&self) -> XoResult<Vec<Vec<u8>>> {
        self.gateway
            .state_by_prefix(&xo_prefix())
            .await?
            .decode_all()
    }
}
