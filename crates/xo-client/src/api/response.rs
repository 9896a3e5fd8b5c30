//! Gateway response documents.
//!
//! The gateway answers with YAML-compatible documents (JSON is accepted
//! as well) whose payload sits under a `data` key.

use crate::error::{XoError, XoResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Commit status of a batch, as reported by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    /// Received but not yet committed.
    Pending,
    /// Committed to the chain.
    Committed,
    /// Rejected by validation.
    Invalid,
    /// Not known to the node (dropped or never received).
    Unknown,
}

impl BatchStatus {
    /// Returns the status as the ledger spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Pending => "PENDING",
            BatchStatus::Committed => "COMMITTED",
            BatchStatus::Invalid => "INVALID",
            BatchStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `GET batch_status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchStatusResponse {
    /// Statuses of the requested batches.
    pub data: BatchStatuses,
}

/// The `data` of a batch status response.
///
/// Older gateways answer with a map from batch id to status; newer ones
/// with a list of entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BatchStatuses {
    /// `{ "<batch id>": "COMMITTED" }`
    ById(HashMap<String, BatchStatus>),
    /// `[ { "id": "<batch id>", "status": "COMMITTED" } ]`
    Entries(Vec<BatchStatusEntry>),
}

/// One entry of the list form of [`BatchStatuses`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchStatusEntry {
    /// The batch id.
    pub id: String,
    /// The batch status.
    pub status: BatchStatus,
    /// Transactions that failed validation, for invalid batches.
    #[serde(default)]
    pub invalid_transactions: Vec<InvalidTransaction>,
}

/// A transaction the ledger rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvalidTransaction {
    /// The transaction id.
    pub id: String,
    /// Rejection reason given by the transaction processor.
    #[serde(default)]
    pub message: String,
}

impl BatchStatusResponse {
    /// Builds a map-form response holding a single batch.
    pub fn single(batch_id: impl Into<String>, status: BatchStatus) -> Self {
        Self {
            data: BatchStatuses::ById(HashMap::from([(batch_id.into(), status)])),
        }
    }

    /// Parses a response document.
    ///
    /// # Errors
    ///
    /// Returns [`XoError::Yaml`] if the document does not match.
    pub fn from_document(document: &str) -> XoResult<Self> {
        Ok(serde_yaml::from_str(document)?)
    }

    /// Returns the status of `batch_id`, if the response mentions it.
    pub fn status_of(&self, batch_id: &str) -> Option<BatchStatus> {
        match &self.data {
            BatchStatuses::ById(statuses) => statuses.get(batch_id).copied(),
            BatchStatuses::Entries(entries) => entries
                .iter()
                .find(|entry| entry.id == batch_id)
                .map(|entry| entry.status),
        }
    }

    /// Returns rejection reasons recorded for `batch_id`.
    pub fn invalid_transactions(&self, batch_id: &str) -> &[InvalidTransaction] {
        match &self.data {
            BatchStatuses::ById(_) => &[],
            BatchStatuses::Entries(entries) => entries
                .iter()
                .find(|entry| entry.id == batch_id)
                .map(|entry| entry.invalid_transactions.as_slice())
                .unwrap_or(&[]),
        }
    }
}

/// Response of `GET state/{address}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateResponse {
    /// Base64 encoded state entry.
    pub data: String,
    /// Block the state was read at.
    #[serde(default)]
    pub head: Option<String>,
}

impl StateResponse {
    /// Parses a response document.
    ///
    /// # Errors
    ///
    /// Returns [`XoError::Yaml`] if the document does not match.
    pub fn from_document(document: &str) -> XoResult<Self> {
        Ok(serde_yaml::from_str(document)?)
    }

    /// Decodes the entry bytes.
    ///
    /// # Errors
    ///
    /// Returns [`XoError::Base64`] if `data` is not valid base64.
    pub fn decode(&self) -> XoResult<Vec<u8>> {
        Ok(base64::decode(&self.data)?)
    }
}

/// Response of `GET state?address={prefix}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateListResponse {
    /// Entries under the requested prefix.
    pub data: Vec<StateEntry>,
    /// Block the state was read at.
    #[serde(default)]
    pub head: Option<String>,
    /// Link to this page of results.
    #[serde(default)]
    pub link: Option<String>,
}

/// One entry of a [`StateListResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateEntry {
    /// State address of the entry.
    pub address: String,
    /// Base64 encoded entry.
    pub data: String,
}

impl StateEntry {
    /// Decodes the entry bytes.
    ///
    /// # Errors
    ///
    /// Returns [`XoError::Base64`] if `data` is not valid base64.
    pub fn decode(&self) -> XoResult<Vec<u8>> {
        Ok(base64::decode(&self.data)?)
    }
}

impl StateListResponse {
    /// Parses a response document.
    ///
    /// # Errors
    ///
    /// Returns [`XoError::Yaml`] if the document does not match.
    pub fn from_document(document: &str) -> XoResult<Self> {
        Ok(serde_yaml::from_str(document)?)
    }

    /// Decodes every entry; fails if any entry is not valid base64.
    ///
    /// # Errors
    ///
    /// Returns [`XoError::Base64`] on the first undecodable entry.
    pub fn decode_all(&self) -> XoResult<Vec<Vec<u8>>> {
        self.data.iter().map(StateEntry::decode).collect()
    }
}

/// Returns an error describing a batch missing from a status response.
pub(crate) fn missing_batch(batch_id: &str) -> XoError {
    XoError::protocol(format!("batch {batch_id} missing from status response"))
}
