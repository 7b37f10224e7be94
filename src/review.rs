//! Review session over external storage and a remote verdict action
//!
//! Storage and the remote action are collaborators behind traits. The
//! session fetches raw messages, hands them to the parser, and keeps the set
//! of keys still waiting for a verdict.

use crate::error::{Result, ReviewError};
use crate::parser::{parse_email, parse_summary};
use crate::types::{EmailDocument, MessageSummary, ParseOptions, Verdict};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Source of raw messages keyed by an opaque identifier
#[allow(async_fn_in_trait)]
pub trait MessageStore {
    /// Keys of all available messages
    async fn list_keys(&self) -> Result<Vec<String>>;

    /// Raw message text for `key`
    async fn get(&self, key: &str) -> Result<String>;
}

/// Remote action that records a verdict
#[allow(async_fn_in_trait)]
pub trait ActionInvoker {
    /// Send a JSON payload and return the raw response body
    async fn invoke(&self, payload: String) -> Result<String>;
}

/// Payload sent to the verdict action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictPayload {
    pub key: String,
    pub verdict: Verdict,
    pub comment: String,
}

/// Response of the verdict action
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub error: Option<String>,
}

/// Pending review queue over a store and an action endpoint
pub struct ReviewSession<S, A> {
    store: S,
    actions: A,
    options: ParseOptions,
    pending: Vec<String>,
}

impl<S: MessageStore, A: ActionInvoker> ReviewSession<S, A> {
    pub const fn new(store: S, actions: A, options: ParseOptions) -> Self {
        Self {
            store,
            actions,
            options,
            pending: Vec::new(),
        }
    }

    /// Keys still waiting for a verdict
    #[must_use]
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Reload the pending keys from the store
    pub async fn refresh(&mut self) -> Result<&[String]> {
        self.pending = self.store.list_keys().await.inspect_err(|e| {
            warn!("listing messages failed: {e}");
        })?;
        debug!("{} messages pending review", self.pending.len());
        Ok(&self.pending)
    }

    /// Fetch and fully decode one message
    pub async fn open(&self, key: &str) -> Result<EmailDocument> {
        let raw = self.fetch(key).await?;
        Ok(parse_email(&raw, &self.options))
    }

    /// Fetch every pending message and read its list row.
    ///
    /// Failures are reported per key so one broken message does not hide
    /// the others.
    pub async fn summaries(&self) -> Vec<(String, Result<MessageSummary>)> {
        let mut rows = Vec::with_capacity(self.pending.len());
        for key in &self.pending {
            let row = self
                .fetch(key)
                .await
                .map(|raw| parse_summary(&raw, &self.options));
            rows.push((key.clone(), row));
        }
        rows
    }

    /// Submit a verdict and drop the key from the pending set on success
    pub async fn submit(&mut self, key: &str, verdict: Verdict, comment: &str) -> Result<()> {
        let payload = VerdictPayload {
            key: key.to_string(),
            verdict,
            comment: comment.to_string(),
        };
        let body = serde_json::to_string(&payload)?;

        let response = self.actions.invoke(body).await.inspect_err(|e| {
            warn!("submitting verdict for {key} failed: {e}");
        })?;
        let response: ActionResponse = serde_json::from_str(&response)
            .map_err(|e| ReviewError::MalformedResponse(e.to_string()))?;

        if let Some(reason) = response.error.filter(|r| !r.trim().is_empty()) {
            warn!("verdict for {key} rejected: {reason}");
            return Err(ReviewError::Rejected {
                key: key.to_string(),
                reason,
            });
        }

        self.pending.retain(|pending| pending != key);
        debug!("recorded {verdict} for {key}");
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<String> {
        self.store.get(key).await.map_err(|e| match e {
            err @ ReviewError::Retrieval { .. } => err,
            other => ReviewError::Retrieval {
                key: key.to_string(),
                reason: other.to_string(),
            },
        })
    }
}
