//! Submission and confirmation client for the ledger's REST boundary.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cuvee_crypto::SigningKey;
use cuvee_protocol::endpoint::{endpoints, CONTENT_TYPE_OCTET_STREAM};
use cuvee_protocol::{BatchList, BatchStatusResponse, CommitStatus, StateFetchResponse, StateListResponse};
use tokio::time::Instant;

use crate::address::{label_address, namespace_prefix};
use crate::batch::build_batch;
use crate::error::{BuildError, ClientError, ClientResult};
use crate::payload::{decode_record, LabelRecord, Verb};
use crate::transaction::build_transaction;

/// Default REST endpoint of a local ledger node.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8008";

/// Pause between confirmation polls.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Receipt for an accepted batch submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Header signature of the submitted batch; the handle for status polls.
    pub batch_id: String,
}

/// Result of a submitted mutation, including the last observed commit status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationOutcome {
    pub batch_id: String,
    pub status: CommitStatus,
}

/// A label client bound to one REST endpoint and one signer. No globals;
/// multiple clients may submit concurrently against the same ledger.
pub struct LabelClient {
    base_url: String,
    http: reqwest::Client,
    signer: SigningKey,
}

impl LabelClient {
    pub fn new(url: impl Into<String>, signer: SigningKey) -> Self {
        Self {
            base_url: normalize_url(url.into()),
            http: reqwest::Client::new(),
            signer,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- Mutations ----

    /// Create or overwrite a record, waiting up to `wait` for commitment.
    pub async fn set(&self, record: &LabelRecord, wait: Duration) -> ClientResult<MutationOutcome> {
        self.send_mutation(Verb::Set, record, wait).await
    }

    /// Tombstone a record by id, waiting up to `wait` for commitment.
    pub async fn delete(&self, id: &str, wait: Duration) -> ClientResult<MutationOutcome> {
        let record = LabelRecord {
            id: id.to_string(),
            ..LabelRecord::default()
        };
        self.send_mutation(Verb::Delete, &record, wait).await
    }

    async fn send_mutation(
        &self,
        verb: Verb,
        record: &LabelRecord,
        wait: Duration,
    ) -> ClientResult<MutationOutcome> {
        let transaction = build_transaction(verb, record, &self.signer)?;
        let batch_list = build_batch(vec![transaction], &self.signer)?;
        let receipt = self.submit(&batch_list).await?;
        tracing::debug!(batch_id = %receipt.batch_id, %verb, id = %record.id, "batch submitted");
        let status = self.await_commit(&receipt.batch_id, wait).await?;
        Ok(MutationOutcome {
            batch_id: receipt.batch_id,
            status,
        })
    }

    // ---- Submission & confirmation ----

    /// POST a serialized batch list to the submission endpoint.
    pub async fn submit(&self, batch_list: &BatchList) -> ClientResult<SubmissionReceipt> {
        let batch_id = batch_list
            .first_batch_id()
            .ok_or(BuildError::EmptyBatch)?
            .to_string();
        let body = batch_list.to_bytes().map_err(BuildError::Header)?;

        let url = format!("{}{}", self.base_url, endpoints::BATCHES);
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_OCTET_STREAM)
            .body(body)
            .send()
            .await
            .map_err(transport)?;
        ensure_accepted(response, &batch_id).await?;

        Ok(SubmissionReceipt { batch_id })
    }

    /// Poll the status endpoint until the batch settles or `timeout` elapses,
    /// returning the last observed status.
    ///
    /// A zero timeout performs no status call at all and reports `Unknown`.
    pub async fn await_commit(
        &self,
        batch_id: &str,
        timeout: Duration,
    ) -> ClientResult<CommitStatus> {
        if timeout.is_zero() {
            return Ok(CommitStatus::Unknown);
        }

        let deadline = Instant::now() + timeout;
        let mut status = CommitStatus::Pending;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(status);
            }
            status = self.fetch_status(batch_id, remaining.as_secs().max(1)).await?;
            if status.is_settled() {
                return Ok(status);
            }
            let pause = POLL_INTERVAL.min(deadline.saturating_duration_since(Instant::now()));
            if pause.is_zero() {
                return Ok(status);
            }
            tokio::time::sleep(pause).await;
        }
    }

    async fn fetch_status(&self, batch_id: &str, wait_secs: u64) -> ClientResult<CommitStatus> {
        let url = format!(
            "{}{}?id={}&wait={}",
            self.base_url,
            endpoints::BATCH_STATUSES,
            batch_id,
            wait_secs
        );
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let body = ensure_accepted(response, batch_id).await?;

        let parsed: BatchStatusResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        let entry = parsed
            .data
            .first()
            .ok_or_else(|| ClientError::InvalidResponse("empty status data".into()))?;
        Ok(CommitStatus::parse(&entry.status))
    }

    // ---- Queries ----

    /// List every record under the family namespace.
    ///
    /// A malformed entry fails the listing with its decode error rather than
    /// being skipped silently.
    pub async fn list(&self) -> ClientResult<Vec<LabelRecord>> {
        let url = format!(
            "{}{}?address={}",
            self.base_url,
            endpoints::STATE,
            namespace_prefix()
        );
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let body = ensure_accepted(response, "state listing").await?;

        let parsed: StateListResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        let mut records = Vec::with_capacity(parsed.data.len());
        for entry in &parsed.data {
            let bytes = BASE64
                .decode(&entry.data)
                .map_err(|e| ClientError::InvalidResponse(format!("bad base64: {e}")))?;
            records.push(decode_record(&bytes)?);
        }
        Ok(records)
    }

    /// Fetch the record stored at the id's derived address.
    pub async fn show(&self, id: &str) -> ClientResult<LabelRecord> {
        let url = format!(
            "{}{}/{}",
            self.base_url,
            endpoints::STATE,
            label_address(id)
        );
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let body = ensure_accepted(response, id).await?;

        let parsed: StateFetchResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        let bytes = BASE64
            .decode(&parsed.data)
            .map_err(|e| ClientError::InvalidResponse(format!("bad base64: {e}")))?;
        Ok(decode_record(&bytes)?)
    }
}

fn transport(e: reqwest::Error) -> ClientError {
    ClientError::Transport(e.to_string())
}

/// Map the REST status code onto the error taxonomy: 404 means "no such
/// key", any other non-2xx is a rejection. Returns the response body.
async fn ensure_accepted(response: reqwest::Response, name: &str) -> ClientResult<String> {
    let status = response.status();
    if status.as_u16() == 404 {
        return Err(ClientError::NotFound(name.to_string()));
    }
    let body = response.text().await.map_err(transport)?;
    if !status.is_success() {
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(body)
}

fn normalize_url(url: String) -> String {
    let with_scheme = if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        format!("http://{url}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_gains_scheme_when_missing() {
        let client = LabelClient::new("127.0.0.1:8008", SigningKey::generate());
        assert_eq!(client.base_url(), "http://127.0.0.1:8008");
    }

    #[test]
    fn url_keeps_scheme_and_drops_trailing_slash() {
        let client = LabelClient::new("https://ledger.example/", SigningKey::generate());
        assert_eq!(client.base_url(), "https://ledger.example");
    }

    #[tokio::test]
    async fn zero_wait_skips_status_polling() {
        // Unroutable URL: any HTTP call would fail, so success proves no call.
        let client = LabelClient::new("http://192.0.2.1:1", SigningKey::generate());
        let status = client.await_commit("some-batch", Duration::ZERO).await.unwrap();
        assert_eq!(status, CommitStatus::Unknown);
    }
}
