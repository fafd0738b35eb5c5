//! The wine-label state transition handler.

use std::collections::HashMap;

use cuvee_protocol::family::{FAMILY_NAME, FAMILY_VERSION};
use thiserror::Error;

use crate::address::{label_address, namespace_prefix};
use crate::payload::{decode_payload, encode_record, LabelRecord};
use crate::state::{State, StateError};

/// Terminal outcomes of applying one transaction.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Semantic rejection of this transaction: malformed payload, missing
    /// id, or unknown verb. Never retriable, never a crash.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Infrastructure inconsistency, distinct from bad input and escalated
    /// loudly.
    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<StateError> for ApplyError {
    fn from(e: StateError) -> Self {
        Self::InternalError(e.to_string())
    }
}

/// Single-shot validator/reducer over `(transaction payload, prior state)`.
///
/// Invoked once per transaction by the dispatch runtime; performs exactly
/// one state read and at most one state write, both at the record's derived
/// address.
pub struct LabelHandler {
    namespace: String,
}

impl Default for LabelHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelHandler {
    pub fn new() -> Self {
        Self {
            namespace: namespace_prefix(),
        }
    }

    /// Family name this handler registers under.
    pub fn family_name(&self) -> &'static str {
        FAMILY_NAME
    }

    /// Family versions this handler accepts.
    pub fn family_versions(&self) -> Vec<String> {
        vec![FAMILY_VERSION.to_string()]
    }

    /// Address namespaces this handler owns.
    pub fn namespaces(&self) -> Vec<String> {
        vec![self.namespace.clone()]
    }

    /// Validate and fold one transaction payload into ledger state.
    pub fn apply<S: State + ?Sized>(&self, payload: &[u8], state: &S) -> Result<(), ApplyError> {
        if payload.is_empty() {
            return Err(ApplyError::InvalidTransaction(
                "must contain payload".into(),
            ));
        }

        let decoded = decode_payload(payload).map_err(|e| {
            ApplyError::InvalidTransaction(format!("malformed payload: {e}"))
        })?;

        if decoded.record.id.is_empty() {
            return Err(ApplyError::InvalidTransaction("missing label id".into()));
        }

        let verb = decoded.verb.as_str();
        if verb != "set" && verb != "delete" {
            return Err(ApplyError::InvalidTransaction(format!(
                "invalid verb: {verb}"
            )));
        }

        let address = label_address(&decoded.record.id);
        let prior = state.get(std::slice::from_ref(&address))?;
        let existed = prior.contains_key(&address);

        // Coordinates are written in declared order; delete tombstones the
        // slot whether or not prior state exists.
        let next = if verb == "delete" {
            LabelRecord::tombstone()
        } else {
            decoded.record.clone()
        };
        let data = encode_record(&next).map_err(|e| {
            ApplyError::InternalError(format!("state encoding failed: {e}"))
        })?;

        tracing::debug!(
            id = %decoded.record.id,
            %verb,
            %address,
            prior_exists = existed,
            "applying label mutation"
        );

        let written = state.set(HashMap::from([(address.clone(), data)]))?;
        if written.is_empty() {
            tracing::error!(%address, "state store acknowledged no writes");
            return Err(ApplyError::InternalError(
                "no addresses in set response".into(),
            ));
        }
        Ok(())
    }
}
