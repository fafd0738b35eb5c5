use thiserror::Error;

use crate::payload::DecodeError;

/// Local construction/signing failures. Fatal to the call, never retried.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("record id must not be empty")]
    EmptyId,

    #[error("batch requires at least one transaction")]
    EmptyBatch,

    #[error("payload encoding failed: {0}")]
    Payload(String),

    #[error("header serialization failed: {0}")]
    Header(#[from] cuvee_protocol::ProtocolError),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("failed to reach REST endpoint: {0}")]
    Transport(String),

    #[error("endpoint rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("no such key: {0}")]
    NotFound(String),

    #[error("state entry decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("unexpected response shape: {0}")]
    InvalidResponse(String),

    #[error("key material unavailable: {0}")]
    Key(#[from] cuvee_crypto::KeyError),
}

pub type ClientResult<T> = Result<T, ClientError>;
