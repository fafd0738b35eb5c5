use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};

/// Transaction header, signed as a whole by the client.
///
/// The header is serialized with bincode before signing; field order is part
/// of the wire contract, so fields must not be reordered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    /// Hex public key of the transaction signer.
    pub signer_public_key: String,
    /// Transaction family this header targets.
    pub family_name: String,
    pub family_version: String,
    /// Header-signature ids of transactions this one depends on. Always
    /// empty for label mutations.
    pub dependencies: Vec<String>,
    /// Random per-transaction nonce. Uniqueness matters, unpredictability
    /// does not.
    pub nonce: String,
    /// Hex public key of the batch signer (same key as the signer here).
    pub batcher_public_key: String,
    /// Addresses the transaction may read.
    pub inputs: Vec<String>,
    /// Addresses the transaction may write.
    pub outputs: Vec<String>,
    /// Lowercase SHA-512 hex of the payload bytes.
    pub payload_sha512: String,
}

impl TransactionHeader {
    /// Deterministic header bytes, the exact message that gets signed.
    pub fn to_bytes(&self) -> ProtocolResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ProtocolError::Serialization(e.to_string()))
    }

    pub fn from_bytes(data: &[u8]) -> ProtocolResult<Self> {
        bincode::deserialize(data).map_err(|e| ProtocolError::Deserialization(e.to_string()))
    }
}

/// A signed transaction: serialized header, its signature, and the opaque
/// payload the handler will decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub header: Vec<u8>,
    /// Hex signature over `header`; doubles as the transaction id.
    pub header_signature: String,
    pub payload: Vec<u8>,
}
