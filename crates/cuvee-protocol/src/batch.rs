use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};
use crate::transaction::Transaction;

/// Batch header, signed as a whole by the batcher key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchHeader {
    /// Hex public key of the batch signer.
    pub signer_public_key: String,
    /// Header signatures of the contained transactions, in batch order.
    pub transaction_ids: Vec<String>,
}

impl BatchHeader {
    /// Deterministic header bytes, the exact message that gets signed.
    pub fn to_bytes(&self) -> ProtocolResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ProtocolError::Serialization(e.to_string()))
    }

    pub fn from_bytes(data: &[u8]) -> ProtocolResult<Self> {
        bincode::deserialize(data).map_err(|e| ProtocolError::Deserialization(e.to_string()))
    }
}

/// A signed group of transactions, submitted atomically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub header: Vec<u8>,
    /// Hex signature over `header`; doubles as the batch id.
    pub header_signature: String,
    pub transactions: Vec<Transaction>,
}

/// The envelope POSTed to the batch-submission endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchList {
    pub batches: Vec<Batch>,
}

impl BatchList {
    /// Serialize for the octet-stream request body.
    pub fn to_bytes(&self) -> ProtocolResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ProtocolError::Serialization(e.to_string()))
    }

    pub fn from_bytes(data: &[u8]) -> ProtocolResult<Self> {
        bincode::deserialize(data).map_err(|e| ProtocolError::Deserialization(e.to_string()))
    }

    /// The id of the first batch, used as the submission handle.
    pub fn first_batch_id(&self) -> Option<&str> {
        self.batches.first().map(|b| b.header_signature.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_list() -> BatchList {
        let transaction = Transaction {
            header: vec![1, 2, 3],
            header_signature: "txsig".into(),
            payload: vec![9, 9],
        };
        let header = BatchHeader {
            signer_public_key: "ab".into(),
            transaction_ids: vec!["txsig".into()],
        };
        BatchList {
            batches: vec![Batch {
                header: header.to_bytes().unwrap(),
                header_signature: "batchsig".into(),
                transactions: vec![transaction],
            }],
        }
    }

    #[test]
    fn batch_list_roundtrip() {
        let bl = batch_list();
        let bytes = bl.to_bytes().unwrap();
        assert_eq!(BatchList::from_bytes(&bytes).unwrap(), bl);
    }

    #[test]
    fn first_batch_id() {
        assert_eq!(batch_list().first_batch_id(), Some("batchsig"));
        assert_eq!(BatchList { batches: vec![] }.first_batch_id(), None);
    }

    #[test]
    fn header_order_matches_transaction_order() {
        let bl = batch_list();
        let header = BatchHeader::from_bytes(&bl.batches[0].header).unwrap();
        let tx_ids: Vec<_> = bl.batches[0]
            .transactions
            .iter()
            .map(|t| t.header_signature.clone())
            .collect();
        assert_eq!(header.transaction_ids, tx_ids);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(BatchList::from_bytes(&[0xff; 4]).is_err());
    }
}
