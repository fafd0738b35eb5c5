//! Batch construction: signed transactions in, signed submission envelope out.

use cuvee_crypto::SigningKey;
use cuvee_protocol::{Batch, BatchHeader, BatchList, Transaction};

use crate::error::BuildError;

/// Wrap transactions in a signed batch, ready for submission.
///
/// The batch header lists transaction ids in batch order; the transactions
/// themselves are carried unchanged.
pub fn build_batch(
    transactions: Vec<Transaction>,
    signer: &SigningKey,
) -> Result<BatchList, BuildError> {
    if transactions.is_empty() {
        return Err(BuildError::EmptyBatch);
    }

    let header = BatchHeader {
        signer_public_key: signer.public_hex(),
        transaction_ids: transactions
            .iter()
            .map(|t| t.header_signature.clone())
            .collect(),
    };
    let header_bytes = header.to_bytes()?;
    let signature = signer.sign(&header_bytes);

    Ok(BatchList {
        batches: vec![Batch {
            header: header_bytes,
            header_signature: signature.to_hex(),
            transactions,
        }],
    })
}
