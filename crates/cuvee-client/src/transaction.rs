//! Transaction construction: payload in, self-verifying envelope out.

use cuvee_crypto::{sha512_hex, SigningKey};
use cuvee_protocol::family::{FAMILY_NAME, FAMILY_VERSION};
use cuvee_protocol::{Transaction, TransactionHeader};
use rand::Rng;

use crate::address::label_address;
use crate::error::BuildError;
use crate::payload::{encode_payload, LabelRecord, Verb};

/// Build a signed transaction mutating the record's derived address.
///
/// The signer acts as its own batcher. No network or storage side effects;
/// any failure surfaces as [`BuildError`] and nothing partial is returned.
pub fn build_transaction(
    verb: Verb,
    record: &LabelRecord,
    signer: &SigningKey,
) -> Result<Transaction, BuildError> {
    if record.id.is_empty() {
        return Err(BuildError::EmptyId);
    }

    let payload = encode_payload(verb, record).map_err(|e| BuildError::Payload(e.to_string()))?;
    let address = label_address(&record.id);
    let public_key = signer.public_hex();

    let header = TransactionHeader {
        signer_public_key: public_key.clone(),
        family_name: FAMILY_NAME.into(),
        family_version: FAMILY_VERSION.into(),
        dependencies: vec![],
        nonce: rand::thread_rng().gen::<u64>().to_string(),
        batcher_public_key: public_key,
        inputs: vec![address.clone()],
        outputs: vec![address],
        payload_sha512: sha512_hex(&payload),
    };

    let header_bytes = header.to_bytes()?;
    let signature = signer.sign(&header_bytes);

    Ok(Transaction {
        header: header_bytes,
        header_signature: signature.to_hex(),
        payload,
    })
}
