//! Client pipeline for the Cuvee wine-label ledger.
//!
//! A label mutation travels through this crate as follows: the record and
//! verb are encoded into a CBOR payload, the target address is derived from
//! the record id, the payload is wrapped in a signed transaction, the
//! transaction in a signed batch, and the batch is POSTed to the ledger's
//! REST boundary. Commitment can then be awaited with a bounded poll.
//!
//! The payload schema and address derivation here are intentionally
//! independent copies of the ones in `cuvee-processor`; the two sides share
//! only the wire envelope types from `cuvee-protocol` and are held identical
//! by interop tests.

pub mod address;
pub mod batch;
pub mod client;
pub mod error;
pub mod key;
pub mod payload;
pub mod transaction;

pub use address::{label_address, namespace_prefix};
pub use batch::build_batch;
pub use client::{LabelClient, MutationOutcome, SubmissionReceipt, DEFAULT_URL};
pub use error::{BuildError, ClientError, ClientResult};
pub use payload::{DecodeError, LabelPayload, LabelRecord, Verb};
pub use transaction::build_transaction;
