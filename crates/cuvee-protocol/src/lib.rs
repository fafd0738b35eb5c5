//! Wire types for the Cuvee ledger boundary.
//!
//! This crate defines everything both sides of the REST boundary must agree
//! on: the transaction and batch envelopes with their deterministic binary
//! encoding, the transaction family constants, the REST endpoint paths, and
//! the batch commit-status model.
//!
//! The record payload itself is deliberately *not* defined here — the client
//! and the processor each carry their own schema copy, held together by
//! interop tests.

pub mod batch;
pub mod endpoint;
pub mod error;
pub mod family;
pub mod status;
pub mod transaction;

pub use batch::{Batch, BatchHeader, BatchList};
pub use error::{ProtocolError, ProtocolResult};
pub use status::{BatchStatusResponse, CommitStatus, StateEntry, StateFetchResponse, StateListResponse, StatusEntry};
pub use transaction::{Transaction, TransactionHeader};
