//! State transition handler for the Cuvee wine-label ledger.
//!
//! The surrounding dispatch runtime hands this crate one decoded transaction
//! payload at a time together with a scoped state-access object. The handler
//! validates the payload, re-derives the record's address, and folds the
//! mutation into ledger state — one read, at most one write, both at the
//! single derived address.
//!
//! The payload schema and address derivation here are independent copies of
//! the client's; interop tests in `tests/` hold the two byte-identical.

pub mod address;
pub mod handler;
pub mod payload;
pub mod state;

pub use address::{label_address, namespace_prefix};
pub use handler::{ApplyError, LabelHandler};
pub use payload::{DecodeError, LabelPayload, LabelRecord};
pub use state::{InMemoryState, State, StateError};
