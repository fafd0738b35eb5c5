//! Cryptographic primitives for the Cuvee wine-label ledger.
//!
//! Provides Ed25519 signing/verification, the SHA-512 hex digest used for
//! addressing and payload hashing, and keyfile load-or-generate handling.
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod digest;
pub mod keyfile;
pub mod signer;

pub use digest::sha512_hex;
pub use keyfile::{LoadedKey, KeyError};
pub use signer::{Signature, SignatureError, SigningKey, VerifyingKey};
