//! Address derivation, client copy.
//!
//! `address(id) = sha512_hex("wine-label")[..6] ++ sha512_hex(id)[64..]`.
//! The processor derives the same address independently; if the two ever
//! diverged, transactions would silently mutate the wrong slot, so this
//! function is covered by cross-crate byte-equality tests.

use cuvee_crypto::sha512_hex;
use cuvee_protocol::family::{FAMILY_NAME, NAME_SUFFIX_LEN, PREFIX_LEN};

/// The 6-hex-char namespace prefix reserved for wine label records.
pub fn namespace_prefix() -> String {
    sha512_hex(FAMILY_NAME.as_bytes())[..PREFIX_LEN].to_string()
}

/// Deterministic state address for a record id.
pub fn label_address(id: &str) -> String {
    let digest = sha512_hex(id.as_bytes());
    let mut address = namespace_prefix();
    address.push_str(&digest[digest.len() - NAME_SUFFIX_LEN..]);
    address
}
