//! Address derivation, handler copy.
//!
//! Must match the client's derivation byte-for-byte: the prefix is the first
//! six hex chars of the family-name digest, the suffix the last 64 hex chars
//! of the record-id digest. Divergence would silently accept mutations
//! against unintended state.

use cuvee_crypto::sha512_hex;
use cuvee_protocol::family::{FAMILY_NAME, NAME_SUFFIX_LEN, PREFIX_LEN};

/// The namespace prefix this handler registers for.
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

#[cfg(test)]
mod tests {
    use super::*;
    use cuvee_protocol::family::ADDRESS_LEN;

    #[test]
    fn address_is_deterministic() {
        assert_eq!(label_address("chardonnay-2019"), label_address("chardonnay-2019"));
    }

    #[test]
    fn address_length_and_prefix() {
        let a = label_address("abc");
        assert_eq!(a.len(), ADDRESS_LEN);
        assert!(a.starts_with(&namespace_prefix()));
    }

    #[test]
    fn distinct_ids_map_to_distinct_addresses() {
        assert_ne!(label_address("abc"), label_address("abd"));
    }
}
