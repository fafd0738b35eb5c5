use sha2::{Digest, Sha512};

/// Lowercase SHA-512 hex digest (128 characters).
///
/// Both address derivation and the transaction header's payload hash use this
/// exact rendering; client and processor must agree byte-for-byte.
pub fn sha512_hex(data: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
