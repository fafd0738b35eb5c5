//! Transaction family constants.
//!
//! Every address in the family's state space is `PREFIX_LEN` hex characters
//! of the family-name digest followed by `NAME_SUFFIX_LEN` hex characters of
//! the record-name digest.

/// Family name the handler registers under and headers carry.
pub const FAMILY_NAME: &str = "wine-label";

/// Family version carried in transaction headers.
pub const FAMILY_VERSION: &str = "1.0";

/// Hex characters of the family digest forming the namespace prefix.
pub const PREFIX_LEN: usize = 6;

/// Hex characters of the record-name digest forming the address suffix.
pub const NAME_SUFFIX_LEN: usize = 64;

/// Total address length in hex characters.
pub const ADDRESS_LEN: usize = PREFIX_LEN + NAME_SUFFIX_LEN;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_length_is_prefix_plus_suffix() {
        assert_eq!(ADDRESS_LEN, 70);
        assert_eq!(PREFIX_LEN + NAME_SUFFIX_LEN, ADDRESS_LEN);
    }
}
