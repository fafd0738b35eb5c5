//! Signer resolution from keyfiles.

use std::path::{Path, PathBuf};

use cuvee_crypto::keyfile;
use cuvee_crypto::{LoadedKey, SigningKey};

use crate::error::ClientResult;

/// Default keyfile location: `$HOME/.cuvee/keys/default.priv`.
pub fn default_keyfile() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".cuvee")
            .join("keys")
            .join("default.priv")
    })
}

/// Resolve a signer from the explicit path, or the default location, or a
/// freshly generated key when neither file exists. A generated key is saved
/// back to the resolved path so later invocations sign as the same identity.
pub fn load_signer(explicit: Option<&Path>) -> ClientResult<SigningKey> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_keyfile() {
            Some(p) => p,
            None => return Ok(SigningKey::generate()),
        },
    };

    let loaded = keyfile::load_or_generate(&path)?;
    if loaded.was_generated() {
        tracing::info!(path = %path.display(), "generated new signing key");
    }
    match loaded {
        LoadedKey::Generated(key) => {
            keyfile::save(&path, &key)?;
            Ok(key)
        }
        LoadedKey::Loaded(key) => Ok(key),
    }
}
