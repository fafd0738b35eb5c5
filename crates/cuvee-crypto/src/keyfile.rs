use std::fs;
use std::io;
use std::path::Path;

use crate::signer::SigningKey;

/// Key material resolved from disk, or freshly generated when the file is
/// absent.
#[derive(Debug)]
pub enum LoadedKey {
    Loaded(SigningKey),
    Generated(SigningKey),
}

impl LoadedKey {
    pub fn into_signing_key(self) -> SigningKey {
        match self {
            Self::Loaded(key) | Self::Generated(key) => key,
        }
    }

    pub fn was_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Load a signing key from a hex-encoded 32-byte seed file, or generate a
/// fresh one when the file does not exist.
pub fn load_or_generate(path: &Path) -> Result<LoadedKey, KeyError> {
    if !path.exists() {
        return Ok(LoadedKey::Generated(SigningKey::generate()));
    }
    let text = fs::read_to_string(path).map_err(|source| KeyError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let bytes = hex::decode(text.trim())
        .map_err(|_| KeyError::InvalidHex(path.display().to_string()))?;
    let seed: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| KeyError::WrongLength {
        path: path.display().to_string(),
        actual: v.len(),
    })?;
    Ok(LoadedKey::Loaded(SigningKey::from_seed(seed)))
}

/// Persist a signing key as a hex-encoded seed file.
pub fn save(path: &Path, key: &SigningKey) -> Result<(), KeyError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| KeyError::Io {
            path: path.display().to_string(),
            source,
        })?;
    }
    fs::write(path, hex::encode(key.seed_bytes())).map_err(|source| KeyError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Errors from keyfile handling.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("failed to access keyfile {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("keyfile {0} is not valid hex")]
    InvalidHex(String),

    #[error("keyfile {path} holds {actual} bytes, expected 32")]
    WrongLength { path: String, actual: usize },
}
