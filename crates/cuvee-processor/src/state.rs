//! State-access boundary between the handler and the dispatch runtime.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

/// Scoped state access handed to the handler per invocation.
///
/// The runtime guarantees isolation for concurrent applies that touch the
/// same address; the handler does no locking of its own.
pub trait State: Send + Sync {
    /// Read current entries for the given addresses. Absent addresses are
    /// simply missing from the returned map.
    fn get(&self, addresses: &[String]) -> Result<HashMap<String, Vec<u8>>, StateError>;

    /// Write entries, returning the addresses actually written.
    fn set(&self, entries: HashMap<String, Vec<u8>>) -> Result<Vec<String>, StateError>;
}

/// Errors from the state backend.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("state backend failure: {0}")]
    Backend(String),
}

/// In-memory state store for tests, local demos, and embedding.
#[derive(Default)]
pub struct InMemoryState {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw entry lookup, bypassing the handler path. Test convenience.
    pub fn entry(&self, address: &str) -> Option<Vec<u8>> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(address)
            .cloned()
    }

    /// All entries under an address prefix, sorted by address.
    pub fn entries_with_prefix(&self, prefix: &str) -> Vec<(String, Vec<u8>)> {
        let guard = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let mut found: Vec<_> = guard
            .iter()
            .filter(|(address, _)| address.starts_with(prefix))
            .map(|(address, data)| (address.clone(), data.clone()))
            .collect();
        found.sort_by(|a, b| a.0.cmp(&b.0));
        found
    }
}

impl State for InMemoryState {
    fn get(&self, addresses: &[String]) -> Result<HashMap<String, Vec<u8>>, StateError> {
        let guard = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(addresses
            .iter()
            .filter_map(|a| guard.get(a).map(|data| (a.clone(), data.clone())))
            .collect())
    }

    fn set(&self, entries: HashMap<String, Vec<u8>>) -> Result<Vec<String>, StateError> {
        let mut guard = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let mut written = Vec::with_capacity(entries.len());
        for (address, data) in entries {
            guard.insert(address.clone(), data);
            written.push(address);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_only_present_addresses() {
        let state = InMemoryState::new();
        state
            .set(HashMap::from([("a".to_string(), vec![1u8])]))
            .unwrap();

        let result = state.get(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result["a"], vec![1u8]);
    }

    #[test]
    fn set_acknowledges_written_addresses() {
        let state = InMemoryState::new();
        let written = state
            .set(HashMap::from([
                ("a".to_string(), vec![1u8]),
                ("b".to_string(), vec![2u8]),
            ]))
            .unwrap();
        assert_eq!(written.len(), 2);
        assert!(written.contains(&"a".to_string()));
        assert!(written.contains(&"b".to_string()));
    }

    #[test]
    fn set_overwrites_in_place() {
        let state = InMemoryState::new();
        state
            .set(HashMap::from([("a".to_string(), vec![1u8])]))
            .unwrap();
        state
            .set(HashMap::from([("a".to_string(), vec![2u8])]))
            .unwrap();
        assert_eq!(state.entry("a"), Some(vec![2u8]));
    }

    #[test]
    fn prefix_listing_is_sorted_and_filtered() {
        let state = InMemoryState::new();
        state
            .set(HashMap::from([
                ("aa1".to_string(), vec![1u8]),
                ("aa0".to_string(), vec![2u8]),
                ("bb0".to_string(), vec![3u8]),
            ]))
            .unwrap();

        let listed = state.entries_with_prefix("aa");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].0, "aa0");
        assert_eq!(listed[1].0, "aa1");
    }
}
