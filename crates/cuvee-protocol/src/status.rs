use serde::{Deserialize, Serialize};

/// Commit status of a submitted batch as reported by the status endpoint.
///
/// The status is a plain string field in the JSON response body, never a
/// decoded record payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitStatus {
    Pending,
    Committed,
    Invalid,
    Unknown,
}

impl CommitStatus {
    /// Parse the status string reported by the endpoint. Anything
    /// unrecognized maps to `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s {
            "PENDING" => Self::Pending,
            "COMMITTED" => Self::Committed,
            "INVALID" => Self::Invalid,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Committed => "COMMITTED",
            Self::Invalid => "INVALID",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// A batch leaves the poll loop once its status is no longer pending.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for CommitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the status endpoint's `data` list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusEntry {
    pub id: String,
    pub status: String,
}

/// Body of `GET /batch_statuses?id=..&wait=..`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchStatusResponse {
    pub data: Vec<StatusEntry>,
}

/// One entry of the state listing's `data` list; `data` is base64-encoded
/// codec bytes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateEntry {
    pub address: String,
    pub data: String,
}

/// Body of `GET /state?address=<prefix>`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateListResponse {
    pub data: Vec<StateEntry>,
}

/// Body of `GET /state/<address>`; `data` is base64-encoded codec bytes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateFetchResponse {
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_statuses() {
        assert_eq!(CommitStatus::parse("PENDING"), CommitStatus::Pending);
        assert_eq!(CommitStatus::parse("COMMITTED"), CommitStatus::Committed);
        assert_eq!(CommitStatus::parse("INVALID"), CommitStatus::Invalid);
        assert_eq!(CommitStatus::parse("UNKNOWN"), CommitStatus::Unknown);
    }

    #[test]
    fn unrecognized_status_is_unknown() {
        assert_eq!(CommitStatus::parse("committed"), CommitStatus::Unknown);
        assert_eq!(CommitStatus::parse(""), CommitStatus::Unknown);
    }

    #[test]
    fn only_pending_is_unsettled() {
        assert!(!CommitStatus::Pending.is_settled());
        assert!(CommitStatus::Committed.is_settled());
        assert!(CommitStatus::Invalid.is_settled());
        assert!(CommitStatus::Unknown.is_settled());
    }

    #[test]
    fn status_response_parses_from_json() {
        let body = r#"{"data":[{"id":"abc","status":"COMMITTED"}]}"#;
        let parsed: BatchStatusResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(CommitStatus::parse(&parsed.data[0].status), CommitStatus::Committed);
    }

    #[test]
    fn display_matches_wire_string() {
        assert_eq!(CommitStatus::Pending.to_string(), "PENDING");
    }
}
