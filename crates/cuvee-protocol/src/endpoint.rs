/// REST endpoint paths on the ledger boundary.
pub mod endpoints {
    /// POST target for serialized batch lists.
    pub const BATCHES: &str = "/batches";
    /// GET target for batch commit status, `?id=<batch_id>&wait=<seconds>`.
    pub const BATCH_STATUSES: &str = "/batch_statuses";
    /// GET target for state listing (`?address=<prefix>`) and point lookup
    /// (`/state/<address>`).
    pub const STATE: &str = "/state";
}

/// Content type of the batch submission body.
pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";
