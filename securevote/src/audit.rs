use crate::*;
use chrono::{DateTime, Utc};
use digest::Digest;

/// Audit event tags.
#[derive(Serialize, Deserialize, Copy, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    VoteReceived,
    PhotoUploaded,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            EventType::VoteReceived => "vote_received",
            EventType::PhotoUploaded => "photo_uploaded",
        };
        write!(f, "{}", name)
    }
}

/// One link of the append-only audit chain.
///
/// `prev_hash` is the `payload_hash` of the entry with the next-lower id,
/// or `None` for the first entry. Entries are created exactly once and
/// never mutated or removed; the only read is a linear, sequential walk.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: u64,
    pub event_type: EventType,
    pub payload_hash: String,
    pub prev_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// SHA-256 digest as lowercase hex. Shared by participant fingerprints
/// and audit payload hashes.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha2::Sha256::digest(data))
}

/// Append an entry to the audit chain.
///
/// The store links the new entry to the current chain head inside a
/// single atomic step, so two racing appends can never claim the same
/// predecessor.
pub fn append_audit<S: Store>(store: &S, event_type: EventType, payload: &[u8]) -> AuditEntry {
    let payload_hash = sha256_hex(payload);
    store.append_audit(event_type, payload_hash)
}

/// Result of a linear verification pass over the chain.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChainVerification {
    pub ok: bool,
    pub length: usize,
    pub first_broken_id: Option<u64>,
}

impl ChainVerification {
    /// Escalate a broken chain into an error. Integrity violations are
    /// evidence; nothing here repairs them.
    pub fn into_result(self) -> Result<ChainVerification, Error> {
        match self.first_broken_id {
            Some(id) => Err(Error::ChainBroken(id)),
            None => Ok(self),
        }
    }
}

/// Walk `entries` (ascending id order) once, checking every `prev_hash`
/// against the running `payload_hash` of its predecessor.
///
/// Stops at the first mismatch and reports the offending id. The pass is
/// read-only and idempotent.
pub fn verify_chain(entries: &[AuditEntry]) -> ChainVerification {
    let mut prev_payload: Option<&str> = None;

    for entry in entries {
        if let Some(expected) = prev_payload {
            if entry.prev_hash.as_deref() != Some(expected) {
                return ChainVerification {
                    ok: false,
                    length: entries.len(),
                    first_broken_id: Some(entry.id),
                };
            }
        }
        prev_payload = Some(entry.payload_hash.as_str());
    }

    ChainVerification {
        ok: true,
        length: entries.len(),
        first_broken_id: None,
    }
}
