use crate::*;
use chrono::{DateTime, Utc};

/// A stored vote row.
///
/// The ciphertext is opaque here; the participant identity is reduced to
/// a one-way fingerprint before it reaches this type.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VoteRecord {
    pub id: u64,
    pub question_id: String,
    pub participant_fingerprint: String,
    pub ciphertext: String,
    pub key_id: String,
    pub created_at: DateTime<Utc>,
}

/// A vote submission as it arrives from a field client. The ciphertext is
/// already encrypted client-side under the named key.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VoteRequest {
    pub question_id: String,
    pub participant_id: String,
    pub agent_id: String,
    pub ciphertext: String,
    pub key_id: String,
}

/// What the submitting client gets back for a stored vote.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VoteReceipt {
    pub vote_id: u64,
    pub question_id: String,
    pub participant_fingerprint: String,
    pub key_id: String,
    pub created_at: DateTime<Utc>,
}

/// Fingerprint an identity: SHA-256 hex of the raw identifier. One-way;
/// the raw identity is never stored.
pub fn fingerprint(identity: &str) -> String {
    sha256_hex(identity.as_bytes())
}

/// Store a vote and its `vote_received` audit entry in one atomic unit.
///
/// Rejects votes against unknown or inactive questions. The audit payload
/// hash is derived from `(question_id, ciphertext, key_id)`.
pub fn submit_vote<S: Store>(store: &S, request: &VoteRequest) -> Result<VoteReceipt, Error> {
    if !store.question_is_active(&request.question_id) {
        return Err(Error::InvalidQuestion(request.question_id.clone()));
    }

    let participant_fingerprint = fingerprint(&request.participant_id);
    let agent_fingerprint = fingerprint(&request.agent_id);
    store.register_participant(&participant_fingerprint, &agent_fingerprint);

    let payload = format!(
        "{}:{}:{}",
        request.question_id, request.ciphertext, request.key_id
    );
    let payload_hash = sha256_hex(payload.as_bytes());

    let (vote, _) = store.insert_vote_with_audit(
        &request.question_id,
        &participant_fingerprint,
        &request.ciphertext,
        &request.key_id,
        payload_hash,
    );

    Ok(VoteReceipt {
        vote_id: vote.id,
        question_id: vote.question_id,
        participant_fingerprint: vote.participant_fingerprint,
        key_id: vote.key_id,
        created_at: vote.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(question_id: &str) -> VoteRequest {
        VoteRequest {
            question_id: question_id.to_string(),
            participant_id: "alice".to_string(),
            agent_id: "agent-1".to_string(),
            ciphertext: "123456789".to_string(),
            key_id: "key-v1".to_string(),
        }
    }

    #[test]
    fn test_submit_vote() {
        let store = MemStore::default();
        store.insert_question("q-1", "Is the well functional?", "admin");

        let receipt = submit_vote(&store, &request("q-1")).unwrap();
        assert_eq!(receipt.vote_id, 1);
        assert_eq!(receipt.question_id, "q-1");

        // The stored fingerprint is a digest, not the raw identity
        assert_ne!(receipt.participant_fingerprint, "alice");
        assert_eq!(receipt.participant_fingerprint, fingerprint("alice"));

        // Exactly one chained audit entry was appended
        let entries = store.audit_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event_type, EventType::VoteReceived);
        assert_eq!(
            entries[0].payload_hash,
            sha256_hex(b"q-1:123456789:key-v1")
        );
    }

    #[test]
    fn test_unknown_question_is_rejected() {
        let store = MemStore::default();
        let err = submit_vote(&store, &request("q-missing"));
        assert!(matches!(err, Err(Error::InvalidQuestion(_))));

        // Nothing was stored, nothing was chained
        assert_eq!(store.stats().total_votes, 0);
        assert_eq!(store.audit_entries().len(), 0);
    }

    #[test]
    fn test_inactive_question_is_rejected() {
        let store = MemStore::default();
        store.insert_question("q-1", "Is the well functional?", "admin");
        store.set_question_active("q-1", false);

        let err = submit_vote(&store, &request("q-1"));
        assert!(matches!(err, Err(Error::InvalidQuestion(_))));
    }
}
