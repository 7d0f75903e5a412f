use crate::*;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// A survey question. Votes are only accepted against active questions.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Question {
    pub id: u64,
    pub question_id: String,
    pub label: String,
    pub created_by: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Row counts over everything the store holds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub total_votes: usize,
    pub unique_questions: usize,
    pub unique_participants: usize,
    pub total_photos: usize,
    pub total_audit_entries: usize,
}

/// The persistence collaborator.
///
/// Every writing method is one atomic unit of work. In particular the
/// `*_with_audit` methods and `append_audit` read the chain head and link
/// the new audit entry within the same step - two concurrent appends must
/// never observe the same "most recent" entry.
pub trait Store {
    /// Register a question. Returns the stored row.
    fn insert_question(&self, question_id: &str, label: &str, created_by: &str) -> Question;

    /// Does an active question with this identifier exist?
    fn question_is_active(&self, question_id: &str) -> bool;

    /// Activate or deactivate a question. Returns false if unknown.
    fn set_question_active(&self, question_id: &str, active: bool) -> bool;

    /// All active questions, in registration order.
    fn questions(&self) -> Vec<Question>;

    /// Record a participant fingerprint (insert-if-absent; re-submission
    /// by a known participant is not an error).
    fn register_participant(&self, participant_fingerprint: &str, agent_fingerprint: &str);

    /// Persist a vote row and its audit entry as one atomic unit.
    fn insert_vote_with_audit(
        &self,
        question_id: &str,
        participant_fingerprint: &str,
        ciphertext: &str,
        key_id: &str,
        payload_hash: String,
    ) -> (VoteRecord, AuditEntry);

    /// Persist a photo-metadata row and its audit entry as one atomic unit.
    fn insert_photo_with_audit(
        &self,
        upload: PhotoUpload,
        payload_hash: String,
    ) -> (PhotoRecord, AuditEntry);

    /// Append a bare audit entry, linked to the current chain head.
    fn append_audit(&self, event_type: EventType, payload_hash: String) -> AuditEntry;

    /// All ciphertext strings stored for a `(question, key)` pair.
    fn ciphertexts(&self, question_id: &str, key_id: &str) -> Vec<String>;

    /// The full audit chain in ascending id order.
    fn audit_entries(&self) -> Vec<AuditEntry>;

    /// The latest audit entries, newest first.
    fn latest_audit_entries(&self, limit: usize) -> Vec<AuditEntry>;

    fn stats(&self) -> StoreStats;
}

#[derive(Debug, Default)]
struct MemStoreInner {
    questions: IndexMap<String, Question>,
    participants: IndexMap<String, String>,
    votes: Vec<VoteRecord>,
    photos: Vec<PhotoRecord>,
    audit: Vec<AuditEntry>,
    next_question_id: u64,
    next_vote_id: u64,
    next_photo_id: u64,
    next_audit_id: u64,
}

impl MemStoreInner {
    // Callers hold the store lock, which makes the read-head-then-link
    // step indivisible.
    fn append_audit_entry(&mut self, event_type: EventType, payload_hash: String) -> AuditEntry {
        let prev_hash = self.audit.last().map(|entry| entry.payload_hash.clone());
        self.next_audit_id += 1;
        let entry = AuditEntry {
            id: self.next_audit_id,
            event_type,
            payload_hash,
            prev_hash,
            created_at: Utc::now(),
        };
        self.audit.push(entry.clone());
        entry
    }
}

/// A simple in-memory store.
///
/// A single mutex serializes every write, so each trait method runs as
/// one critical section. A SQL-backed store would use one serializable
/// transaction per method instead.
#[derive(Debug, Default)]
pub struct MemStore {
    inner: Mutex<MemStoreInner>,
}

impl MemStore {
    fn lock(&self) -> MutexGuard<MemStoreInner> {
        self.inner.lock().expect("securevote: store mutex poisoned")
    }
}

impl Store for MemStore {
    fn insert_question(&self, question_id: &str, label: &str, created_by: &str) -> Question {
        let mut inner = self.lock();
        inner.next_question_id += 1;
        let question = Question {
            id: inner.next_question_id,
            question_id: question_id.to_string(),
            label: label.to_string(),
            created_by: created_by.to_string(),
            active: true,
            created_at: Utc::now(),
        };
        inner
            .questions
            .insert(question_id.to_string(), question.clone());
        question
    }

    fn question_is_active(&self, question_id: &str) -> bool {
        self.lock()
            .questions
            .get(question_id)
            .map(|question| question.active)
            .unwrap_or(false)
    }

    fn set_question_active(&self, question_id: &str, active: bool) -> bool {
        match self.lock().questions.get_mut(question_id) {
            Some(question) => {
                question.active = active;
                true
            }
            None => false,
        }
    }

    fn questions(&self) -> Vec<Question> {
        self.lock()
            .questions
            .values()
            .filter(|question| question.active)
            .cloned()
            .collect()
    }

    fn register_participant(&self, participant_fingerprint: &str, agent_fingerprint: &str) {
        let mut inner = self.lock();
        if !inner.participants.contains_key(participant_fingerprint) {
            inner.participants.insert(
                participant_fingerprint.to_string(),
                agent_fingerprint.to_string(),
            );
        }
    }

    fn insert_vote_with_audit(
        &self,
        question_id: &str,
        participant_fingerprint: &str,
        ciphertext: &str,
        key_id: &str,
        payload_hash: String,
    ) -> (VoteRecord, AuditEntry) {
        let mut inner = self.lock();
        inner.next_vote_id += 1;
        let vote = VoteRecord {
            id: inner.next_vote_id,
            question_id: question_id.to_string(),
            participant_fingerprint: participant_fingerprint.to_string(),
            ciphertext: ciphertext.to_string(),
            key_id: key_id.to_string(),
            created_at: Utc::now(),
        };
        inner.votes.push(vote.clone());
        let entry = inner.append_audit_entry(EventType::VoteReceived, payload_hash);
        (vote, entry)
    }

    fn insert_photo_with_audit(
        &self,
        upload: PhotoUpload,
        payload_hash: String,
    ) -> (PhotoRecord, AuditEntry) {
        let mut inner = self.lock();
        inner.next_photo_id += 1;
        let photo = PhotoRecord {
            id: inner.next_photo_id,
            object_name: upload.object_name,
            nonce_b64: upload.nonce_b64,
            tag_b64: upload.tag_b64,
            alg: upload.alg,
            content_type: upload.content_type,
            size_bytes: upload.size_bytes,
            key_id: upload.key_id,
            created_at: Utc::now(),
        };
        inner.photos.push(photo.clone());
        let entry = inner.append_audit_entry(EventType::PhotoUploaded, payload_hash);
        (photo, entry)
    }

    fn append_audit(&self, event_type: EventType, payload_hash: String) -> AuditEntry {
        self.lock().append_audit_entry(event_type, payload_hash)
    }

    fn ciphertexts(&self, question_id: &str, key_id: &str) -> Vec<String> {
        self.lock()
            .votes
            .iter()
            .filter(|vote| vote.question_id == question_id && vote.key_id == key_id)
            .map(|vote| vote.ciphertext.clone())
            .collect()
    }

    fn audit_entries(&self) -> Vec<AuditEntry> {
        self.lock().audit.clone()
    }

    fn latest_audit_entries(&self, limit: usize) -> Vec<AuditEntry> {
        self.lock().audit.iter().rev().take(limit).cloned().collect()
    }

    fn stats(&self) -> StoreStats {
        let inner = self.lock();
        let unique_questions: HashSet<&str> = inner
            .votes
            .iter()
            .map(|vote| vote.question_id.as_str())
            .collect();
        let unique_participants: HashSet<&str> = inner
            .votes
            .iter()
            .map(|vote| vote.participant_fingerprint.as_str())
            .collect();

        StoreStats {
            total_votes: inner.votes.len(),
            unique_questions: unique_questions.len(),
            unique_participants: unique_participants.len(),
            total_photos: inner.photos.len(),
            total_audit_entries: inner.audit.len(),
        }
    }
}
