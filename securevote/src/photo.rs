use crate::*;
use chrono::{DateTime, Utc};

/// Metadata for an encrypted photo blob.
///
/// The blob itself (ciphertext + tag, AES-GCM encrypted client-side)
/// lives with the external object-storage collaborator; only this
/// metadata row passes through the audit chain.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PhotoUpload {
    pub object_name: String,
    pub nonce_b64: String,
    pub tag_b64: String,
    pub alg: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub key_id: String,
}

/// A stored photo-metadata row.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PhotoRecord {
    pub id: u64,
    pub object_name: String,
    pub nonce_b64: String,
    pub tag_b64: String,
    pub alg: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub key_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PhotoReceipt {
    pub photo_id: u64,
    pub object_name: String,
    pub created_at: DateTime<Utc>,
}

/// Persist photo metadata and its `photo_uploaded` audit entry in one
/// atomic unit. The audit payload hash is derived from
/// `(object_name, size_bytes, key_id)`.
pub fn record_photo<S: Store>(store: &S, upload: PhotoUpload) -> PhotoReceipt {
    let payload = format!(
        "photo:{}:{}:{}",
        upload.object_name, upload.size_bytes, upload.key_id
    );
    let payload_hash = sha256_hex(payload.as_bytes());

    let (photo, _) = store.insert_photo_with_audit(upload, payload_hash);

    PhotoReceipt {
        photo_id: photo.id,
        object_name: photo.object_name,
        created_at: photo.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_photo_appends_to_chain() {
        let store = MemStore::default();

        let receipt = record_photo(
            &store,
            PhotoUpload {
                object_name: "site-photo".to_string(),
                nonce_b64: "bm9uY2U=".to_string(),
                tag_b64: "dGFn".to_string(),
                alg: "AES-256-GCM".to_string(),
                content_type: "image/jpeg".to_string(),
                size_bytes: 2048,
                key_id: "key-v1".to_string(),
            },
        );
        assert_eq!(receipt.photo_id, 1);
        assert_eq!(receipt.object_name, "site-photo");

        let entries = store.audit_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event_type, EventType::PhotoUploaded);
        assert_eq!(
            entries[0].payload_hash,
            sha256_hex(b"photo:site-photo:2048:key-v1")
        );
    }
}
