// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The remote document store boundary.
//!
//! Documents are plain JSON records keyed by collection + id. Every write
//! re-emits the full collection snapshot to subscribers; the latest received
//! snapshot is authoritative (no causal ordering across clients). Documents
//! are parsed into model types here, at the boundary, with malformed
//! documents reported per-document instead of trusted or dropped silently.

pub mod memory;

use serde::de::DeserializeOwned;

pub use memory::{MemoryStore, Snapshot, StoreError};

/// Collection names, matching the historical document layout.
pub mod collections {
    pub const USERS: &str = "users";
    pub const MESSAGES: &str = "messages";
    pub const BOOKINGS: &str = "bookings";
    pub const SPOTS: &str = "spots";
}

/// A document that failed schema validation, kept for surfacing without
/// poisoning the rest of the snapshot.
#[derive(Debug)]
pub struct MalformedDocument {
    pub doc_id: String,
    pub reason: serde_json::Error,
}

/// Parses every document of a snapshot into `T`. Valid documents come back
/// in snapshot order; malformed ones are tagged and returned separately.
pub fn decode_snapshot<T: DeserializeOwned>(
    snapshot: &Snapshot,
) -> (Vec<T>, Vec<MalformedDocument>) {
    let mut decoded = Vec::with_capacity(snapshot.docs.len());
    let mut malformed = Vec::new();
    for (doc_id, doc) in &snapshot.docs {
        match serde_json::from_value::<T>(doc.clone()) {
            Ok(value) => decoded.push(value),
            Err(reason) => malformed.push(MalformedDocument {
                doc_id: doc_id.clone(),
                reason,
            }),
        }
    }
    (decoded, malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[test]
    fn decode_snapshot_skips_malformed_documents() {
        let store = MemoryStore::new();
        store.set(
            collections::USERS,
            "u:1",
            serde_json::json!({
                "id": "u:1",
                "name": "Anna",
                "location": { "lat": 48.85, "lng": 2.35 }
            }),
        );
        store.set(collections::USERS, "broken", serde_json::json!({ "nope": true }));

        let snapshot = store.snapshot(collections::USERS);
        let (users, malformed) = decode_snapshot::<User>(&snapshot);

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name(), "Anna");
        assert_eq!(malformed.len(), 1);
        assert_eq!(malformed[0].doc_id, "broken");
    }
}
