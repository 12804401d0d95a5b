// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{MessageId, ThreadId, UserId};

/// Canonical thread id for an unordered pair of users: the two ids sorted
/// and joined with `_`. Both orderings of the same pair yield the same key,
/// so at most one thread can ever exist per pair.
///
/// The key is only a lookup handle; the `participants` stored on the thread
/// are authoritative for scoping, so ids that themselves contain `_` never
/// leak a thread to a stranger.
pub fn canonical_thread_id(a: &UserId, b: &UserId) -> ThreadId {
    let (lo, hi) = if a.as_str() <= b.as_str() {
        (a, b)
    } else {
        (b, a)
    };
    // Both components were validated as ids already.
    ThreadId::new(format!("{lo}_{hi}")).expect("canonical thread key is a valid id segment")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender_id: UserId,
    pub text: String,
    pub timestamp: String,
}

/// A conversation between two users. Messages are append-only and never
/// reordered; `last_message` mirrors the newest text for list previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageThread {
    id: ThreadId,
    participants: [UserId; 2],
    #[serde(default)]
    messages: Vec<ChatMessage>,
    #[serde(default)]
    last_message: String,
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    unread: bool,
}

impl MessageThread {
    /// An empty thread, as `start_chat` creates it on first contact.
    pub fn new(id: ThreadId, participants: [UserId; 2]) -> Self {
        Self {
            id,
            participants,
            messages: Vec::new(),
            last_message: String::new(),
            timestamp: "Maintenant".to_owned(),
            unread: false,
        }
    }

    pub fn id(&self) -> &ThreadId {
        &self.id
    }

    pub fn participants(&self) -> &[UserId; 2] {
        &self.participants
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn unread(&self) -> bool {
        self.unread
    }

    pub fn set_unread(&mut self, unread: bool) {
        self.unread = unread;
    }

    /// Appends a message and refreshes the preview fields. Ordering is the
    /// append order; nothing ever edits or deletes a message.
    pub fn push_message(&mut self, message: ChatMessage) {
        self.last_message = message.text.clone();
        self.timestamp = "Maintenant".to_owned();
        self.messages.push(message);
    }

    /// Whether the given user is one of the two participants.
    pub fn involves(&self, user_id: &UserId) -> bool {
        self.participants.contains(user_id)
    }

    /// The participant that is not the viewer.
    pub fn counterpart_of(&self, viewer: &UserId) -> Option<UserId> {
        let [a, b] = &self.participants;
        if a == viewer {
            Some(b.clone())
        } else if b == viewer {
            Some(a.clone())
        } else {
            None
        }
    }
}
