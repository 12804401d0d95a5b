// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory reactive projections of the remote collections.
//!
//! Each collection mirrors the latest received snapshot wholesale; the UI
//! reads from here and never mutates a projection directly. On subscription
//! trouble the last good projection stays visible (fail open) so a transient
//! network error never blanks the screen.

use std::collections::BTreeSet;

use crate::model::{Booking, MessageThread, RoleFilter, Spot, User, UserId};
use crate::store::{collections, decode_snapshot, MemoryStore, Snapshot};

#[derive(Debug, Default)]
pub struct EntityCache {
    users: Vec<User>,
    threads: Vec<MessageThread>,
    bookings: Vec<Booking>,
    spots: Vec<Spot>,
    malformed_docs: u64,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prime every projection from the store's current state, as the
    /// standing subscriptions do on their first delivery.
    pub fn prime(&mut self, store: &MemoryStore) {
        self.apply_users_snapshot(&store.snapshot(collections::USERS));
        self.apply_threads_snapshot(&store.snapshot(collections::MESSAGES));
        self.apply_bookings_snapshot(&store.snapshot(collections::BOOKINGS));
        self.apply_spots_snapshot(&store.snapshot(collections::SPOTS));
    }

    /// Routes a snapshot to the matching projection. Unknown collections are
    /// ignored rather than treated as errors.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) {
        match snapshot.collection.as_str() {
            collections::USERS => self.apply_users_snapshot(snapshot),
            collections::MESSAGES => self.apply_threads_snapshot(snapshot),
            collections::BOOKINGS => self.apply_bookings_snapshot(snapshot),
            collections::SPOTS => self.apply_spots_snapshot(snapshot),
            _ => {}
        }
    }

    pub fn apply_users_snapshot(&mut self, snapshot: &Snapshot) {
        let (users, malformed) = decode_snapshot::<User>(snapshot);
        self.users = users;
        self.malformed_docs += malformed.len() as u64;
    }

    pub fn apply_threads_snapshot(&mut self, snapshot: &Snapshot) {
        let (threads, malformed) = decode_snapshot::<MessageThread>(snapshot);
        self.threads = threads;
        self.malformed_docs += malformed.len() as u64;
    }

    pub fn apply_bookings_snapshot(&mut self, snapshot: &Snapshot) {
        let (bookings, malformed) = decode_snapshot::<Booking>(snapshot);
        self.bookings = bookings;
        self.malformed_docs += malformed.len() as u64;
    }

    pub fn apply_spots_snapshot(&mut self, snapshot: &Snapshot) {
        let (spots, malformed) = decode_snapshot::<Spot>(snapshot);
        self.spots = spots;
        self.malformed_docs += malformed.len() as u64;
    }

    /// Documents skipped so far for failing schema validation.
    pub fn malformed_docs(&self) -> u64 {
        self.malformed_docs
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id() == id)
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn thread(&self, id: &crate::model::ThreadId) -> Option<&MessageThread> {
        self.threads.iter().find(|t| t.id() == id)
    }

    /// Threads whose canonical key involves the viewer, in snapshot order.
    pub fn threads_for(&self, viewer: &UserId) -> Vec<&MessageThread> {
        self.threads.iter().filter(|t| t.involves(viewer)).collect()
    }

    pub fn booking(&self, id: &crate::model::BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id() == id)
    }

    /// Bookings where the viewer is either party, in snapshot order.
    pub fn bookings_for(&self, viewer: &UserId) -> Vec<&Booking> {
        self.bookings.iter().filter(|b| b.involves(viewer)).collect()
    }

    /// Discovery filter over users: role AND availability AND search, each
    /// pass-through when unset. Order is snapshot order, not sorted.
    pub fn filter_users(
        &self,
        role: RoleFilter,
        available_only: bool,
        search: &str,
    ) -> Vec<&User> {
        self.users
            .iter()
            .filter(|user| {
                role.matches(user.roles())
                    && (!available_only || user.is_available_now())
                    && user.matches_search(search)
            })
            .collect()
    }

    /// Spot filter: permissive category match (category or Indoor/Outdoor
    /// kind) AND case-insensitive substring match on the name.
    pub fn filter_spots(&self, category: &str, search: &str) -> Vec<&Spot> {
        let needle = search.trim().to_lowercase();
        self.spots
            .iter()
            .filter(|spot| {
                spot.matches_category(category)
                    && (needle.is_empty() || spot.name().to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Distinct categories of the live spot set, for the filter chips.
    pub fn spot_categories(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut categories = vec!["All".to_owned()];
        for spot in &self.spots {
            if seen.insert(spot.category()) {
                categories.push(spot.category().to_owned());
            }
        }
        categories
    }
}
