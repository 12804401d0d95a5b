// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User-intent operations that cut across session, store and navigation.
//!
//! Every mutation here follows the same shape: validate against the current
//! session, write through the store, and let the snapshot feed refresh the
//! cache. Nothing in this module mutates the cache directly; the store is
//! the single source of truth for shared documents.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde_json::json;

use crate::model::{
    canonical_thread_id, Booking, BookingId, BookingStatus, ChatMessage, GeoPoint, MessageThread,
    Review, Spot, ThreadId, TransitionError, User, UserId, FALLBACK_LOCATION,
};
use crate::nav::NavigationState;
use crate::session::SessionStore;
use crate::store::{collections, MemoryStore, StoreError};

static MINT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Mints a document id (messages, bookings, reviews). The wall-clock
/// component keeps ids apart across clients sharing one store; the serial
/// keeps them apart within a process regardless of clock resolution.
fn mint<T>(prefix: &str) -> crate::model::Id<T> {
    let serial = MINT_SERIAL.fetch_add(1, Ordering::Relaxed);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |since| since.as_millis());
    crate::model::Id::new(format!("{prefix}-{millis:x}-{serial}"))
        .expect("minted ids never contain reserved characters")
}

/// The per-client write coordinator.
#[derive(Debug)]
pub struct Dispatcher {
    store: MemoryStore,
}

impl Dispatcher {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Opens (or re-opens) the chat with another user and navigates to it.
    /// The thread key is canonical for the pair, so starting a chat from
    /// either side lands on the same document and never forks.
    pub fn start_chat(
        &mut self,
        session: &SessionStore,
        nav: &mut NavigationState,
        other: &UserId,
    ) -> Result<ThreadId, DispatchError> {
        let me = current_id(session)?;
        let thread_id = canonical_thread_id(&me, other);
        if self
            .store
            .get(collections::MESSAGES, thread_id.as_str())
            .is_none()
        {
            let thread = MessageThread::new(thread_id.clone(), [me.clone(), other.clone()]);
            self.store.set(
                collections::MESSAGES,
                thread_id.as_str(),
                encode(&thread),
            );
        }
        nav.select_thread(thread_id.clone());
        Ok(thread_id)
    }

    /// Appends a message to an existing thread. Whitespace-only input is a
    /// silent no-op so a stray Enter never produces an empty bubble.
    pub fn add_message(
        &mut self,
        session: &SessionStore,
        thread_id: &ThreadId,
        text: &str,
    ) -> Result<(), DispatchError> {
        let me = current_id(session)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let message = ChatMessage {
            id: mint("m"),
            sender_id: me,
            text: text.to_owned(),
            timestamp: "Maintenant".to_owned(),
        };
        self.store
            .array_append(
                collections::MESSAGES,
                thread_id.as_str(),
                "messages",
                encode(&message),
            )
            .map_err(|_| DispatchError::UnknownThread(thread_id.clone()))?;
        self.store
            .update(
                collections::MESSAGES,
                thread_id.as_str(),
                json!({
                    "lastMessage": message.text,
                    "timestamp": message.timestamp,
                    "unread": true,
                }),
            )
            .map_err(DispatchError::Store)?;
        Ok(())
    }

    /// Clears the unread marker once the thread is actually on screen.
    pub fn mark_thread_read(&mut self, thread_id: &ThreadId) -> Result<(), DispatchError> {
        self.store
            .update(
                collections::MESSAGES,
                thread_id.as_str(),
                json!({ "unread": false }),
            )
            .map_err(|_| DispatchError::UnknownThread(thread_id.clone()))
    }

    /// Files a booking request against a professional. The booking starts
    /// Pending; money only moves once the professional confirms.
    pub fn confirm_booking(
        &mut self,
        session: &SessionStore,
        nav: &mut NavigationState,
        professional: &UserId,
        date: &str,
        time: &str,
        duration: u32,
        notes: &str,
    ) -> Result<BookingId, DispatchError> {
        let me = current_id(session)?;
        let booking_id: BookingId = mint("b");
        let mut booking = Booking::new(
            booking_id.clone(),
            me,
            professional.clone(),
            date,
            time,
            duration,
        );
        booking.set_notes(notes.trim());
        self.store
            .set(collections::BOOKINGS, booking_id.as_str(), encode(&booking));
        nav.set_booking_user(None);
        Ok(booking_id)
    }

    /// Drives the booking state machine: read, transition under the acting
    /// user's authority, write back. Escrow moves inside the transition.
    pub fn update_booking_status(
        &mut self,
        session: &SessionStore,
        booking_id: &BookingId,
        next: BookingStatus,
    ) -> Result<(), DispatchError> {
        let me = current_id(session)?;
        let mut booking = self.load_booking(booking_id)?;
        booking
            .transition(&me, next)
            .map_err(DispatchError::Booking)?;
        self.store
            .set(collections::BOOKINGS, booking_id.as_str(), encode(&booking));
        Ok(())
    }

    /// Submits the client's one-shot review of a completed booking. The
    /// review lands on the professional's document, which also recomputes
    /// the displayed average rating.
    pub fn post_review(
        &mut self,
        session: &SessionStore,
        nav: &mut NavigationState,
        booking_id: &BookingId,
        rating: u8,
        comment: &str,
    ) -> Result<(), DispatchError> {
        let me = current_id(session)?;
        let author_name = session
            .current_user()
            .map(|u| u.name().to_owned())
            .unwrap_or_default();

        let mut booking = self.load_booking(booking_id)?;
        booking.mark_reviewed(&me).map_err(DispatchError::Booking)?;

        let professional = booking.professional_id().clone();
        let mut target = self.load_user(&professional)?;
        target.attach_review(Review {
            id: mint("r"),
            author_id: me,
            author_name,
            rating: rating.clamp(1, 5),
            comment: comment.trim().to_owned(),
            timestamp: "Maintenant".to_owned(),
        });

        self.store
            .set(collections::BOOKINGS, booking_id.as_str(), encode(&booking));
        self.store
            .set(collections::USERS, professional.as_str(), encode(&target));
        nav.set_reviewing_booking(None);
        Ok(())
    }

    /// Moves the signed-in user's pin. `located` is whatever the platform
    /// geolocator produced; denial or failure falls back to the default
    /// city-center coordinate rather than surfacing an error.
    pub fn refresh_location(
        &mut self,
        session: &mut SessionStore,
        located: Option<GeoPoint>,
        now: Instant,
    ) -> Result<(), DispatchError> {
        let me = current_id(session)?;
        let point = located.unwrap_or(FALLBACK_LOCATION);
        session.set_pending_location(point, now);
        self.store
            .update(
                collections::USERS,
                me.as_str(),
                json!({ "location": point }),
            )
            .map_err(DispatchError::Store)?;
        Ok(())
    }

    /// Replaces the spots collection wholesale with a fresh provider batch.
    /// An empty batch keeps what is already there; a fetch that found
    /// nothing should not blank the map.
    pub fn refresh_spots(&mut self, spots: Vec<Spot>) {
        if spots.is_empty() {
            return;
        }
        let stale: Vec<String> = self
            .store
            .snapshot(collections::SPOTS)
            .docs
            .iter()
            .map(|(id, _)| id.clone())
            .collect();
        for id in stale {
            self.store.delete(collections::SPOTS, &id);
        }
        for spot in spots {
            self.store
                .set(collections::SPOTS, spot.id().as_str(), encode(&spot));
        }
    }

    /// Shallow-merges a partial document into the signed-in user's profile,
    /// for single-field flips that do not warrant the full edit flow.
    pub fn update_current_user(
        &mut self,
        session: &SessionStore,
        partial: serde_json::Value,
    ) -> Result<(), DispatchError> {
        let me = current_id(session)?;
        self.store
            .update(collections::USERS, me.as_str(), partial)
            .map_err(DispatchError::Store)
    }

    /// Saves an edited profile and closes the editor.
    pub fn save_profile(
        &mut self,
        session: &mut SessionStore,
        nav: &mut NavigationState,
        user: User,
    ) {
        session.save_profile(user);
        nav.set_editing_profile(false);
    }

    /// Dismisses the guided tour and remembers the dismissal so it never
    /// auto-starts again.
    pub fn close_tour(&mut self, session: &mut SessionStore, nav: &mut NavigationState) {
        nav.close_tour();
        session.mark_tour_seen();
    }

    fn load_booking(&self, booking_id: &BookingId) -> Result<Booking, DispatchError> {
        let doc = self
            .store
            .get(collections::BOOKINGS, booking_id.as_str())
            .ok_or_else(|| DispatchError::UnknownBooking(booking_id.clone()))?;
        serde_json::from_value(doc)
            .map_err(|_| DispatchError::UnknownBooking(booking_id.clone()))
    }

    fn load_user(&self, user_id: &UserId) -> Result<User, DispatchError> {
        let doc = self
            .store
            .get(collections::USERS, user_id.as_str())
            .ok_or_else(|| DispatchError::UnknownUser(user_id.clone()))?;
        serde_json::from_value(doc).map_err(|_| DispatchError::UnknownUser(user_id.clone()))
    }

}

fn current_id(session: &SessionStore) -> Result<UserId, DispatchError> {
    session
        .current_user_id()
        .cloned()
        .ok_or(DispatchError::NotLoggedIn)
}

fn encode<T: serde::Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).expect("domain documents always encode")
}

#[derive(Debug)]
pub enum DispatchError {
    NotLoggedIn,
    UnknownThread(ThreadId),
    UnknownBooking(BookingId),
    UnknownUser(UserId),
    Booking(TransitionError),
    Store(StoreError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLoggedIn => write!(f, "no user is signed in"),
            Self::UnknownThread(id) => write!(f, "unknown thread: {id}"),
            Self::UnknownBooking(id) => write!(f, "unknown booking: {id}"),
            Self::UnknownUser(id) => write!(f, "unknown user: {id}"),
            Self::Booking(err) => write!(f, "booking: {err}"),
            Self::Store(err) => write!(f, "store: {err}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Booking(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}
