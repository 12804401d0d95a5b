// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session state: who is signed in, how complete their profile is, and the
//! session-scoped timers and shadows that hang off identity.
//!
//! Profile completeness gates the top-level screen (login → setup → main);
//! that gating lives in the shell's composition root, this module only
//! exposes the flags.

pub mod auth;
pub mod prefs;
pub mod quiz;

use std::fmt;
use std::time::{Duration, Instant};

use crate::model::{GeoPoint, Role, User, UserId};
use crate::store::{collections, MemoryStore};

pub use auth::{AuthError, MemoryAuth};
pub use prefs::{Prefs, PrefsError, ONBOARDED, TOUR_SEEN};
pub use quiz::{QuizPrompt, QUIZ_PROMPT_DELAY};

/// How long an optimistic location write shadows the cached profile before
/// the remote echo is given up on.
pub const PENDING_LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
struct PendingLocation {
    point: GeoPoint,
    since: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupOutcome {
    pub start_tour: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    NotLoggedIn,
    EmptyName,
    NoRoles,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLoggedIn => f.write_str("no signed-in identity"),
            Self::EmptyName => f.write_str("name must not be empty"),
            Self::NoRoles => f.write_str("at least one role is required"),
        }
    }
}

impl std::error::Error for SetupError {}

#[derive(Debug)]
pub struct SessionStore {
    auth: MemoryAuth,
    store: MemoryStore,
    prefs: Prefs,
    current: Option<User>,
    profile_complete: bool,
    pending_location: Option<PendingLocation>,
    quiz: QuizPrompt,
}

impl SessionStore {
    pub fn new(store: MemoryStore, prefs: Prefs) -> Self {
        Self::with_auth(MemoryAuth::new(), store, prefs)
    }

    /// Shares an existing credential table, so several sessions can sign in
    /// against the same accounts.
    pub fn with_auth(auth: MemoryAuth, store: MemoryStore, prefs: Prefs) -> Self {
        Self {
            auth,
            store,
            prefs,
            current: None,
            profile_complete: false,
            pending_location: None,
            quiz: QuizPrompt::new(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_profile_complete(&self) -> bool {
        self.profile_complete
    }

    /// The signed-in profile with the pending location shadow applied.
    pub fn current_user(&self) -> Option<User> {
        let mut user = self.current.clone()?;
        if let Some(pending) = self.pending_location {
            user.set_location(pending.point);
        }
        Some(user)
    }

    pub fn current_user_id(&self) -> Option<&UserId> {
        self.current.as_ref().map(User::id)
    }

    pub fn login(&mut self, email: &str, secret: &str, now: Instant) -> Result<(), AuthError> {
        let uid = self.auth.sign_in(email, secret)?;
        self.adopt_identity(uid, email, now);
        Ok(())
    }

    /// Creates the auth account and a fresh profile document with an empty
    /// role set; the session lands on the setup screen.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        secret: &str,
        now: Instant,
    ) -> Result<(), AuthError> {
        let uid = self.auth.sign_up(email, secret)?;
        let display_name = if name.trim().is_empty() {
            "Nouveau Membre"
        } else {
            name.trim()
        };
        let mut user = User::new(uid.clone(), display_name);
        user.set_email(Some(email.trim().to_lowercase()));
        user.set_avatar_url(avatar_url_for(display_name));
        self.write_profile(&user);
        self.current = Some(user);
        self.profile_complete = false;
        self.quiz.sync(false, now);
        Ok(())
    }

    /// Finishes first-run setup: non-empty name, non-empty role set. Always
    /// signals that the guided tour should start; whether it actually does
    /// is up to the shell (the tour-seen flag suppresses auto-start).
    pub fn complete_initial_setup(
        &mut self,
        name: &str,
        roles: Vec<Role>,
        now: Instant,
    ) -> Result<SetupOutcome, SetupError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SetupError::EmptyName);
        }
        if roles.is_empty() {
            return Err(SetupError::NoRoles);
        }
        let Some(user) = self.current.as_mut() else {
            return Err(SetupError::NotLoggedIn);
        };

        user.set_name(name);
        user.set_roles(roles);
        user.set_pro(true);
        let user = user.clone();
        self.write_profile(&user);
        self.profile_complete = true;
        let _ = self.prefs.set_flag(ONBOARDED, true);
        self.quiz.sync(true, now);
        Ok(SetupOutcome { start_tour: true })
    }

    /// Clears the session and local flags. Safe to call when already out.
    pub fn logout(&mut self, now: Instant) {
        self.current = None;
        self.profile_complete = false;
        self.pending_location = None;
        let _ = self.prefs.clear();
        self.quiz.sync(false, now);
    }

    /// Deletes the account: auth credentials, profile document, session.
    pub fn delete_account(&mut self, now: Instant) {
        if let Some(user) = self.current.take() {
            self.auth.remove_account(user.id());
            self.store.delete(collections::USERS, user.id().as_str());
        }
        self.logout(now);
    }

    pub fn reset_password(&self, email: &str) {
        self.auth.reset_password(email);
    }

    pub fn tour_seen(&self) -> bool {
        self.prefs.flag(TOUR_SEEN)
    }

    pub fn mark_tour_seen(&mut self) {
        let _ = self.prefs.set_flag(TOUR_SEEN, true);
    }

    /// Replaces the in-session profile and writes it through to the store.
    pub fn save_profile(&mut self, user: User) {
        self.write_profile(&user);
        if self
            .current
            .as_ref()
            .is_some_and(|current| current.id() == user.id())
        {
            self.current = Some(user);
        }
    }

    /// Optimistic location update: the shadow is visible immediately while
    /// the store write makes its round trip.
    pub fn set_pending_location(&mut self, point: GeoPoint, now: Instant) {
        self.pending_location = Some(PendingLocation { point, since: now });
    }

    /// Reconciles the session profile against a fresh users projection.
    /// The pending shadow keeps winning until the snapshot echoes the
    /// written coordinate or the shadow times out.
    pub fn sync_users(&mut self, users: &[User], now: Instant) {
        let Some(current) = &self.current else {
            return;
        };
        let Some(remote) = users.iter().find(|u| u.id() == current.id()) else {
            return;
        };

        if let Some(pending) = self.pending_location {
            let echoed = locations_match(remote.location(), pending.point);
            let expired = now.duration_since(pending.since) >= PENDING_LOCATION_TIMEOUT;
            if echoed || expired {
                self.pending_location = None;
            }
        }
        self.current = Some(remote.clone());
        self.profile_complete = !remote.roles().is_empty();
        self.quiz.sync(self.profile_complete, now);
    }

    /// True when the deferred quiz nudge should be shown now.
    pub fn poll_quiz_prompt(&mut self, now: Instant, quiz_open: bool) -> bool {
        self.quiz.poll(now, quiz_open)
    }

    pub fn quiz_prompt_armed(&self) -> bool {
        self.quiz.is_armed()
    }

    fn adopt_identity(&mut self, uid: UserId, email: &str, now: Instant) {
        let user = match self.store.get(collections::USERS, uid.as_str()) {
            Some(doc) => match serde_json::from_value::<User>(doc) {
                Ok(user) => user,
                // Auto-heal: an identity without a readable profile gets a
                // default one so login never dead-ends.
                Err(_) => self.heal_profile(&uid, email),
            },
            None => self.heal_profile(&uid, email),
        };
        self.profile_complete = !user.roles().is_empty();
        self.quiz.sync(self.profile_complete, now);
        self.current = Some(user);
    }

    fn heal_profile(&mut self, uid: &UserId, email: &str) -> User {
        let mut user = User::new(uid.clone(), "Nouveau Membre");
        user.set_email(Some(email.trim().to_lowercase()));
        user.set_avatar_url(avatar_url_for(email));
        self.write_profile(&user);
        user
    }

    fn write_profile(&self, user: &User) {
        let doc = serde_json::to_value(user).expect("user documents always encode");
        self.store.set(collections::USERS, user.id().as_str(), doc);
    }
}

fn locations_match(a: GeoPoint, b: GeoPoint) -> bool {
    (a.lat - b.lat).abs() < 1e-9 && (a.lng - b.lng).abs() < 1e-9
}

fn avatar_url_for(name: &str) -> String {
    let encoded = name.trim().replace(' ', "+");
    format!("https://ui-avatars.com/api/?name={encoded}&background=D2B48C&color=050B14")
}
