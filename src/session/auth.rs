// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::model::UserId;

/// Auth failures, mirroring the managed provider's taxonomy. They surface
/// as inline text at the failed action and never touch other session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials,
    NotFound,
    RateLimited,
    AlreadyInUse,
    WeakSecret,
    InvalidIdentity,
}

impl AuthError {
    /// The inline message shown next to the form.
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Mot de passe incorrect.",
            Self::NotFound => "Aucun compte pour cet email.",
            Self::RateLimited => "Trop de tentatives, réessayez plus tard.",
            Self::AlreadyInUse => "Cet email est déjà utilisé.",
            Self::WeakSecret => "Mot de passe trop court (6 caractères minimum).",
            Self::InvalidIdentity => "Email invalide.",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => f.write_str("invalid credentials"),
            Self::NotFound => f.write_str("account not found"),
            Self::RateLimited => f.write_str("rate limited"),
            Self::AlreadyInUse => f.write_str("identifier already in use"),
            Self::WeakSecret => f.write_str("secret too weak"),
            Self::InvalidIdentity => f.write_str("invalid identifier"),
        }
    }
}

impl std::error::Error for AuthError {}

const MIN_SECRET_LEN: usize = 6;

static UID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// In-process stand-in for the external auth provider: a credential table
/// that hands out stable string uids. Clones share the same table, so every
/// session sees the same accounts, just like a real provider. Password
/// handling is intentionally naive; real credential storage belongs to the
/// external provider.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuth {
    accounts: Arc<Mutex<BTreeMap<String, Account>>>,
}

#[derive(Debug)]
struct Account {
    secret: String,
    uid: UserId,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Account>> {
        self.accounts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn sign_up(&self, email: &str, secret: &str) -> Result<UserId, AuthError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidIdentity);
        }
        if secret.len() < MIN_SECRET_LEN {
            return Err(AuthError::WeakSecret);
        }
        let mut accounts = self.lock();
        if accounts.contains_key(&email) {
            return Err(AuthError::AlreadyInUse);
        }

        let serial = UID_COUNTER.fetch_add(1, Ordering::Relaxed);
        let uid = UserId::new(format!("uid-{serial}")).map_err(|_| AuthError::InvalidIdentity)?;
        accounts.insert(
            email,
            Account {
                secret: secret.to_owned(),
                uid: uid.clone(),
            },
        );
        Ok(uid)
    }

    pub fn sign_in(&self, email: &str, secret: &str) -> Result<UserId, AuthError> {
        let email = email.trim().to_lowercase();
        let accounts = self.lock();
        let account = accounts.get(&email).ok_or(AuthError::NotFound)?;
        if account.secret != secret {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(account.uid.clone())
    }

    /// Best-effort; the provider sends the mail (or not), nothing changes
    /// locally either way.
    pub fn reset_password(&self, _email: &str) {}

    pub fn remove_account(&self, uid: &UserId) {
        self.lock().retain(|_, account| &account.uid != uid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_up_then_sign_in_round_trips() {
        let auth = MemoryAuth::new();
        let uid = auth.sign_up("anna@example.com", "secret1").expect("sign up");
        let again = auth.sign_in("Anna@Example.com", "secret1").expect("sign in");
        assert_eq!(uid, again);
    }

    #[test]
    fn sign_up_rejects_bad_inputs() {
        let auth = MemoryAuth::new();
        assert_eq!(auth.sign_up("", "secret1"), Err(AuthError::InvalidIdentity));
        assert_eq!(
            auth.sign_up("not-an-email", "secret1"),
            Err(AuthError::InvalidIdentity)
        );
        assert_eq!(
            auth.sign_up("anna@example.com", "short"),
            Err(AuthError::WeakSecret)
        );
        auth.sign_up("anna@example.com", "secret1").expect("sign up");
        assert_eq!(
            auth.sign_up("anna@example.com", "another1"),
            Err(AuthError::AlreadyInUse)
        );
    }

    #[test]
    fn sign_in_distinguishes_missing_from_wrong_secret() {
        let auth = MemoryAuth::new();
        auth.sign_up("anna@example.com", "secret1").expect("sign up");
        assert_eq!(
            auth.sign_in("ben@example.com", "secret1"),
            Err(AuthError::NotFound)
        );
        assert_eq!(
            auth.sign_in("anna@example.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn clones_share_the_account_table() {
        let auth = MemoryAuth::new();
        let handle = auth.clone();
        let uid = auth.sign_up("anna@example.com", "secret1").expect("sign up");
        let again = handle.sign_in("anna@example.com", "secret1").expect("sign in");
        assert_eq!(uid, again);
    }

    #[test]
    fn removed_account_cannot_sign_in() {
        let auth = MemoryAuth::new();
        let uid = auth.sign_up("anna@example.com", "secret1").expect("sign up");
        auth.remove_account(&uid);
        assert_eq!(
            auth.sign_in("anna@example.com", "secret1"),
            Err(AuthError::NotFound)
        );
    }
}
