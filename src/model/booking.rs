// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{BookingId, UserId};

/// Linear, terminal booking lifecycle:
///
/// ```text
/// Pending --accept--> Confirmed --complete--> Completed
/// Pending --decline--> Declined
/// ```
///
/// Confirmed, Completed, and Declined admit no further status transition
/// (a review may still be attached to a Completed booking, once).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Declined,
}

impl BookingStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Confirmed => "Confirmée",
            Self::Completed => "Terminée",
            Self::Declined => "Déclinée",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscrowStatus {
    #[default]
    None,
    Held,
    Released,
    Refunded,
}

impl EscrowStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "sans séquestre",
            Self::Held => "fonds bloqués",
            Self::Released => "fonds libérés",
            Self::Refunded => "remboursé",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    id: BookingId,
    client_id: UserId,
    professional_id: UserId,
    date: String,
    time: String,
    duration: u32,
    status: BookingStatus,
    #[serde(default)]
    escrow_status: EscrowStatus,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    review_submitted: bool,
}

impl Booking {
    pub fn new(
        id: BookingId,
        client_id: UserId,
        professional_id: UserId,
        date: impl Into<String>,
        time: impl Into<String>,
        duration: u32,
    ) -> Self {
        Self {
            id,
            client_id,
            professional_id,
            date: date.into(),
            time: time.into(),
            duration: duration.max(1),
            status: BookingStatus::Pending,
            escrow_status: EscrowStatus::None,
            notes: String::new(),
            review_submitted: false,
        }
    }

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn client_id(&self) -> &UserId {
        &self.client_id
    }

    pub fn professional_id(&self) -> &UserId {
        &self.professional_id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn escrow_status(&self) -> EscrowStatus {
        self.escrow_status
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn review_submitted(&self) -> bool {
        self.review_submitted
    }

    pub fn involves(&self, user_id: &UserId) -> bool {
        &self.client_id == user_id || &self.professional_id == user_id
    }

    /// Applies a status transition on behalf of `actor`, enforcing both the
    /// machine's edges and the actor guards:
    /// only the professional accepts or declines a Pending booking, either
    /// party completes a Confirmed one. Escrow piggybacks on the status:
    /// held on confirm, released on complete.
    pub fn transition(
        &mut self,
        actor: &UserId,
        next: BookingStatus,
    ) -> Result<(), TransitionError> {
        if !self.involves(actor) {
            return Err(TransitionError::NotAParty {
                booking_id: self.id.clone(),
            });
        }

        match (self.status, next) {
            (BookingStatus::Pending, BookingStatus::Confirmed)
            | (BookingStatus::Pending, BookingStatus::Declined) => {
                if actor != &self.professional_id {
                    return Err(TransitionError::NotYourCall {
                        from: self.status,
                        to: next,
                    });
                }
            }
            (BookingStatus::Confirmed, BookingStatus::Completed) => {}
            (from, to) => {
                return Err(TransitionError::InvalidTransition { from, to });
            }
        }

        self.status = next;
        match next {
            BookingStatus::Confirmed => self.escrow_status = EscrowStatus::Held,
            BookingStatus::Completed => self.escrow_status = EscrowStatus::Released,
            BookingStatus::Pending | BookingStatus::Declined => {}
        }
        Ok(())
    }

    /// Marks the one-shot review flag. Only the client may review, only a
    /// Completed booking, and only once.
    pub fn mark_reviewed(&mut self, author: &UserId) -> Result<(), TransitionError> {
        if author != &self.client_id {
            return Err(TransitionError::NotYourCall {
                from: self.status,
                to: self.status,
            });
        }
        if self.status != BookingStatus::Completed {
            return Err(TransitionError::NotCompleted {
                status: self.status,
            });
        }
        if self.review_submitted {
            return Err(TransitionError::AlreadyReviewed {
                booking_id: self.id.clone(),
            });
        }
        self.review_submitted = true;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    NotAParty { booking_id: BookingId },
    NotYourCall { from: BookingStatus, to: BookingStatus },
    InvalidTransition { from: BookingStatus, to: BookingStatus },
    NotCompleted { status: BookingStatus },
    AlreadyReviewed { booking_id: BookingId },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAParty { booking_id } => {
                write!(f, "actor is not a party to booking {booking_id}")
            }
            Self::NotYourCall { from, to } => {
                write!(f, "actor may not move booking {from:?} -> {to:?}")
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "no transition {from:?} -> {to:?}")
            }
            Self::NotCompleted { status } => {
                write!(f, "booking is not completed (status={status:?})")
            }
            Self::AlreadyReviewed { booking_id } => {
                write!(f, "booking {booking_id} already has a review")
            }
        }
    }
}

impl std::error::Error for TransitionError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(value: &str) -> UserId {
        UserId::new(value).expect("user id")
    }

    fn booking() -> Booking {
        Booking::new(
            BookingId::new("b:1").expect("booking id"),
            uid("client"),
            uid("pro"),
            "2026-09-01",
            "14:00",
            2,
        )
    }

    #[test]
    fn professional_accepts_pending_and_escrow_is_held() {
        let mut b = booking();
        b.transition(&uid("pro"), BookingStatus::Confirmed)
            .expect("accept");
        assert_eq!(b.status(), BookingStatus::Confirmed);
        assert_eq!(b.escrow_status(), EscrowStatus::Held);
    }

    #[test]
    fn client_may_not_accept_or_decline() {
        let mut b = booking();
        let err = b
            .transition(&uid("client"), BookingStatus::Confirmed)
            .expect_err("guard");
        assert!(matches!(err, TransitionError::NotYourCall { .. }));

        let err = b
            .transition(&uid("client"), BookingStatus::Declined)
            .expect_err("guard");
        assert!(matches!(err, TransitionError::NotYourCall { .. }));
    }

    #[test]
    fn either_party_completes_a_confirmed_booking() {
        let mut b = booking();
        b.transition(&uid("pro"), BookingStatus::Confirmed)
            .expect("accept");
        b.transition(&uid("client"), BookingStatus::Completed)
            .expect("complete");
        assert_eq!(b.status(), BookingStatus::Completed);
        assert_eq!(b.escrow_status(), EscrowStatus::Released);
    }

    #[test]
    fn declined_and_completed_are_terminal() {
        let mut declined = booking();
        declined
            .transition(&uid("pro"), BookingStatus::Declined)
            .expect("decline");
        for next in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
        ] {
            let err = declined.transition(&uid("pro"), next).expect_err("terminal");
            assert!(matches!(err, TransitionError::InvalidTransition { .. }));
        }

        let mut completed = booking();
        completed
            .transition(&uid("pro"), BookingStatus::Confirmed)
            .expect("accept");
        completed
            .transition(&uid("pro"), BookingStatus::Completed)
            .expect("complete");
        let err = completed
            .transition(&uid("client"), BookingStatus::Confirmed)
            .expect_err("terminal");
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    }

    #[test]
    fn pending_reaches_only_confirmed_or_declined() {
        let mut b = booking();
        let err = b
            .transition(&uid("pro"), BookingStatus::Completed)
            .expect_err("no skip");
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    }

    #[test]
    fn strangers_cannot_touch_the_booking() {
        let mut b = booking();
        let err = b
            .transition(&uid("nobody"), BookingStatus::Confirmed)
            .expect_err("not a party");
        assert!(matches!(err, TransitionError::NotAParty { .. }));
    }

    #[test]
    fn review_is_client_only_completed_only_once() {
        let mut b = booking();
        let err = b.mark_reviewed(&uid("client")).expect_err("not completed");
        assert!(matches!(err, TransitionError::NotCompleted { .. }));

        b.transition(&uid("pro"), BookingStatus::Confirmed)
            .expect("accept");
        b.transition(&uid("client"), BookingStatus::Completed)
            .expect("complete");

        let err = b.mark_reviewed(&uid("pro")).expect_err("client only");
        assert!(matches!(err, TransitionError::NotYourCall { .. }));

        b.mark_reviewed(&uid("client")).expect("first review");
        let err = b.mark_reviewed(&uid("client")).expect_err("once");
        assert!(matches!(err, TransitionError::AlreadyReviewed { .. }));
    }
}
