// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Users, message threads, bookings, and spots, as the remote documents
//! describe them, plus the typed ids that unify the legacy numeric/string
//! identity split at the decode boundary.

pub mod booking;
pub mod fixtures;
pub mod ids;
pub mod spot;
pub mod thread;
pub mod user;

pub use booking::{Booking, BookingStatus, EscrowStatus, TransitionError};
pub use ids::{BookingId, Id, IdError, MessageId, ReviewId, SpotId, ThreadId, UserId};
pub use spot::{Spot, SpotKind};
pub use thread::{canonical_thread_id, ChatMessage, MessageThread};
pub use user::{
    GeoPoint, MediaKind, PortfolioItem, Review, Role, RoleFilter, User, VerificationStatus,
    FALLBACK_LOCATION,
};
