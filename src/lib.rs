// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Halide, a terminal client for a photographer/videographer/model
//! marketplace: reactive document store, session and navigation state,
//! bookings with escrow, chat, and best-effort content suggestions.

pub mod cache;
pub mod model;
pub mod nav;
pub mod ops;
pub mod session;
pub mod store;
pub mod suggest;
pub mod tui;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
