// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! What is currently on screen.
//!
//! The visible surface is composed of exactly one primary tab, at most one
//! drill-down view layered over it, and any number of independent modal
//! overlays. Drill-down exclusivity holds by construction (one enum);
//! overlays deliberately have no cross-clearing rules, only a z-order in
//! which the later-opened one renders on top.
//!
//! Navigation is strictly one level deep beyond the tab: `handle_back` is a
//! reset to the tab root, never a pop through history.

use std::collections::BTreeSet;

use crate::model::{BookingId, PortfolioItem, RoleFilter, ThreadId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Discover,
    Favorites,
    Messages,
    Bookings,
    Profile,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 5] = [
        ActiveTab::Discover,
        ActiveTab::Favorites,
        ActiveTab::Messages,
        ActiveTab::Bookings,
        ActiveTab::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Discover => "Découvrir",
            Self::Favorites => "Favoris",
            Self::Messages => "Messages",
            Self::Bookings => "Réservations",
            Self::Profile => "Profil",
        }
    }
}

/// Grid or map rendering of the discover tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoverView {
    Grid,
    #[default]
    Map,
}

/// Whether discover browses talents or shooting spots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoverMode {
    #[default]
    Talents,
    Spots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubView {
    Moodboard,
    Gallery,
    Payment,
}

impl SubView {
    pub fn title(self) -> &'static str {
        match self {
            Self::Moodboard => "Moodboard Collab",
            Self::Gallery => "Livrables Pro",
            Self::Payment => "Portefeuille Elite",
        }
    }
}

/// At most one focused, non-tab view at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DrillDown {
    #[default]
    None,
    Profile(UserId),
    Thread(ThreadId),
    SubView(SubView),
}

/// The independently toggleable overlays, named for z-order bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Quiz,
    Booking,
    Signing,
    Onboarding,
    Reviewing,
    EditingProfile,
    Tour,
    Projecting,
    FullScreenMedia,
}

#[derive(Debug, Default)]
pub struct NavigationState {
    active_tab: ActiveTab,
    discover_view: DiscoverView,
    discover_mode: DiscoverMode,
    drill_down: DrillDown,

    role_filter: RoleFilter,
    spot_category: Option<String>,
    available_only: bool,
    search: String,

    favorites: BTreeSet<UserId>,

    quiz_open: bool,
    booking_user: Option<UserId>,
    signing_booking: Option<BookingId>,
    onboarding_open: bool,
    reviewing_booking: Option<BookingId>,
    editing_profile: bool,
    tour_active: bool,
    projecting_media: Option<PortfolioItem>,
    full_screen_media: Option<PortfolioItem>,
    overlay_order: Vec<OverlayKind>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    pub fn discover_view(&self) -> DiscoverView {
        self.discover_view
    }

    pub fn toggle_discover_view(&mut self) {
        self.discover_view = match self.discover_view {
            DiscoverView::Grid => DiscoverView::Map,
            DiscoverView::Map => DiscoverView::Grid,
        };
    }

    pub fn discover_mode(&self) -> DiscoverMode {
        self.discover_mode
    }

    pub fn set_discover_mode(&mut self, mode: DiscoverMode) {
        self.discover_mode = mode;
    }

    pub fn drill_down(&self) -> &DrillDown {
        &self.drill_down
    }

    /// Switches the primary tab. Always resets drill-down first, so the tab
    /// root is what becomes visible.
    pub fn select_tab(&mut self, tab: ActiveTab) {
        self.handle_back();
        self.active_tab = tab;
    }

    /// Opens a profile detail over the current tab. The tab does not move:
    /// backing out returns to wherever the user was browsing.
    pub fn view_profile(&mut self, user_id: UserId) {
        self.drill_down = DrillDown::Profile(user_id);
    }

    /// Opens a chat thread and re-anchors the tab to Messages. Threads are
    /// reachable from several tabs but conceptually live under Messages,
    /// hence the asymmetry with `view_profile`.
    pub fn select_thread(&mut self, thread_id: ThreadId) {
        self.drill_down = DrillDown::Thread(thread_id);
        self.active_tab = ActiveTab::Messages;
    }

    pub fn open_sub_view(&mut self, sub_view: SubView) {
        self.drill_down = DrillDown::SubView(sub_view);
    }

    /// The universal escape: clears drill-down and any in-progress AR
    /// projection, landing on the current tab's root. Idempotent.
    pub fn handle_back(&mut self) {
        self.drill_down = DrillDown::None;
        self.set_projecting_media(None);
    }

    /// Closes the guided tour overlay. Persisting the tour-seen flag is the
    /// dispatcher's half of this operation.
    pub fn close_tour(&mut self) {
        self.set_tour_active(false);
    }

    pub fn role_filter(&self) -> RoleFilter {
        self.role_filter
    }

    pub fn set_role_filter(&mut self, filter: RoleFilter) {
        self.role_filter = filter;
    }

    pub fn spot_category(&self) -> &str {
        self.spot_category.as_deref().unwrap_or("All")
    }

    pub fn set_spot_category(&mut self, category: impl Into<String>) {
        self.spot_category = Some(category.into());
    }

    pub fn available_only(&self) -> bool {
        self.available_only
    }

    pub fn set_available_only(&mut self, value: bool) {
        self.available_only = value;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn is_favorite(&self, user_id: &UserId) -> bool {
        self.favorites.contains(user_id)
    }

    pub fn toggle_favorite(&mut self, user_id: UserId) {
        if !self.favorites.remove(&user_id) {
            self.favorites.insert(user_id);
        }
    }

    pub fn favorites(&self) -> &BTreeSet<UserId> {
        &self.favorites
    }

    pub fn is_quiz_open(&self) -> bool {
        self.quiz_open
    }

    pub fn set_quiz_open(&mut self, open: bool) {
        self.quiz_open = open;
        self.track_overlay(OverlayKind::Quiz, open);
    }

    pub fn booking_user(&self) -> Option<&UserId> {
        self.booking_user.as_ref()
    }

    pub fn set_booking_user(&mut self, user_id: Option<UserId>) {
        let open = user_id.is_some();
        self.booking_user = user_id;
        self.track_overlay(OverlayKind::Booking, open);
    }

    pub fn signing_booking(&self) -> Option<&BookingId> {
        self.signing_booking.as_ref()
    }

    pub fn set_signing_booking(&mut self, booking_id: Option<BookingId>) {
        let open = booking_id.is_some();
        self.signing_booking = booking_id;
        self.track_overlay(OverlayKind::Signing, open);
    }

    pub fn is_onboarding_open(&self) -> bool {
        self.onboarding_open
    }

    pub fn set_onboarding_open(&mut self, open: bool) {
        self.onboarding_open = open;
        self.track_overlay(OverlayKind::Onboarding, open);
    }

    pub fn reviewing_booking(&self) -> Option<&BookingId> {
        self.reviewing_booking.as_ref()
    }

    pub fn set_reviewing_booking(&mut self, booking_id: Option<BookingId>) {
        let open = booking_id.is_some();
        self.reviewing_booking = booking_id;
        self.track_overlay(OverlayKind::Reviewing, open);
    }

    pub fn is_editing_profile(&self) -> bool {
        self.editing_profile
    }

    pub fn set_editing_profile(&mut self, open: bool) {
        self.editing_profile = open;
        self.track_overlay(OverlayKind::EditingProfile, open);
    }

    pub fn is_tour_active(&self) -> bool {
        self.tour_active
    }

    pub fn set_tour_active(&mut self, active: bool) {
        self.tour_active = active;
        self.track_overlay(OverlayKind::Tour, active);
    }

    pub fn projecting_media(&self) -> Option<&PortfolioItem> {
        self.projecting_media.as_ref()
    }

    pub fn set_projecting_media(&mut self, media: Option<PortfolioItem>) {
        let open = media.is_some();
        self.projecting_media = media;
        self.track_overlay(OverlayKind::Projecting, open);
    }

    pub fn full_screen_media(&self) -> Option<&PortfolioItem> {
        self.full_screen_media.as_ref()
    }

    pub fn set_full_screen_media(&mut self, media: Option<PortfolioItem>) {
        let open = media.is_some();
        self.full_screen_media = media;
        self.track_overlay(OverlayKind::FullScreenMedia, open);
    }

    /// Currently open overlays, oldest first: render in this order and the
    /// later-opened one ends up on top.
    pub fn overlay_order(&self) -> &[OverlayKind] {
        &self.overlay_order
    }

    pub fn any_overlay_open(&self) -> bool {
        !self.overlay_order.is_empty()
    }

    /// Clears everything bound to an identity: called on logout so the next
    /// session starts from the tab grid.
    pub fn reset(&mut self) {
        *self = Self {
            discover_view: self.discover_view,
            ..Self::default()
        };
    }

    fn track_overlay(&mut self, kind: OverlayKind, open: bool) {
        self.overlay_order.retain(|k| *k != kind);
        if open {
            self.overlay_order.push(kind);
        }
    }
}

#[cfg(test)]
mod tests;
