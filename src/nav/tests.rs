// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::*;
use crate::model::{MediaKind, Role};

fn uid(raw: &str) -> UserId {
    UserId::new(raw).unwrap()
}

fn tid(raw: &str) -> ThreadId {
    ThreadId::new(raw).unwrap()
}

fn media(url: &str) -> PortfolioItem {
    PortfolioItem {
        kind: MediaKind::Image,
        url: url.to_string(),
        thumbnail_url: None,
    }
}

#[test]
fn starts_on_the_discover_map() {
    let nav = NavigationState::new();
    assert_eq!(nav.active_tab(), ActiveTab::Discover);
    assert_eq!(nav.discover_view(), DiscoverView::Map);
    assert_eq!(nav.discover_mode(), DiscoverMode::Talents);
    assert_eq!(*nav.drill_down(), DrillDown::None);
    assert!(!nav.any_overlay_open());
}

#[test]
fn drill_downs_are_mutually_exclusive() {
    let mut nav = NavigationState::new();
    nav.view_profile(uid("u1"));
    assert_eq!(*nav.drill_down(), DrillDown::Profile(uid("u1")));

    nav.select_thread(tid("u1_u2"));
    assert_eq!(*nav.drill_down(), DrillDown::Thread(tid("u1_u2")));

    nav.open_sub_view(SubView::Moodboard);
    assert_eq!(*nav.drill_down(), DrillDown::SubView(SubView::Moodboard));
}

#[test]
fn viewing_a_profile_keeps_the_current_tab() {
    let mut nav = NavigationState::new();
    nav.select_tab(ActiveTab::Favorites);
    nav.view_profile(uid("u1"));
    assert_eq!(nav.active_tab(), ActiveTab::Favorites);
}

#[test]
fn selecting_a_thread_forces_the_messages_tab() {
    let mut nav = NavigationState::new();
    nav.view_profile(uid("u1"));
    nav.select_thread(tid("u1_u2"));
    assert_eq!(nav.active_tab(), ActiveTab::Messages);
    assert_eq!(*nav.drill_down(), DrillDown::Thread(tid("u1_u2")));
}

#[test]
fn back_returns_to_the_tab_root_and_is_idempotent() {
    let mut nav = NavigationState::new();
    nav.select_tab(ActiveTab::Bookings);
    nav.view_profile(uid("u1"));
    nav.set_projecting_media(Some(media("https://cdn.example/a.jpg")));

    nav.handle_back();
    assert_eq!(*nav.drill_down(), DrillDown::None);
    assert!(nav.projecting_media().is_none());
    assert_eq!(nav.active_tab(), ActiveTab::Bookings);

    nav.handle_back();
    assert_eq!(*nav.drill_down(), DrillDown::None);
}

#[test]
fn switching_tabs_clears_the_drill_down_first() {
    let mut nav = NavigationState::new();
    nav.select_thread(tid("u1_u2"));
    nav.select_tab(ActiveTab::Profile);
    assert_eq!(nav.active_tab(), ActiveTab::Profile);
    assert_eq!(*nav.drill_down(), DrillDown::None);
}

#[test]
fn overlays_do_not_clear_each_other() {
    let mut nav = NavigationState::new();
    nav.set_quiz_open(true);
    nav.set_booking_user(Some(uid("u2")));
    nav.set_editing_profile(true);

    assert!(nav.is_quiz_open());
    assert_eq!(nav.booking_user(), Some(&uid("u2")));
    assert!(nav.is_editing_profile());

    nav.set_booking_user(None);
    assert!(nav.is_quiz_open());
    assert!(nav.is_editing_profile());
}

#[test]
fn later_opened_overlay_renders_on_top() {
    let mut nav = NavigationState::new();
    nav.set_booking_user(Some(uid("u2")));
    nav.set_signing_booking(Some(BookingId::new("b1").unwrap()));
    assert_eq!(
        nav.overlay_order(),
        &[OverlayKind::Booking, OverlayKind::Signing]
    );

    // Reopening moves an overlay back to the top.
    nav.set_booking_user(Some(uid("u3")));
    assert_eq!(
        nav.overlay_order(),
        &[OverlayKind::Signing, OverlayKind::Booking]
    );

    nav.set_signing_booking(None);
    assert_eq!(nav.overlay_order(), &[OverlayKind::Booking]);
}

#[test]
fn back_leaves_unrelated_overlays_alone() {
    let mut nav = NavigationState::new();
    nav.view_profile(uid("u1"));
    nav.set_quiz_open(true);
    nav.set_full_screen_media(Some(media("https://cdn.example/b.jpg")));

    nav.handle_back();
    assert!(nav.is_quiz_open());
    assert!(nav.full_screen_media().is_some());
}

#[test]
fn close_tour_only_touches_the_tour() {
    let mut nav = NavigationState::new();
    nav.set_tour_active(true);
    nav.set_onboarding_open(true);
    nav.close_tour();
    assert!(!nav.is_tour_active());
    assert!(nav.is_onboarding_open());
}

#[test]
fn favorites_toggle_on_and_off() {
    let mut nav = NavigationState::new();
    assert!(!nav.is_favorite(&uid("u1")));
    nav.toggle_favorite(uid("u1"));
    assert!(nav.is_favorite(&uid("u1")));
    nav.toggle_favorite(uid("u1"));
    assert!(!nav.is_favorite(&uid("u1")));
}

#[test]
fn filters_default_open() {
    let nav = NavigationState::new();
    assert_eq!(nav.role_filter(), RoleFilter::All);
    assert_eq!(nav.spot_category(), "All");
    assert!(!nav.available_only());
    assert_eq!(nav.search(), "");
}

#[test]
fn filter_state_holds_what_was_set() {
    let mut nav = NavigationState::new();
    nav.set_role_filter(RoleFilter::Only(Role::Photographer));
    nav.set_spot_category("Urbain");
    nav.set_available_only(true);
    nav.set_search("léa");
    assert_eq!(nav.role_filter(), RoleFilter::Only(Role::Photographer));
    assert_eq!(nav.spot_category(), "Urbain");
    assert!(nav.available_only());
    assert_eq!(nav.search(), "léa");
}

#[test]
fn reset_clears_identity_bound_state_but_keeps_the_view_choice() {
    let mut nav = NavigationState::new();
    nav.toggle_discover_view();
    nav.select_tab(ActiveTab::Messages);
    nav.toggle_favorite(uid("u1"));
    nav.set_quiz_open(true);
    nav.set_search("marc");

    nav.reset();
    assert_eq!(nav.active_tab(), ActiveTab::Discover);
    assert!(nav.favorites().is_empty());
    assert!(!nav.is_quiz_open());
    assert!(!nav.any_overlay_open());
    assert_eq!(nav.search(), "");
    assert_eq!(nav.discover_view(), DiscoverView::Grid);
}
