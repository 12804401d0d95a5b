// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use crossterm::event::{KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;

use super::*;
use crate::session::QUIZ_PROMPT_DELAY;

fn demo_app() -> App {
    let store = MemoryStore::new();
    seed_demo(&store);
    App::new(store, Prefs::in_memory(), Box::new(NullSuggestions))
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Registers and completes setup through the key handlers, landing on Main.
fn onboarded_app() -> App {
    let mut app = demo_app();
    app.session.mark_tour_seen();

    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Iris Lune");
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "iris@example.com");
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "secret-9");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Setup);

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Main);
    app.tick(Instant::now());
    app
}

#[test]
fn starts_behind_the_auth_gate() {
    let app = demo_app();
    assert_eq!(app.screen(), Screen::Auth);
}

#[test]
fn failed_login_surfaces_a_toast_and_stays_on_auth() {
    let mut app = demo_app();
    type_text(&mut app, "nobody@example.com");
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "whatever");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Auth);
    assert!(app.toast.is_some());
}

#[test]
fn registration_gates_to_setup_then_main() {
    let app = onboarded_app();
    assert!(app.session.is_profile_complete());
    assert_eq!(app.nav.active_tab(), ActiveTab::Discover);
}

#[test]
fn first_setup_auto_starts_the_tour() {
    let mut app = demo_app();
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Iris");
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "iris@example.com");
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "secret-9");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);

    assert!(app.nav.is_tour_active());

    // Dismissing persists the flag.
    press(&mut app, KeyCode::Enter);
    assert!(!app.nav.is_tour_active());
    assert!(app.session.tour_seen());
}

#[test]
fn number_keys_switch_tabs() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Char('4'));
    assert_eq!(app.nav.active_tab(), ActiveTab::Bookings);
    press(&mut app, KeyCode::Char('1'));
    assert_eq!(app.nav.active_tab(), ActiveTab::Discover);
}

#[test]
fn enter_opens_a_profile_and_escape_backs_out() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Enter);
    assert!(matches!(app.nav.drill_down(), DrillDown::Profile(_)));
    press(&mut app, KeyCode::Esc);
    assert_eq!(*app.nav.drill_down(), DrillDown::None);
}

#[test]
fn escape_closes_the_topmost_overlay_first() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Enter);
    let DrillDown::Profile(user_id) = app.nav.drill_down().clone() else {
        panic!("expected a profile drill-down");
    };
    app.nav.set_quiz_open(true);
    app.nav.set_booking_user(Some(user_id));

    press(&mut app, KeyCode::Esc);
    assert!(app.nav.booking_user().is_none());
    assert!(app.nav.is_quiz_open());

    press(&mut app, KeyCode::Esc);
    assert!(!app.nav.is_quiz_open());
    assert!(matches!(app.nav.drill_down(), DrillDown::Profile(_)));
}

#[test]
fn chat_flows_from_profile_to_stored_message() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.input_mode, InputMode::Chat);
    assert_eq!(app.nav.active_tab(), ActiveTab::Messages);
    let DrillDown::Thread(thread_id) = app.nav.drill_down().clone() else {
        panic!("expected a thread drill-down");
    };

    type_text(&mut app, "Salut, dispo demain ?");
    press(&mut app, KeyCode::Enter);
    assert!(app.chat_input.is_empty());

    app.tick(Instant::now());
    let thread = app.cache.thread(&thread_id).expect("thread cached");
    assert_eq!(thread.messages().len(), 1);
    assert_eq!(thread.last_message(), "Salut, dispo demain ?");
}

#[test]
fn booking_overlay_files_a_pending_request() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('b'));
    assert!(app.nav.booking_user().is_some());

    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Enter);
    assert!(app.nav.booking_user().is_none());

    app.tick(Instant::now());
    let me = app.session.current_user_id().unwrap().clone();
    let bookings = app.cache.bookings_for(&me);
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].status(), BookingStatus::Pending);
    assert_eq!(bookings[0].duration(), 3);
}

#[test]
fn search_narrows_the_talent_list() {
    let mut app = onboarded_app();
    let before = app.visible_users().len();
    assert!(before > 1);

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "léa");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.visible_users().len(), 1);

    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.visible_users().len(), before);
}

#[test]
fn availability_filter_toggles() {
    let mut app = onboarded_app();
    let before = app.visible_users().len();
    press(&mut app, KeyCode::Char('f'));
    assert!(app.visible_users().len() < before);
    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.visible_users().len(), before);
}

#[test]
fn discover_mode_switches_to_spots() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Char('m'));
    assert_eq!(app.nav.discover_mode(), DiscoverMode::Spots);
    assert!(!app.visible_spots().is_empty());
}

#[test]
fn favorites_collect_from_the_profile_view() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('g'));
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.favorite_users().len(), 1);
}

#[test]
fn snapshot_feed_refreshes_the_cache() {
    let mut app = onboarded_app();
    let before = app.cache.users().len();
    let extra = User::new(UserId::new("extra-1").unwrap(), "Extra");
    app.store.set(
        collections::USERS,
        "extra-1",
        serde_json::to_value(&extra).unwrap(),
    );
    app.tick(Instant::now());
    assert_eq!(app.cache.users().len(), before + 1);
}

#[test]
fn quiz_nudge_fires_after_the_delay() {
    let mut app = onboarded_app();
    let now = Instant::now();
    app.tick(now);
    app.toast = None;
    app.tick(now + QUIZ_PROMPT_DELAY + Duration::from_secs(1));
    assert!(app.toast.is_some());
}

#[test]
fn quiz_run_scores_correct_answers() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Char('z'));
    assert!(app.nav.is_quiz_open());
    assert!(!app.quiz.questions.is_empty());

    let total = app.quiz.questions.len();
    for i in 0..total {
        let correct = app.quiz.questions[i].correct_answer_index;
        for _ in 0..correct {
            press(&mut app, KeyCode::Right);
        }
        press(&mut app, KeyCode::Enter);
    }
    assert!(app.quiz.finished);
    assert_eq!(app.quiz.score as usize, total);

    press(&mut app, KeyCode::Enter);
    assert!(!app.nav.is_quiz_open());
}

#[test]
fn contract_overlay_opens_on_the_selected_booking() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('b'));
    press(&mut app, KeyCode::Enter);
    app.tick(Instant::now());

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('4'));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('n'));
    assert!(app.nav.signing_booking().is_some());

    press(&mut app, KeyCode::Esc);
    assert!(app.nav.signing_booking().is_none());
}

#[test]
fn profile_suggestions_apply_from_the_editor() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Char('5'));
    press(&mut app, KeyCode::Char('e'));
    press(&mut app, KeyCode::Char('s'));

    let me = app.session.current_user().unwrap();
    assert_eq!(me.headline(), "Créateur");
    assert_eq!(me.bio(), "Passionné.");
    assert!(!app.nav.is_editing_profile());
}

#[test]
fn forgotten_password_is_acknowledged_from_the_auth_gate() {
    let mut app = demo_app();
    type_text(&mut app, "lea@example.com");
    app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
    assert_eq!(app.screen(), Screen::Auth);
    assert!(app.toast.is_some());
}

#[test]
fn logout_returns_to_the_auth_gate() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Char('5'));
    press(&mut app, KeyCode::Char('o'));
    assert_eq!(app.screen(), Screen::Auth);
    assert_eq!(app.nav.active_tab(), ActiveTab::Discover);
}

#[test]
fn profile_tab_keys_open_and_close_the_sub_views() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Char('5'));

    press(&mut app, KeyCode::Char('g'));
    assert_eq!(*app.nav.drill_down(), DrillDown::SubView(SubView::Gallery));
    press(&mut app, KeyCode::Esc);
    assert_eq!(*app.nav.drill_down(), DrillDown::None);

    press(&mut app, KeyCode::Char('p'));
    assert_eq!(*app.nav.drill_down(), DrillDown::SubView(SubView::Payment));
    press(&mut app, KeyCode::Esc);

    press(&mut app, KeyCode::Char('m'));
    assert_eq!(*app.nav.drill_down(), DrillDown::SubView(SubView::Moodboard));
}

/// Renders every screen and the layered states on a test backend so a widget
/// regression surfaces as a panic here rather than on a live terminal.
#[test]
fn every_screen_renders_on_a_test_backend() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

    let mut app = demo_app();
    terminal.draw(|frame| draw(frame, &mut app)).unwrap();

    let mut app = onboarded_app();
    terminal.draw(|frame| draw(frame, &mut app)).unwrap();

    for tab in ['2', '3', '4', '5'] {
        press(&mut app, KeyCode::Char(tab));
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
    }

    press(&mut app, KeyCode::Char('5'));
    press(&mut app, KeyCode::Char('p'));
    terminal.draw(|frame| draw(frame, &mut app)).unwrap();
    press(&mut app, KeyCode::Esc);

    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Enter);
    terminal.draw(|frame| draw(frame, &mut app)).unwrap();

    press(&mut app, KeyCode::Char('b'));
    app.show_help = true;
    terminal.draw(|frame| draw(frame, &mut app)).unwrap();
}

#[test]
fn help_overlay_opens_and_any_key_closes_it() {
    let mut app = onboarded_app();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.show_help);
    press(&mut app, KeyCode::Char('x'));
    assert!(!app.show_help);
    assert_eq!(app.nav.active_tab(), ActiveTab::Discover);
}
