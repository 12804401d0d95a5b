// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm): auth and setup gating, the
//! five main tabs, drill-down views and the modal overlay stack. All shared
//! state flows through the store's snapshot feeds; the draw pass only reads
//! the cache and session.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tokio::sync::broadcast;

use crate::cache::EntityCache;
use crate::model::{BookingStatus, Role, RoleFilter, Spot, User, UserId};
use crate::nav::{
    ActiveTab, DiscoverMode, DiscoverView, DrillDown, NavigationState, OverlayKind, SubView,
};
use crate::ops::Dispatcher;
use crate::session::{Prefs, SessionStore};
use crate::store::{collections, MemoryStore, Snapshot};
use crate::suggest::{NullSuggestions, QuizQuestion, StaticSuggestions, SuggestionProvider};

const ACCENT_COLOR: Color = Color::Rgb(210, 180, 140);
const DIM_COLOR: Color = Color::DarkGray;
const ALERT_COLOR: Color = Color::LightRed;
const OK_COLOR: Color = Color::LightGreen;
const FOOTER_BRAND: &str = " HALIDE ";
const TOAST_TTL: Duration = Duration::from_secs(3);

/// Runs the interactive terminal UI against an empty store.
pub fn run(prefs: Prefs) -> Result<(), Box<dyn Error>> {
    run_app(App::new(MemoryStore::new(), prefs, Box::new(NullSuggestions)))
}

/// Runs with the built-in demo catalogue of talents and spots.
pub fn run_demo(prefs: Prefs) -> Result<(), Box<dyn Error>> {
    let store = MemoryStore::new();
    seed_demo(&store);
    let suggestions = StaticSuggestions::with_spots(crate::model::fixtures::demo_spots());
    run_app(App::new(store, prefs, Box::new(suggestions)))
}

fn run_app(mut app: App) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;

    while !app.should_quit {
        app.tick(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

fn seed_demo(store: &MemoryStore) {
    for user in crate::model::fixtures::demo_users() {
        let doc = serde_json::to_value(&user).expect("demo users always encode");
        store.set(collections::USERS, user.id().as_str(), doc);
    }
    for spot in crate::model::fixtures::demo_spots() {
        let doc = serde_json::to_value(&spot).expect("demo spots always encode");
        store.set(collections::SPOTS, spot.id().as_str(), doc);
    }
}

/// Which gate the user is currently behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Auth,
    Setup,
    Main,
}

/// Whether key presses mutate a text buffer or drive navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Search,
    Chat,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthIntent {
    Login,
    Register,
}

#[derive(Debug, Default)]
struct AuthForm {
    intent_register: bool,
    name: String,
    email: String,
    secret: String,
    field: usize,
}

impl AuthForm {
    fn field_count(&self) -> usize {
        if self.intent_register {
            3
        } else {
            2
        }
    }

    fn active_buffer(&mut self) -> &mut String {
        match (self.intent_register, self.field) {
            (true, 0) => &mut self.name,
            (true, 1) | (false, 0) => &mut self.email,
            _ => &mut self.secret,
        }
    }
}

#[derive(Debug, Default)]
struct SetupForm {
    name: String,
    roles: [bool; 3],
    cursor: usize,
}

impl SetupForm {
    fn selected_roles(&self) -> Vec<Role> {
        Role::ALL
            .iter()
            .zip(self.roles)
            .filter_map(|(role, on)| on.then_some(*role))
            .collect()
    }
}

#[derive(Debug, Default)]
struct QuizRun {
    questions: Vec<QuizQuestion>,
    current: usize,
    choice: usize,
    score: u32,
    finished: bool,
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    store: MemoryStore,
    session: SessionStore,
    cache: EntityCache,
    nav: NavigationState,
    dispatcher: Dispatcher,
    suggestions: Box<dyn SuggestionProvider>,
    feeds: Vec<broadcast::Receiver<Snapshot>>,

    input_mode: InputMode,
    auth_form: AuthForm,
    setup_form: SetupForm,
    chat_input: String,
    quiz: QuizRun,
    review_rating: u8,
    review_comment: String,
    booking_duration: u32,
    list_state: ListState,

    toast: Option<Toast>,
    show_help: bool,
    should_quit: bool,
}

impl App {
    fn new(store: MemoryStore, prefs: Prefs, suggestions: Box<dyn SuggestionProvider>) -> Self {
        let feeds = [
            collections::USERS,
            collections::MESSAGES,
            collections::BOOKINGS,
            collections::SPOTS,
        ]
        .iter()
        .map(|collection| store.subscribe(collection))
        .collect();

        let mut cache = EntityCache::new();
        cache.prime(&store);

        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            session: SessionStore::new(store.clone(), prefs),
            dispatcher: Dispatcher::new(store.clone()),
            store,
            cache,
            nav: NavigationState::new(),
            suggestions,
            feeds,
            input_mode: InputMode::Form,
            auth_form: AuthForm::default(),
            setup_form: SetupForm::default(),
            chat_input: String::new(),
            quiz: QuizRun::default(),
            review_rating: 5,
            review_comment: String::new(),
            booking_duration: 2,
            list_state,
            toast: None,
            show_help: false,
            should_quit: false,
        }
    }

    fn screen(&self) -> Screen {
        if !self.session.is_logged_in() {
            Screen::Auth
        } else if !self.session.is_profile_complete() {
            Screen::Setup
        } else {
            Screen::Main
        }
    }

    /// Per-frame upkeep: drain the snapshot feeds into the cache, reconcile
    /// the session against the fresh users projection, expire the toast and
    /// surface the deferred quiz nudge.
    fn tick(&mut self, now: Instant) {
        let mut users_changed = false;
        for feed in &mut self.feeds {
            while let Ok(snapshot) = feed.try_recv() {
                users_changed |= snapshot.collection == collections::USERS;
                self.cache.apply_snapshot(&snapshot);
            }
        }
        if users_changed {
            let users = self.cache.users().to_vec();
            self.session.sync_users(&users, now);
        }

        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
        }

        if self
            .session
            .poll_quiz_prompt(now, self.nav.is_quiz_open())
        {
            self.set_toast("Quiz Elite disponible ! Appuyez sur Q");
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.screen() {
            Screen::Auth => self.handle_auth_key(key),
            Screen::Setup => self.handle_setup_key(key.code),
            Screen::Main => self.handle_main_key(key.code),
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
            self.session.reset_password(&self.auth_form.email);
            self.set_toast("Email de réinitialisation envoyé (si le compte existe)");
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => {
                self.auth_form.intent_register = !self.auth_form.intent_register;
                self.auth_form.field = 0;
            }
            KeyCode::Up => {
                self.auth_form.field = self.auth_form.field.saturating_sub(1);
            }
            KeyCode::Down => {
                self.auth_form.field = (self.auth_form.field + 1) % self.auth_form.field_count();
            }
            KeyCode::Enter => {
                if self.auth_form.field + 1 < self.auth_form.field_count() {
                    self.auth_form.field += 1;
                } else {
                    self.submit_auth();
                }
            }
            KeyCode::Backspace => {
                self.auth_form.active_buffer().pop();
            }
            KeyCode::Char(c) => {
                self.auth_form.active_buffer().push(c);
            }
            _ => {}
        }
    }

    fn submit_auth(&mut self) {
        let now = Instant::now();
        let intent = if self.auth_form.intent_register {
            AuthIntent::Register
        } else {
            AuthIntent::Login
        };
        let result = match intent {
            AuthIntent::Login => {
                self.session
                    .login(&self.auth_form.email, &self.auth_form.secret, now)
            }
            AuthIntent::Register => self.session.register(
                &self.auth_form.name,
                &self.auth_form.email,
                &self.auth_form.secret,
                now,
            ),
        };
        match result {
            Ok(()) => {
                self.auth_form.secret.clear();
                self.after_identity_change();
            }
            Err(err) => self.set_toast(err.message()),
        }
    }

    /// Re-primes projections after login, registration or logout.
    fn after_identity_change(&mut self) {
        self.cache.prime(&self.store);
        self.nav.reset();
        self.setup_form = SetupForm::default();
        if let Some(user) = self.session.current_user() {
            self.setup_form.name = user.name().to_owned();
        }
        self.input_mode = InputMode::Normal;
    }

    fn handle_setup_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.session.logout(Instant::now());
                self.after_identity_change();
                self.input_mode = InputMode::Form;
            }
            KeyCode::Up => self.setup_form.cursor = self.setup_form.cursor.saturating_sub(1),
            // Row 0 is the name field; rows 1..=3 are the role toggles.
            KeyCode::Down => self.setup_form.cursor = (self.setup_form.cursor + 1).min(3),
            KeyCode::Char(' ') if self.setup_form.cursor > 0 => {
                let idx = self.setup_form.cursor - 1;
                self.setup_form.roles[idx] = !self.setup_form.roles[idx];
            }
            KeyCode::Enter => self.submit_setup(),
            KeyCode::Backspace if self.setup_form.cursor == 0 => {
                self.setup_form.name.pop();
            }
            KeyCode::Char(c) if self.setup_form.cursor == 0 => {
                self.setup_form.name.push(c);
            }
            _ => {}
        }
    }

    fn submit_setup(&mut self) {
        let name = self.setup_form.name.clone();
        let roles = self.setup_form.selected_roles();
        match self
            .session
            .complete_initial_setup(&name, roles, Instant::now())
        {
            Ok(outcome) => {
                self.input_mode = InputMode::Normal;
                if outcome.start_tour && !self.session.tour_seen() {
                    self.nav.set_tour_active(true);
                }
                self.set_toast("Profil configuré. Bienvenue !");
            }
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn handle_main_key(&mut self, code: KeyCode) {
        match self.input_mode {
            InputMode::Search => return self.handle_search_key(code),
            InputMode::Chat => return self.handle_chat_key(code),
            InputMode::Normal | InputMode::Form => {}
        }
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.nav.any_overlay_open() {
            return self.handle_overlay_key(code);
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.nav.handle_back(),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('1') => self.select_tab(ActiveTab::Discover),
            KeyCode::Char('2') => self.select_tab(ActiveTab::Favorites),
            KeyCode::Char('3') => self.select_tab(ActiveTab::Messages),
            KeyCode::Char('4') => self.select_tab(ActiveTab::Bookings),
            KeyCode::Char('5') => self.select_tab(ActiveTab::Profile),
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter => self.activate_selection(),
            _ => self.handle_tab_key(code),
        }
    }

    fn select_tab(&mut self, tab: ActiveTab) {
        self.nav.select_tab(tab);
        self.list_state.select(Some(0));
    }

    fn handle_tab_key(&mut self, code: KeyCode) {
        match (self.nav.drill_down().clone(), code) {
            (DrillDown::Profile(user_id), KeyCode::Char('c')) => {
                match self
                    .dispatcher
                    .start_chat(&self.session, &mut self.nav, &user_id)
                {
                    Ok(_) => self.input_mode = InputMode::Chat,
                    Err(err) => self.set_toast(err.to_string()),
                }
            }
            (DrillDown::Profile(user_id), KeyCode::Char('b')) => {
                self.nav.set_booking_user(Some(user_id));
                self.booking_duration = 2;
            }
            (DrillDown::Profile(user_id), KeyCode::Char('g')) => {
                self.nav.toggle_favorite(user_id.clone());
                let label = if self.nav.is_favorite(&user_id) {
                    "Ajouté aux favoris"
                } else {
                    "Retiré des favoris"
                };
                self.set_toast(label);
            }
            (DrillDown::Profile(user_id), KeyCode::Char('p')) => {
                match self.first_portfolio_item(&user_id) {
                    Some(media) => self.nav.set_projecting_media(Some(media)),
                    None => self.set_toast("Aucun média à projeter"),
                }
            }
            (DrillDown::Profile(user_id), KeyCode::Char('u')) => {
                match self.first_portfolio_item(&user_id) {
                    Some(media) => self.nav.set_full_screen_media(Some(media)),
                    None => self.set_toast("Aucun média à afficher"),
                }
            }
            (DrillDown::Profile(user_id), KeyCode::Char('y')) => {
                let urls: Vec<String> = self
                    .cache
                    .user(&user_id)
                    .map(|u| u.portfolio().iter().map(|m| m.url.clone()).collect())
                    .unwrap_or_default();
                let verdict = self.suggestions.analyze_style(&urls);
                self.set_toast(format!("Analyse de style : {verdict}"));
            }
            (DrillDown::Thread(_), KeyCode::Char('i')) => {
                self.input_mode = InputMode::Chat;
            }
            (DrillDown::None, code) => self.handle_root_key(code),
            _ => {}
        }
    }

    fn handle_root_key(&mut self, code: KeyCode) {
        match (self.nav.active_tab(), code) {
            (ActiveTab::Discover, KeyCode::Char('v')) => {
                self.nav.toggle_discover_view();
            }
            (ActiveTab::Discover, KeyCode::Char('m')) => {
                let next = match self.nav.discover_mode() {
                    DiscoverMode::Talents => DiscoverMode::Spots,
                    DiscoverMode::Spots => DiscoverMode::Talents,
                };
                self.nav.set_discover_mode(next);
                self.list_state.select(Some(0));
            }
            (ActiveTab::Discover, KeyCode::Char('r')) => {
                self.nav.set_role_filter(next_role_filter(self.nav.role_filter()));
                self.list_state.select(Some(0));
            }
            (ActiveTab::Discover, KeyCode::Char('f')) => {
                self.nav.set_available_only(!self.nav.available_only());
                self.list_state.select(Some(0));
            }
            (ActiveTab::Discover, KeyCode::Char('k')) => {
                self.cycle_spot_category();
            }
            (ActiveTab::Discover, KeyCode::Char('s')) => {
                let spots = self.suggestions.fetch_spots();
                if spots.is_empty() {
                    self.set_toast("Aucun nouveau spot trouvé");
                } else {
                    self.set_toast(format!("{} spots découverts", spots.len()));
                    self.dispatcher.refresh_spots(spots);
                }
            }
            (_, KeyCode::Char('l')) => {
                // The terminal has no geolocator; land on the default pin.
                match self
                    .dispatcher
                    .refresh_location(&mut self.session, None, Instant::now())
                {
                    Ok(()) => self.set_toast("Position mise à jour"),
                    Err(err) => self.set_toast(err.to_string()),
                }
            }
            (ActiveTab::Bookings, KeyCode::Char('a')) => {
                self.transition_selected_booking(BookingStatus::Confirmed)
            }
            (ActiveTab::Bookings, KeyCode::Char('d')) => {
                self.transition_selected_booking(BookingStatus::Declined)
            }
            (ActiveTab::Bookings, KeyCode::Char('x')) => {
                self.transition_selected_booking(BookingStatus::Completed)
            }
            (ActiveTab::Bookings, KeyCode::Char('n')) => {
                if let Some(booking_id) = self.selected_booking_id() {
                    self.nav.set_signing_booking(Some(booking_id));
                }
            }
            (ActiveTab::Bookings, KeyCode::Char('w')) => {
                if let Some(booking_id) = self.selected_booking_id() {
                    self.nav.set_reviewing_booking(Some(booking_id));
                    self.review_rating = 5;
                    self.review_comment.clear();
                }
            }
            (ActiveTab::Profile, KeyCode::Char('e')) => {
                self.nav.set_editing_profile(true);
            }
            (ActiveTab::Profile, KeyCode::Char('m')) => {
                self.nav.open_sub_view(SubView::Moodboard);
            }
            (ActiveTab::Profile, KeyCode::Char('g')) => {
                self.nav.open_sub_view(SubView::Gallery);
            }
            (ActiveTab::Profile, KeyCode::Char('p')) => {
                self.nav.open_sub_view(SubView::Payment);
            }
            (ActiveTab::Profile, KeyCode::Char('t')) => {
                self.nav.set_tour_active(true);
            }
            (ActiveTab::Profile, KeyCode::Char('o')) => {
                self.session.logout(Instant::now());
                self.after_identity_change();
                self.input_mode = InputMode::Form;
            }
            (_, KeyCode::Char('Q')) | (_, KeyCode::Char('z')) => {
                self.open_quiz();
            }
            _ => {}
        }
    }

    fn open_quiz(&mut self) {
        let mut questions = self.suggestions.quiz_questions();
        if questions.is_empty() {
            questions = StaticSuggestions::new().quiz_questions();
        }
        self.quiz = QuizRun {
            questions,
            ..QuizRun::default()
        };
        self.nav.set_quiz_open(true);
    }

    fn handle_overlay_key(&mut self, code: KeyCode) {
        let Some(top) = self.nav.overlay_order().last().copied() else {
            return;
        };
        match top {
            OverlayKind::Quiz => self.handle_quiz_key(code),
            OverlayKind::Booking => self.handle_booking_key(code),
            OverlayKind::Reviewing => self.handle_review_key(code),
            OverlayKind::Tour => {
                if matches!(code, KeyCode::Esc | KeyCode::Enter) {
                    self.dispatcher
                        .close_tour(&mut self.session, &mut self.nav);
                }
            }
            OverlayKind::EditingProfile => self.handle_profile_edit_key(code),
            _ => {
                if code == KeyCode::Esc {
                    self.close_overlay(top);
                }
            }
        }
    }

    fn close_overlay(&mut self, kind: OverlayKind) {
        match kind {
            OverlayKind::Quiz => self.nav.set_quiz_open(false),
            OverlayKind::Booking => self.nav.set_booking_user(None),
            OverlayKind::Signing => self.nav.set_signing_booking(None),
            OverlayKind::Onboarding => self.nav.set_onboarding_open(false),
            OverlayKind::Reviewing => self.nav.set_reviewing_booking(None),
            OverlayKind::EditingProfile => self.nav.set_editing_profile(false),
            OverlayKind::Tour => self.nav.close_tour(),
            OverlayKind::Projecting => self.nav.set_projecting_media(None),
            OverlayKind::FullScreenMedia => self.nav.set_full_screen_media(None),
        }
    }

    fn handle_quiz_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.nav.set_quiz_open(false),
            _ if self.quiz.finished => {
                if code == KeyCode::Enter {
                    self.nav.set_quiz_open(false);
                }
            }
            KeyCode::Left => self.quiz.choice = self.quiz.choice.saturating_sub(1),
            KeyCode::Right => {
                let options = self
                    .quiz
                    .questions
                    .get(self.quiz.current)
                    .map_or(0, |q| q.options.len());
                self.quiz.choice = (self.quiz.choice + 1).min(options.saturating_sub(1));
            }
            KeyCode::Enter => {
                let Some(question) = self.quiz.questions.get(self.quiz.current) else {
                    self.quiz.finished = true;
                    return;
                };
                if self.quiz.choice == question.correct_answer_index {
                    self.quiz.score += 1;
                }
                self.quiz.current += 1;
                self.quiz.choice = 0;
                if self.quiz.current >= self.quiz.questions.len() {
                    self.quiz.finished = true;
                }
            }
            _ => {}
        }
    }

    fn handle_booking_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.nav.set_booking_user(None),
            KeyCode::Up | KeyCode::Char('+') => {
                self.booking_duration = (self.booking_duration + 1).min(12)
            }
            KeyCode::Down | KeyCode::Char('-') => {
                self.booking_duration = self.booking_duration.saturating_sub(1).max(1)
            }
            KeyCode::Enter => {
                let Some(professional) = self.nav.booking_user().cloned() else {
                    return;
                };
                let result = self.dispatcher.confirm_booking(
                    &self.session,
                    &mut self.nav,
                    &professional,
                    "2026-09-12",
                    "14:00",
                    self.booking_duration,
                    "",
                );
                match result {
                    Ok(_) => self.set_toast("Demande de réservation envoyée"),
                    Err(err) => self.set_toast(err.to_string()),
                }
            }
            _ => {}
        }
    }

    fn handle_review_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.nav.set_reviewing_booking(None),
            KeyCode::Up => self.review_rating = (self.review_rating + 1).min(5),
            KeyCode::Down => self.review_rating = self.review_rating.saturating_sub(1).max(1),
            KeyCode::Backspace => {
                self.review_comment.pop();
            }
            KeyCode::Enter => {
                let Some(booking_id) = self.nav.reviewing_booking().cloned() else {
                    return;
                };
                let comment = self.review_comment.clone();
                let result = self.dispatcher.post_review(
                    &self.session,
                    &mut self.nav,
                    &booking_id,
                    self.review_rating,
                    &comment,
                );
                match result {
                    Ok(()) => self.set_toast("Avis publié"),
                    Err(err) => self.set_toast(err.to_string()),
                }
            }
            KeyCode::Char(c) => self.review_comment.push(c),
            _ => {}
        }
    }

    fn handle_profile_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.nav.set_editing_profile(false),
            KeyCode::Char('v') => {
                if let Some(mut user) = self.session.current_user() {
                    user.set_available_now(!user.is_available_now());
                    let label = if user.is_available_now() {
                        "Disponible maintenant"
                    } else {
                        "Indisponible"
                    };
                    self.dispatcher
                        .save_profile(&mut self.session, &mut self.nav, user);
                    self.set_toast(label);
                }
            }
            KeyCode::Char('s') => {
                if let Some(mut user) = self.session.current_user() {
                    let role = user.roles().first().map_or("Créateur", |r| r.label());
                    let suggested = self.suggestions.profile_suggestions(role);
                    if let Some(headline) = suggested.headlines.first() {
                        user.set_headline(headline.clone());
                    }
                    user.set_bio(suggested.bio);
                    self.dispatcher
                        .save_profile(&mut self.session, &mut self.nav, user);
                    self.set_toast("Suggestions appliquées au profil");
                }
            }
            KeyCode::Enter => self.nav.set_editing_profile(false),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.nav.set_search("");
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                let mut query = self.nav.search().to_owned();
                query.pop();
                self.nav.set_search(query);
            }
            KeyCode::Char(c) => {
                let mut query = self.nav.search().to_owned();
                query.push(c);
                self.nav.set_search(query);
            }
            _ => {}
        }
        self.list_state.select(Some(0));
    }

    fn handle_chat_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                let DrillDown::Thread(thread_id) = self.nav.drill_down().clone() else {
                    self.input_mode = InputMode::Normal;
                    return;
                };
                let text = std::mem::take(&mut self.chat_input);
                if let Err(err) = self.dispatcher.add_message(&self.session, &thread_id, &text) {
                    self.set_toast(err.to_string());
                }
            }
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Char(c) => self.chat_input.push(c),
            _ => {}
        }
    }

    fn cycle_spot_category(&mut self) {
        let categories = self.cache.spot_categories();
        if categories.is_empty() {
            return;
        }
        let current = self.nav.spot_category().to_owned();
        let position = categories.iter().position(|c| *c == current).unwrap_or(0);
        let next = &categories[(position + 1) % categories.len()];
        self.nav.set_spot_category(next.clone());
        self.list_state.select(Some(0));
    }

    fn move_selection(&mut self, delta: i64) {
        let len = self.current_list_len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, len as i64 - 1) as usize;
        self.list_state.select(Some(next));
    }

    fn current_list_len(&self) -> usize {
        match self.nav.drill_down() {
            DrillDown::None => {}
            _ => return 0,
        }
        match self.nav.active_tab() {
            ActiveTab::Discover => match self.nav.discover_mode() {
                DiscoverMode::Talents => self.visible_users().len(),
                DiscoverMode::Spots => self.visible_spots().len(),
            },
            ActiveTab::Favorites => self.favorite_users().len(),
            ActiveTab::Messages => self.visible_threads_len(),
            ActiveTab::Bookings => self.visible_bookings_len(),
            ActiveTab::Profile => 0,
        }
    }

    fn visible_users(&self) -> Vec<&User> {
        let mut users = self.cache.filter_users(
            self.nav.role_filter(),
            self.nav.available_only(),
            self.nav.search(),
        );
        if let Some(me) = self.session.current_user_id() {
            users.retain(|user| user.id() != me);
        }
        users
    }

    fn visible_spots(&self) -> Vec<&Spot> {
        self.cache
            .filter_spots(self.nav.spot_category(), self.nav.search())
    }

    fn favorite_users(&self) -> Vec<&User> {
        self.nav
            .favorites()
            .iter()
            .filter_map(|id| self.cache.user(id))
            .collect()
    }

    fn visible_threads_len(&self) -> usize {
        self.session
            .current_user_id()
            .map_or(0, |me| self.cache.threads_for(me).len())
    }

    fn visible_bookings_len(&self) -> usize {
        self.session
            .current_user_id()
            .map_or(0, |me| self.cache.bookings_for(me).len())
    }

    fn activate_selection(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        match self.nav.active_tab() {
            ActiveTab::Discover => match self.nav.discover_mode() {
                DiscoverMode::Talents => {
                    if let Some(user) = self.visible_users().get(index) {
                        let id = user.id().clone();
                        self.nav.view_profile(id);
                    }
                }
                DiscoverMode::Spots => {}
            },
            ActiveTab::Favorites => {
                if let Some(user) = self.favorite_users().get(index) {
                    let id = user.id().clone();
                    self.nav.view_profile(id);
                }
            }
            ActiveTab::Messages => {
                let thread_id = self.session.current_user_id().and_then(|me| {
                    self.cache
                        .threads_for(me)
                        .get(index)
                        .map(|thread| thread.id().clone())
                });
                if let Some(thread_id) = thread_id {
                    let _ = self.dispatcher.mark_thread_read(&thread_id);
                    self.nav.select_thread(thread_id);
                    self.input_mode = InputMode::Chat;
                }
            }
            ActiveTab::Bookings | ActiveTab::Profile => {}
        }
    }

    fn first_portfolio_item(&self, user_id: &UserId) -> Option<crate::model::PortfolioItem> {
        self.cache
            .user(user_id)
            .and_then(|user| user.portfolio().first().cloned())
    }

    fn selected_booking_id(&self) -> Option<crate::model::BookingId> {
        let me = self.session.current_user_id()?;
        let index = self.list_state.selected()?;
        self.cache
            .bookings_for(me)
            .get(index)
            .map(|booking| booking.id().clone())
    }

    fn transition_selected_booking(&mut self, next: BookingStatus) {
        let Some(booking_id) = self.selected_booking_id() else {
            self.set_toast("Aucune réservation sélectionnée");
            return;
        };
        match self
            .dispatcher
            .update_booking_status(&self.session, &booking_id, next)
        {
            Ok(()) => self.set_toast(format!("Réservation {}", next.label())),
            Err(err) => self.set_toast(err.to_string()),
        }
    }
}

fn next_role_filter(current: RoleFilter) -> RoleFilter {
    match current {
        RoleFilter::All => RoleFilter::Only(Role::Model),
        RoleFilter::Only(Role::Model) => RoleFilter::Only(Role::Photographer),
        RoleFilter::Only(Role::Photographer) => RoleFilter::Only(Role::Videographer),
        RoleFilter::Only(Role::Videographer) => RoleFilter::All,
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    match app.screen() {
        Screen::Auth => draw_auth(frame, app),
        Screen::Setup => draw_setup(frame, app),
        Screen::Main => draw_main(frame, app),
    }
    draw_toast(frame, app);
}

fn draw_auth(frame: &mut Frame<'_>, app: &App) {
    let area = centered_rect(frame.size(), 48, 14);
    let title = if app.auth_form.intent_register {
        " Inscription "
    } else {
        " Connexion "
    };
    let mut lines: Vec<Line<'_>> = Vec::new();
    if app.auth_form.intent_register {
        lines.push(form_line("Nom", &app.auth_form.name, app.auth_form.field == 0));
    }
    let email_row = usize::from(app.auth_form.intent_register);
    lines.push(form_line(
        "Email",
        &app.auth_form.email,
        app.auth_form.field == email_row,
    ));
    lines.push(form_line(
        "Mot de passe",
        &"•".repeat(app.auth_form.secret.chars().count()),
        app.auth_form.field == email_row + 1,
    ));
    lines.push(Line::default());
    lines.push(Line::styled(
        "Entrée valider · Tab connexion/inscription · Ctrl-R mot de passe oublié · Échap quitter",
        Style::default().fg(DIM_COLOR),
    ));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT_COLOR))
                .title(title),
        ),
        area,
    );
}

fn draw_setup(frame: &mut Frame<'_>, app: &App) {
    let area = centered_rect(frame.size(), 52, 14);
    let mut lines = vec![form_line("Nom", &app.setup_form.name, app.setup_form.cursor == 0)];
    for (idx, role) in Role::ALL.iter().enumerate() {
        let mark = if app.setup_form.roles[idx] { "[x]" } else { "[ ]" };
        let style = if app.setup_form.cursor == idx + 1 {
            Style::default().fg(ACCENT_COLOR)
        } else {
            Style::default()
        };
        lines.push(Line::styled(format!("{mark} {}", role.label()), style));
    }
    lines.push(Line::default());
    lines.push(Line::styled(
        "Espace cocher · Entrée terminer · Échap déconnexion",
        Style::default().fg(DIM_COLOR),
    ));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT_COLOR))
                .title(" Votre profil Elite "),
        ),
        area,
    );
}

fn draw_main(frame: &mut Frame<'_>, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.size());

    frame.render_widget(tab_bar(app), layout[0]);

    match app.nav.drill_down().clone() {
        DrillDown::None => draw_tab_root(frame, app, layout[1]),
        DrillDown::Profile(user_id) => draw_profile_detail(frame, app, layout[1], &user_id),
        DrillDown::Thread(thread_id) => draw_thread(frame, app, layout[1], &thread_id),
        DrillDown::SubView(sub_view) => draw_sub_view(frame, app, layout[1], sub_view),
    }

    frame.render_widget(footer(app), layout[2]);

    for kind in app.nav.overlay_order().to_vec() {
        draw_overlay(frame, app, kind);
    }
    if app.show_help {
        draw_help(frame);
    }
}

fn tab_bar(app: &App) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(
        FOOTER_BRAND,
        Style::default().fg(ACCENT_COLOR).bold(),
    )];
    for (idx, tab) in ActiveTab::ALL.iter().enumerate() {
        let style = if *tab == app.nav.active_tab() {
            Style::default().fg(ACCENT_COLOR).bold()
        } else {
            Style::default().fg(DIM_COLOR)
        };
        spans.push(Span::styled(format!(" {} {} ", idx + 1, tab.label()), style));
    }
    Paragraph::new(Line::from(spans))
}

fn footer(app: &App) -> Paragraph<'static> {
    let hint = match app.input_mode {
        InputMode::Search => format!("/{}", app.nav.search()),
        InputMode::Chat => format!("> {}", app.chat_input),
        _ => match app.nav.active_tab() {
            ActiveTab::Discover => {
                "v vue · m talents/spots · r rôle · f dispo · k catégorie · / recherche · ? aide"
                    .to_owned()
            }
            ActiveTab::Bookings => "a accepter · d refuser · x terminer · w avis".to_owned(),
            ActiveTab::Profile => "e éditer · m moodboard · g galerie · p paiements · o déconnexion".to_owned(),
            _ => "Entrée ouvrir · Échap retour · q quitter".to_owned(),
        },
    };
    Paragraph::new(Line::styled(hint, Style::default().fg(DIM_COLOR)))
}

fn draw_tab_root(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    match app.nav.active_tab() {
        ActiveTab::Discover => match app.nav.discover_mode() {
            DiscoverMode::Talents => draw_talents(frame, app, area),
            DiscoverMode::Spots => draw_spots(frame, app, area),
        },
        ActiveTab::Favorites => {
            let items: Vec<ListItem<'_>> = app
                .favorite_users()
                .iter()
                .map(|user| ListItem::new(user_row(user)))
                .collect();
            render_list(frame, app, area, items, " Favoris ");
        }
        ActiveTab::Messages => draw_threads(frame, app, area),
        ActiveTab::Bookings => draw_bookings(frame, app, area),
        ActiveTab::Profile => draw_own_profile(frame, app, area),
    }
}

fn draw_talents(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let view = app.nav.discover_view();
    let users = app.visible_users();
    let title = format!(
        " Talents · {} · {} ",
        role_filter_label(app.nav.role_filter()),
        match view {
            DiscoverView::Grid => "grille",
            DiscoverView::Map => "carte",
        }
    );
    let items: Vec<ListItem<'_>> = users
        .iter()
        .map(|user| {
            ListItem::new(match view {
                DiscoverView::Grid => user_row(user),
                DiscoverView::Map => map_row(user),
            })
        })
        .collect();
    render_list(frame, app, area, items, title);
}

fn draw_spots(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let title = format!(" Spots · {} ", app.nav.spot_category());
    let items: Vec<ListItem<'_>> = app
        .visible_spots()
        .iter()
        .map(|spot| {
            ListItem::new(format!(
                "{}  [{} · {}]  {}",
                spot.name(),
                spot.kind().label(),
                spot.category(),
                spot.description(),
            ))
        })
        .collect();
    render_list(frame, app, area, items, title);
}

fn draw_threads(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let me = app.session.current_user_id().cloned();
    let items: Vec<ListItem<'_>> = me
        .as_ref()
        .map(|me| app.cache.threads_for(me))
        .unwrap_or_default()
        .iter()
        .map(|thread| {
            let name = thread
                .counterpart_of(me.as_ref().expect("viewer id present"))
                .and_then(|other| app.cache.user(&other).map(|u| u.name().to_owned()))
                .unwrap_or_else(|| "Inconnu".to_owned());
            let marker = if thread.unread() { "● " } else { "  " };
            ListItem::new(format!(
                "{marker}{name}: {} ({})",
                thread.last_message(),
                thread.timestamp()
            ))
        })
        .collect();
    render_list(frame, app, area, items, " Messages ");
}

fn draw_bookings(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let me = app.session.current_user_id().cloned();
    let items: Vec<ListItem<'_>> = me
        .as_ref()
        .map(|me| app.cache.bookings_for(me))
        .unwrap_or_default()
        .iter()
        .map(|booking| {
            let other = if me.as_ref() == Some(booking.client_id()) {
                booking.professional_id()
            } else {
                booking.client_id()
            };
            let name = app
                .cache
                .user(other)
                .map(|u| u.name().to_owned())
                .unwrap_or_else(|| other.to_string());
            ListItem::new(format!(
                "{} · {} {} · {}h · {}",
                name,
                booking.date(),
                booking.time(),
                booking.duration(),
                booking.status().label(),
            ))
        })
        .collect();
    render_list(frame, app, area, items, " Réservations ");
}

fn draw_own_profile(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(user) = app.session.current_user() else {
        return;
    };
    let availability = if user.is_available_now() {
        Span::styled("Disponible maintenant", Style::default().fg(OK_COLOR))
    } else {
        Span::styled("Indisponible", Style::default().fg(DIM_COLOR))
    };
    let lines = vec![
        Line::styled(user.name().to_owned(), Style::default().bold()),
        Line::raw(roles_label(user.roles())),
        Line::raw(user.headline().to_owned()),
        Line::from(availability),
        Line::raw(format!(
            "Note {:.1} · {} avis · {} shootings",
            user.rating(),
            user.reviews().len(),
            user.completed_shoots_count(),
        )),
        Line::raw(format!(
            "Position {:.4}, {:.4}",
            user.location().lat,
            user.location().lng
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Profil ")),
        area,
    );
}

fn draw_profile_detail(frame: &mut Frame<'_>, app: &App, area: Rect, user_id: &UserId) {
    let Some(user) = app.cache.user(user_id) else {
        frame.render_widget(Paragraph::new("Profil introuvable"), area);
        return;
    };
    let fav = if app.nav.is_favorite(user_id) { "★" } else { "☆" };
    let pitch = app.session.current_user().and_then(|me| {
        app.suggestions
            .collaboration_suggestions(&me, user)
            .into_iter()
            .find(|s| &s.user_id == user_id)
            .map(|s| s.justification)
    });
    let mut lines = vec![
        Line::styled(
            format!("{fav} {}", user.name()),
            Style::default().fg(ACCENT_COLOR).bold(),
        ),
        Line::raw(roles_label(user.roles())),
        Line::raw(user.headline().to_owned()),
        Line::raw(user.bio().to_owned()),
        Line::raw(format!(
            "Note {:.1} · {} €/h · {} médias",
            user.rating(),
            user.rate(),
            user.portfolio().len(),
        )),
        Line::default(),
        Line::styled(
            "c discuter · b réserver · g favori · p projeter · y analyser · Échap retour",
            Style::default().fg(DIM_COLOR),
        ),
    ];
    if let Some(pitch) = pitch {
        lines.push(Line::default());
        lines.push(Line::styled(
            format!("Pourquoi collaborer : {pitch}"),
            Style::default().fg(DIM_COLOR),
        ));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Profil ")),
        area,
    );
}

fn draw_thread(frame: &mut Frame<'_>, app: &App, area: Rect, thread_id: &crate::model::ThreadId) {
    let me = app.session.current_user_id();
    let mut lines: Vec<Line<'_>> = Vec::new();
    if let Some(thread) = app.cache.thread(thread_id) {
        for message in thread.messages() {
            let mine = me == Some(&message.sender_id);
            let style = if mine {
                Style::default().fg(ACCENT_COLOR)
            } else {
                Style::default()
            };
            let who = if mine {
                "moi".to_owned()
            } else {
                app.cache
                    .user(&message.sender_id)
                    .map(|u| u.name().to_owned())
                    .unwrap_or_else(|| message.sender_id.to_string())
            };
            lines.push(Line::styled(format!("{who}: {}", message.text), style));
        }
    }
    if lines.is_empty() {
        lines.push(Line::styled(
            "Pas encore de message. i pour écrire.",
            Style::default().fg(DIM_COLOR),
        ));
        for opener in chat_openers(app, thread_id).unwrap_or_default() {
            lines.push(Line::styled(
                format!("Idée : {opener}"),
                Style::default().fg(DIM_COLOR),
            ));
        }
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Conversation ")),
        area,
    );
}

/// Icebreaker suggestions for an empty conversation, keyed on both roles.
fn chat_openers(app: &App, thread_id: &crate::model::ThreadId) -> Option<Vec<String>> {
    let me = app.session.current_user()?;
    let other = app
        .cache
        .thread(thread_id)
        .and_then(|thread| thread.counterpart_of(me.id()))
        .and_then(|id| app.cache.user(&id).cloned())?;
    let role_of =
        |user: &User| user.roles().first().copied().map_or("Créateur", Role::label);
    Some(app.suggestions.chat_icebreakers(role_of(&me), role_of(&other)))
}

fn draw_sub_view(frame: &mut Frame<'_>, app: &App, area: Rect, sub_view: SubView) {
    let mut lines: Vec<Line<'static>> = match sub_view {
        SubView::Moodboard => app
            .favorite_users()
            .iter()
            .flat_map(|user| {
                let name = user.name().to_owned();
                user.portfolio()
                    .iter()
                    .map(move |media| Line::raw(format!("{name} · {}", media.url)))
                    .collect::<Vec<_>>()
            })
            .collect(),
        SubView::Gallery => app
            .session
            .current_user()
            .map(|me| {
                me.portfolio()
                    .iter()
                    .map(|media| Line::raw(media.url.clone()))
                    .collect()
            })
            .unwrap_or_default(),
        SubView::Payment => app
            .session
            .current_user_id()
            .map(|me| {
                app.cache
                    .bookings_for(me)
                    .iter()
                    .map(|booking| {
                        Line::raw(format!(
                            "{} {} · {} · {}",
                            booking.date(),
                            booking.time(),
                            booking.status().label(),
                            booking.escrow_status().label(),
                        ))
                    })
                    .collect()
            })
            .unwrap_or_default(),
    };
    if lines.is_empty() {
        lines.push(Line::styled("Rien à afficher pour le moment.", Style::default().fg(DIM_COLOR)));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(format!(" {} ", sub_view.title()))),
        area,
    );
}

fn draw_overlay(frame: &mut Frame<'_>, app: &App, kind: OverlayKind) {
    let area = centered_rect(frame.size(), 56, 12);
    frame.render_widget(Clear, area);
    let (title, lines) = overlay_content(app, kind);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT_COLOR))
                .title(title),
        ),
        area,
    );
}

fn overlay_content(app: &App, kind: OverlayKind) -> (String, Vec<Line<'static>>) {
    match kind {
        OverlayKind::Quiz => quiz_content(app),
        OverlayKind::Booking => {
            let name = app
                .nav
                .booking_user()
                .and_then(|id| app.cache.user(id))
                .map(|u| u.name().to_owned())
                .unwrap_or_default();
            (
                " Réserver ".to_owned(),
                vec![
                    Line::raw(format!("Professionnel : {name}")),
                    Line::raw("Date : 2026-09-12 14:00".to_owned()),
                    Line::raw(format!("Durée : {} h  (↑/↓ ajuster)", app.booking_duration)),
                    Line::default(),
                    Line::styled(
                        "Entrée envoyer la demande · Échap annuler",
                        Style::default().fg(DIM_COLOR),
                    ),
                ],
            )
        }
        OverlayKind::Reviewing => (
            " Laisser un avis ".to_owned(),
            vec![
                Line::raw(format!(
                    "Note : {} (↑/↓)",
                    "★".repeat(usize::from(app.review_rating))
                )),
                Line::raw(format!("Commentaire : {}", app.review_comment)),
                Line::default(),
                Line::styled("Entrée publier · Échap annuler", Style::default().fg(DIM_COLOR)),
            ],
        ),
        OverlayKind::Tour => (
            " Visite guidée ".to_owned(),
            vec![
                Line::raw("1. Découvrez les talents et spots sur la carte."),
                Line::raw("2. Discutez et réservez en séquestre sécurisé."),
                Line::raw("3. Terminez le shooting et laissez un avis."),
                Line::default(),
                Line::styled("Entrée terminer", Style::default().fg(DIM_COLOR)),
            ],
        ),
        OverlayKind::EditingProfile => (
            " Éditer le profil ".to_owned(),
            vec![
                Line::raw("v basculer la disponibilité"),
                Line::raw("s appliquer les suggestions de profil"),
                Line::default(),
                Line::styled("Entrée fermer", Style::default().fg(DIM_COLOR)),
            ],
        ),
        OverlayKind::Signing => {
            let booking = app
                .nav
                .signing_booking()
                .and_then(|id| app.cache.booking(id));
            let role_of = |id: &UserId| {
                app.cache
                    .user(id)
                    .and_then(|u| u.roles().first().copied())
                    .map_or("Créateur", Role::label)
            };
            let mut lines = Vec::new();
            if let Some(booking) = booking {
                let clauses = app
                    .suggestions
                    .contract_clauses(role_of(booking.professional_id()), role_of(booking.client_id()));
                lines.push(Line::raw(format!(
                    "Shooting du {} à {}, {} h",
                    booking.date(),
                    booking.time(),
                    booking.duration()
                )));
                lines.push(Line::default());
                for clause in clauses {
                    lines.push(Line::raw(format!("· {clause}")));
                }
            }
            lines.push(Line::default());
            lines.push(Line::styled("Échap fermer", Style::default().fg(DIM_COLOR)));
            (" Contrat ".to_owned(), lines)
        }
        OverlayKind::Onboarding => (
            " Bienvenue ".to_owned(),
            vec![Line::raw("Votre espace Elite est prêt.")],
        ),
        OverlayKind::Projecting => (
            " Projection AR ".to_owned(),
            vec![Line::raw(
                app.nav
                    .projecting_media()
                    .map(|m| m.url.clone())
                    .unwrap_or_default(),
            )],
        ),
        OverlayKind::FullScreenMedia => (
            " Média ".to_owned(),
            vec![Line::raw(
                app.nav
                    .full_screen_media()
                    .map(|m| m.url.clone())
                    .unwrap_or_default(),
            )],
        ),
    }
}

fn quiz_content(app: &App) -> (String, Vec<Line<'static>>) {
    let quiz = &app.quiz;
    if quiz.finished {
        return (
            " Quiz Elite ".to_owned(),
            vec![
                Line::raw(format!("Score : {}/{}", quiz.score, quiz.questions.len())),
                Line::default(),
                Line::styled("Entrée fermer", Style::default().fg(DIM_COLOR)),
            ],
        );
    }
    let Some(question) = quiz.questions.get(quiz.current) else {
        return (" Quiz Elite ".to_owned(), vec![Line::raw("Aucune question.")]);
    };
    let mut lines = vec![Line::styled(question.question.clone(), Style::default().bold())];
    for (idx, option) in question.options.iter().enumerate() {
        let style = if idx == quiz.choice {
            Style::default().fg(ACCENT_COLOR)
        } else {
            Style::default()
        };
        lines.push(Line::styled(format!("  {option}"), style));
    }
    lines.push(Line::default());
    lines.push(Line::styled(
        "←/→ choisir · Entrée valider",
        Style::default().fg(DIM_COLOR),
    ));
    (
        format!(" Quiz Elite {}/{} ", quiz.current + 1, quiz.questions.len()),
        lines,
    )
}

fn draw_help(frame: &mut Frame<'_>) {
    let area = centered_rect(frame.size(), 60, 16);
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::raw("1-5        onglets"),
        Line::raw("↑/↓ Entrée parcourir et ouvrir"),
        Line::raw("Échap      retour / fermer"),
        Line::raw("/          recherche"),
        Line::raw("v m r f k  vues et filtres Découvrir"),
        Line::raw("c b g p y  discuter, réserver, favori, projeter, analyser"),
        Line::raw("a d x n w  cycle de réservation, contrat, avis"),
        Line::raw("e m g p t  profil, moodboard, galerie, paiements, visite"),
        Line::raw("l s        position, nouveaux spots"),
        Line::raw("z          quiz Elite"),
        Line::raw("q          quitter"),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT_COLOR))
                .title(" Aide "),
        ),
        area,
    );
}

fn draw_toast(frame: &mut Frame<'_>, app: &App) {
    let Some(toast) = &app.toast else {
        return;
    };
    let area = frame.size();
    if area.height < 2 {
        return;
    }
    let toast_area = Rect::new(area.x, area.y + area.height - 2, area.width, 1);
    frame.render_widget(Clear, toast_area);
    frame.render_widget(
        Paragraph::new(Line::styled(
            toast.message.clone(),
            Style::default().fg(ALERT_COLOR),
        )),
        toast_area,
    );
}

fn render_list(
    frame: &mut Frame<'_>,
    app: &mut App,
    area: Rect,
    items: Vec<ListItem<'_>>,
    title: impl Into<String>,
) {
    let empty = items.is_empty();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title.into()))
        .highlight_style(Style::default().fg(ACCENT_COLOR).bold());
    frame.render_stateful_widget(list, area, &mut app.list_state);
    if empty {
        let inner = Rect::new(area.x + 2, area.y + 1, area.width.saturating_sub(4), 1);
        frame.render_widget(
            Paragraph::new(Line::styled("Rien à afficher", Style::default().fg(DIM_COLOR))),
            inner,
        );
    }
}

fn user_row(user: &User) -> String {
    let dot = if user.is_available_now() { "●" } else { "○" };
    format!(
        "{dot} {}  [{}]  {:.1}★  {}",
        user.name(),
        roles_label(user.roles()),
        user.rating(),
        user.headline(),
    )
}

fn map_row(user: &User) -> String {
    format!(
        "({:+08.4}, {:+09.4})  {}",
        user.location().lat,
        user.location().lng,
        user.name(),
    )
}

fn roles_label(roles: &[Role]) -> String {
    roles.iter().map(|r| r.label()).collect::<Vec<_>>().join("/")
}

fn role_filter_label(filter: RoleFilter) -> &'static str {
    match filter {
        RoleFilter::All => "tous",
        RoleFilter::Only(role) => role.label(),
    }
}

fn form_line(label: &str, value: &str, active: bool) -> Line<'static> {
    let style = if active {
        Style::default().fg(ACCENT_COLOR)
    } else {
        Style::default()
    };
    let cursor = if active { "_" } else { "" };
    Line::styled(format!("{label} : {value}{cursor}"), style)
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
