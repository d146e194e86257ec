//! The TUI app driven by key events and drawn to a test backend.

use std::time::Duration;

use bubbleshow::config::ArrayDefaults;
use bubbleshow::ui::Screen;
use bubbleshow::{App, ArrayConfig, Config, PlayerState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::Instant;

use super::common::terminal::{assert_screen_contains, render_app};

fn press(app: &mut App, code: KeyCode, now: Instant) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), now);
}

fn type_text(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        press(app, KeyCode::Char(c), now);
    }
}

fn app() -> App {
    let config = Config::default().with_interval(Duration::from_millis(50));
    let array = ArrayConfig::random(&ArrayDefaults::default());
    App::with_rng(config, array, StdRng::seed_from_u64(5))
}

#[test]
fn setup_screen_shows_generation_params() {
    let app = app();
    let screen = render_app(&app, Instant::now());
    assert_screen_contains(&screen, "bubbleshow");
    assert_screen_contains(&screen, "Random array");
    assert_screen_contains(&screen, "Length: random, 2..=20");
}

#[test]
fn manual_entry_through_to_sorted_board() {
    let mut app = app();
    let mut now = Instant::now();

    press(&mut app, KeyCode::Tab, now);
    type_text(&mut app, "30, 10 20", now);
    let screen = render_app(&app, now);
    assert_screen_contains(&screen, "30, 10 20");
    assert_screen_contains(&screen, "3 value(s), whole numbers only");

    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.screen(), Screen::Show);
    let screen = render_app(&app, now);
    assert_screen_contains(&screen, "30");
    assert_screen_contains(&screen, "step 0/");

    while let Some(deadline) = app.player().next_deadline() {
        now = deadline;
        app.tick(now);
    }
    app.process_pending_events();

    assert_eq!(app.player().state(), PlayerState::Finished);
    assert_eq!(app.board().values(), vec![10, 20, 30]);
    let screen = render_app(&app, now + Duration::from_secs(1));
    assert_screen_contains(&screen, "sorted");
}

#[test]
fn seeded_generation_is_reproducible() {
    let mut a = app();
    let mut b = app();
    let now = Instant::now();
    a.start_show(now);
    b.start_show(now);
    assert_eq!(a.input_values(), b.input_values());
    assert!(!a.input_values().is_empty());
}

#[test]
fn reset_from_show_returns_to_setup_screen() {
    let mut app = app();
    let now = Instant::now();
    app.start_show(now);
    app.tick(now + Duration::from_millis(50));

    press(&mut app, KeyCode::Esc, now);
    assert_eq!(app.screen(), Screen::Setup);
    assert_eq!(app.player().state(), PlayerState::Idle);
    let screen = render_app(&app, now);
    assert_screen_contains(&screen, "Random array");
    assert!(!app.should_quit());
}

#[test]
fn generation_fields_are_edited_from_the_keyboard() {
    let mut app = app();
    let now = Instant::now();
    let clear = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);

    app.handle_key_event(clear, now);
    type_text(&mut app, "3", now);
    press(&mut app, KeyCode::Down, now);
    app.handle_key_event(clear, now);
    type_text(&mut app, "7", now);
    press(&mut app, KeyCode::Down, now);
    app.handle_key_event(clear, now);
    type_text(&mut app, "7", now);

    let screen = render_app(&app, now);
    assert_screen_contains(&screen, "Length: 3");
    assert_screen_contains(&screen, "From: 7");
    assert_screen_contains(&screen, "▸ To: 7");

    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.input_values(), &[7, 7, 7]);
}
