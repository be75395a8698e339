use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use typtea::{
    app::{App, AppState, Control},
    clock::{ManualClock, SystemClock},
    keymap::KeyMap,
    language::FixedSource,
    runtime::{AppEvent, ChannelEvents, FixedTicker, Runner},
    Mode, Session,
};

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Headless integration using the runtime + App without a TTY
#[test]
fn headless_word_session_completes() {
    let session = Session::word_count(10, FixedSource::new(["hi", "yo"])).unwrap();
    let mut app = App::new(session, KeyMap::default(), "test");

    let (tx, es) = ChannelEvents::pair();
    let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(5)));

    // one line holds all ten words; the trailing space commits it
    for c in "hi yo hi yo hi yo hi yo hi yo ".chars() {
        tx.send(key(c)).unwrap();
    }

    for _ in 0..200u32 {
        app.on_event(&runner.step()).unwrap();
        if app.state == AppState::Results {
            break;
        }
    }

    assert_eq!(app.state, AppState::Results);
    let stats = app.final_stats.expect("final stats captured");
    assert!(stats.is_complete);
    assert_eq!(stats.characters_typed, 30);
    assert_eq!(stats.accuracy, 100.0);
    assert!(stats.wpm >= 0.0);
}

#[test]
fn headless_timed_session_finishes_by_time() {
    // real clock: a 1 second session only ends through ticks
    let session = Session::with_clock(
        Mode::Duration(1),
        FixedSource::new(["hello"]),
        SystemClock,
    )
    .unwrap();
    let mut app = App::new(session, KeyMap::default(), "test");

    let (tx, es) = ChannelEvents::pair();
    let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(10)));
    tx.send(key('h')).unwrap();

    for _ in 0..300u32 {
        app.on_event(&runner.step()).unwrap();
        if app.state == AppState::Results {
            break;
        }
    }

    assert_eq!(app.state, AppState::Results, "timed session should finish by timeout");
    assert!(app.final_stats.unwrap().elapsed >= Duration::from_secs(1));
}

#[test]
fn headless_restart_and_quit() {
    let clock = ManualClock::new();
    let session =
        Session::with_clock(Mode::Duration(10), FixedSource::new(["go"]), clock.clone()).unwrap();
    let mut app = App::new(session, KeyMap::default(), "test");

    app.on_event(&key('g')).unwrap();
    clock.advance(Duration::from_secs(10));
    app.on_event(&AppEvent::Tick).unwrap();
    assert_eq!(app.state, AppState::Results);

    let enter = AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    assert_eq!(app.on_event(&enter).unwrap(), Control::Continue);
    assert_eq!(app.state, AppState::Typing);
    assert_eq!(app.session.global_position(), 0);

    let esc = AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(app.on_event(&esc).unwrap(), Control::Quit);
}
