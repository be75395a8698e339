use std::collections::HashSet;
use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use typtea::{
    clock::ManualClock,
    language::{FixedSource, Vocabulary, WordSourceError},
    session::{CHARS_PER_LINE, LINES_PER_VIEW},
    Error, Mode, Session,
};

fn fixed_session(mode: Mode, clock: ManualClock) -> Session<FixedSource, ManualClock> {
    let words = [
        "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    ];
    Session::with_clock(mode, FixedSource::new(words), clock).unwrap()
}

fn type_text<C: typtea::clock::Clock>(s: &mut Session<FixedSource, C>, text: &str) {
    for c in text.chars() {
        s.add_character(c).unwrap();
    }
}

fn assert_invariants<S: typtea::language::WordSource, C: typtea::clock::Clock>(
    s: &Session<S, C>,
) {
    let lines = s.visible_lines();
    assert_eq!(lines.len(), LINES_PER_VIEW);
    for line in lines {
        assert!(
            line.chars().count() <= CHARS_PER_LINE || !line.contains(' '),
            "line too long: {line:?}"
        );
    }
    assert!(s.cursor_position() <= lines[0].chars().count());
    assert!(s.uncorrected_errors().iter().all(|&p| p < s.global_position()));
    assert!(s.total_errors() >= s.uncorrected_errors().len());
    assert_eq!(s.current_input().chars().count(), s.cursor_position());
}

#[test]
fn random_keystrokes_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut s = fixed_session(Mode::Duration(60), ManualClock::new());
    let mut last_total = 0;

    for _ in 0..5_000 {
        match rng.gen_range(0..10) {
            0 => s.remove_character(),
            1 => {
                s.handle_enter().unwrap();
            }
            2 => s.add_character(' ').unwrap(),
            3..=5 => {
                // mostly type what is expected so lines get completed
                let expected = s.visible_lines()[0].chars().nth(s.cursor_position());
                s.add_character(expected.unwrap_or(' ')).unwrap();
            }
            _ => s.add_character(rng.gen_range(' '..='~')).unwrap(),
        }

        assert_invariants(&s);
        assert!(s.total_errors() >= last_total);
        last_total = s.total_errors();
    }

    assert!(s.words_consumed() > 0);
}

#[test]
fn backspace_undoes_last_keystroke() {
    let mut s = fixed_session(Mode::WordCount(50), ManualClock::new());
    type_text(&mut s, "lorem ip");

    for c in ['s', 'x', ' '] {
        let cursor = s.cursor_position();
        let pos = s.global_position();
        let errors: HashSet<usize> = s.uncorrected_errors().clone();

        s.add_character(c).unwrap();
        s.remove_character();

        assert_eq!(s.cursor_position(), cursor);
        assert_eq!(s.global_position(), pos);
        assert_eq!(s.uncorrected_errors(), &errors);
    }
}

#[test]
fn wrong_character_is_counted_against_accuracy() {
    let clock = ManualClock::new();
    let mut s = fixed_session(Mode::WordCount(50), clock.clone());
    type_text(&mut s, "lor");

    let pos = s.global_position();
    s.add_character('x').unwrap();

    assert_eq!(s.global_position(), pos + 1);
    assert!(s.uncorrected_errors().contains(&pos));
    assert_eq!(s.total_errors(), 1);

    clock.advance(Duration::from_secs(1));
    let stats = s.stats();
    assert_eq!(stats.accuracy, (4.0 - 1.0) / 4.0 * 100.0);
    assert_eq!(stats.uncorrected_errors, 1);
}

#[test]
fn word_count_session_ends_after_target_words() {
    let mut s = fixed_session(Mode::WordCount(10), ManualClock::new());
    let words = [
        "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    ];

    for (i, word) in words.iter().enumerate() {
        assert!(!s.is_finished(), "finished early after {i} words");
        type_text(&mut s, word);
        s.add_character(' ').unwrap();
        assert_invariants(&s);
    }

    assert!(s.is_finished());
    assert_eq!(s.remaining_words(), 0);
    let stats = s.stats();
    assert!(stats.is_complete);
    assert_eq!(stats.accuracy, 100.0);
}

#[test]
fn duration_session_ends_after_duration() {
    let clock = ManualClock::new();
    let mut s = fixed_session(Mode::Duration(10), clock.clone());

    assert_eq!(s.remaining_time(), 10);
    s.start();
    for _ in 0..99 {
        clock.advance(Duration::from_millis(100));
        assert!(!s.is_finished());
    }
    clock.advance(Duration::from_millis(100));

    assert!(s.is_finished());
    assert_eq!(s.remaining_time(), 0);
    assert!(s.stats().is_complete);
}

#[test]
fn stats_are_zero_before_start() {
    let s = fixed_session(Mode::Duration(30), ManualClock::new());
    let stats = s.stats();

    assert_eq!(stats.accuracy, 0.0);
    assert_eq!(stats.wpm, 0.0);
    assert_eq!(stats.characters_typed, 0);
    assert!(!stats.is_complete);
}

#[test]
fn live_wpm_for_a_steady_typist() {
    let clock = ManualClock::new();
    let mut s = fixed_session(Mode::Duration(60), clock.clone());

    // 300 correct characters in one minute is 60 wpm
    let mut typed = 0;
    while typed < 300 {
        let expected = s.visible_lines()[0].chars().nth(s.cursor_position());
        s.add_character(expected.unwrap_or(' ')).unwrap();
        clock.advance(Duration::from_millis(200));
        typed += 1;
    }

    let stats = s.stats();
    assert_eq!(stats.characters_typed, 300);
    assert!((stats.wpm - 60.0).abs() < 1e-9);
    assert_eq!(stats.accuracy, 100.0);
}

#[test]
fn unknown_language_fails_before_a_session_exists() {
    let err = Vocabulary::load("esperanto").unwrap_err();
    assert!(matches!(err, WordSourceError::UnknownLanguage { .. }));

    let err: Error = err.into();
    assert!(err.to_string().contains("esperanto"));
}

#[test]
fn real_vocabulary_session() {
    let vocab = Vocabulary::with_seed("en", 1).unwrap();
    let mut s = Session::word_count(10, vocab).unwrap();

    let text = s.visible_lines().join(" ");
    for c in text.chars() {
        s.add_character(c).unwrap();
    }
    s.handle_enter().unwrap();

    assert!(s.is_finished());
    assert_eq!(s.stats().total_errors, 0);
}
