use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, AppState},
    clock::Clock,
    language::WordSource,
    mode::Mode,
    session::{Session, CHARS_PER_LINE, LINES_PER_VIEW},
    stats::TypingStats,
};

impl<S: WordSource, C: Clock> Widget for &App<S, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match (self.state, self.final_stats.as_ref()) {
            (AppState::Results, Some(stats)) => render_results(stats, area, buf),
            _ => render_typing(self, area, buf),
        }
    }
}

fn dim_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// Centre a block of `width` x `height` cells inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}

fn progress_line<S: WordSource, C: Clock>(app: &App<S, C>) -> Line<'static> {
    let session = &app.session;
    let progress = match session.mode() {
        Mode::Duration(_) => format!("{}s", session.remaining_time()),
        Mode::WordCount(target) => format!("{}/{}", session.words_typed().min(target), target),
    };

    Line::from(vec![
        Span::styled(
            progress,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", app.language), dim_style()),
    ])
}

/// The line being typed: typed characters coloured by outcome, the cursor
/// underlined and the remainder dimmed
fn active_line<S: WordSource, C: Clock>(session: &Session<S, C>) -> Line<'static> {
    let correct = Style::default().fg(Color::Green);
    let incorrect = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    let cursor = dim_style().add_modifier(Modifier::UNDERLINED);

    let expected: Vec<char> = session.visible_lines()[0].chars().collect();
    let typed: Vec<char> = session.current_input().chars().collect();
    let pos = session.cursor_position();

    let mut spans: Vec<Span> = expected
        .iter()
        .zip(typed.iter())
        .map(|(&want, &got)| {
            if want == got {
                Span::styled(want.to_string(), correct)
            } else if got == ' ' {
                Span::styled("·", incorrect)
            } else {
                Span::styled(got.to_string(), incorrect)
            }
        })
        .collect();

    match expected.get(pos) {
        Some(c) => {
            spans.push(Span::styled(c.to_string(), cursor));
            let rest: String = expected.iter().skip(pos + 1).collect();
            spans.push(Span::styled(rest, dim_style()));
        }
        // end of line, waiting for space or enter
        None => spans.push(Span::styled(" ", cursor)),
    }

    Line::from(spans)
}

fn render_typing<S: WordSource, C: Clock>(app: &App<S, C>, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let width = session
        .visible_lines()
        .iter()
        .map(|l| l.width())
        .max()
        .unwrap_or(0)
        .max(CHARS_PER_LINE) as u16
        + 1;
    let height = LINES_PER_VIEW as u16 + 4;

    let mut lines = vec![progress_line(app), Line::default(), active_line(session)];
    lines.extend(
        session.visible_lines()[1..]
            .iter()
            .map(|l| Line::styled(l.clone(), dim_style())),
    );
    lines.push(Line::default());
    lines.push(Line::styled("esc quit", dim_style()));

    Paragraph::new(lines).render(centered(area, width.min(area.width), height), buf);
}

fn render_results(stats: &TypingStats, area: Rect, buf: &mut Buffer) {
    let label = dim_style();
    let value = Style::default().add_modifier(Modifier::BOLD);
    let row = |name: &str, text: String| {
        Line::from(vec![
            Span::styled(format!("{name:>10}  "), label),
            Span::styled(text, value),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("{:.0} wpm", stats.wpm),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::default(),
        row("accuracy", format!("{:.1}%", stats.accuracy)),
        row("raw", format!("{:.0} wpm", stats.gross_wpm)),
        row(
            "chars",
            format!("{}/{}", stats.correct_chars, stats.characters_typed),
        ),
        row(
            "errors",
            format!(
                "{} uncorrected, {} total",
                stats.uncorrected_errors, stats.total_errors
            ),
        ),
        row("time", format!("{:.1}s", stats.elapsed.as_secs_f64())),
        Line::default(),
        Line::styled("enter restart · esc quit", label).alignment(Alignment::Center),
    ];

    let height = lines.len() as u16;
    Paragraph::new(lines).render(centered(area, 40u16.min(area.width), height), buf);
}
