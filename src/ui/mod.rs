//! Terminal UI: the scene plus a one-line status bar under it.

pub mod game_scene;

use crate::game::{FlappyGame, GamePhase};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the whole UI for one frame.
pub fn draw_ui(frame: &mut Frame, game: &FlappyGame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)])
        .split(frame.size());

    game_scene::render_game_scene(frame, chunks[0], game);
    render_status_bar(frame, chunks[1], game);
}

/// Score on the left, the controls that currently apply on the right.
fn render_status_bar(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    if area.height < 1 {
        return;
    }

    let controls: &[(&str, &str)] = match game.state.phase {
        GamePhase::Playing => &[("[Any key]", "Flap"), ("[Q/Esc]", "Quit")],
        GamePhase::GameOver => &[("[Any key]", "Play again"), ("[Q/Esc]", "Quit")],
    };

    let mut spans = vec![Span::styled(
        format!(" Score: {} ", game.state.score),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    for (key, action) in controls {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
