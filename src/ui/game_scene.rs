//! Game scene rendering.
//!
//! Uses a cell buffer for per-character color control: entities are
//! painted back-to-front into a 2D grid, then stamped row-by-row as
//! Paragraph widgets. The logical stage is scaled to whatever area the
//! layout hands us, each axis independently. Stage coordinates put the
//! origin at the center with y growing upward; rows grow downward.

use crate::constants::WING_FRAME_SECONDS;
use crate::game::{FlappyGame, ScreenSize};
use crate::sim::{Entity, Shape, Sprite};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const GROUND_CHAR: char = '▓';
const BARRIER_COLOR: Color = Color::Green;
const BARRIER_LIP_COLOR: Color = Color::LightGreen;
const BIRD_COLOR: Color = Color::Yellow;
const SKY_COLOR: Color = Color::Rgb(70, 90, 120);

/// Cloud wisps per background layer: (dx from layer center, stage y,
/// pattern). Each layer paints the same texture, so the three layers
/// tile seamlessly as they scroll.
const CLOUD_PATTERNS: &[(f64, f64, &str)] = &[
    (-320.0, 290.0, "~~~"),
    (-150.0, 180.0, "~~"),
    (40.0, 320.0, "~~~~"),
    (210.0, 130.0, "~~"),
    (360.0, 250.0, "~~~"),
    (-40.0, -90.0, "~"),
    (280.0, -40.0, "~~"),
];

/// Cell in the render buffer with foreground and background colors.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Stage points to terminal cells.
struct Mapper {
    sx: f64,
    sy: f64,
    half_w: f64,
    half_h: f64,
}

impl Mapper {
    fn new(screen: ScreenSize, cols: usize, rows: usize) -> Self {
        Self {
            sx: cols as f64 / screen.w,
            sy: rows as f64 / screen.h,
            half_w: screen.w / 2.0,
            half_h: screen.h / 2.0,
        }
    }

    fn col(&self, x: f64) -> i32 {
        ((x + self.half_w) * self.sx).round() as i32
    }

    fn row(&self, y: f64) -> i32 {
        ((self.half_h - y) * self.sy).round() as i32
    }
}

/// Render the whole scene into `area`.
pub fn render_game_scene(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    if area.width < 12 || area.height < 8 {
        return;
    }

    let cols = area.width as usize;
    let rows = area.height as usize;
    let mut buffer: Vec<Vec<Cell>> = vec![vec![Cell::default(); cols]; rows];
    let map = Mapper::new(game.screen, cols, rows);

    // ── Background layers ─────────────────────────────────────────────
    for e in game.stage.entities() {
        if e.sprite == Sprite::Background {
            paint_background(&mut buffer, &map, e);
        }
    }

    // ── Barriers and ground ───────────────────────────────────────────
    for e in game.stage.entities() {
        match e.sprite {
            Sprite::Pipe => paint_barrier(&mut buffer, &map, e),
            Sprite::Ground => paint_ground(&mut buffer, &map, e),
            _ => {}
        }
    }

    // ── Player ────────────────────────────────────────────────────────
    // Two wing frames alternate on the stage clock, so the flapping
    // freezes along with everything else when the round ends.
    let wing_up = (game.stage.clock() / WING_FRAME_SECONDS) as u64 % 2 == 0;
    for e in game.stage.entities() {
        if e.sprite == Sprite::Bird {
            paint_bird(&mut buffer, &map, e, wing_up);
        }
    }

    // ── Score ─────────────────────────────────────────────────────────
    for e in game.stage.entities() {
        if e.sprite == Sprite::Score {
            paint_score(&mut buffer, &map, e);
        }
    }

    stamp(frame, area, &buffer);

    // ── Game over banner ──────────────────────────────────────────────
    if let Some(banner) = game
        .stage
        .entities()
        .iter()
        .find(|e| e.sprite == Sprite::Banner)
    {
        if let Some(text) = banner.label.as_deref() {
            render_banner(frame, area, text);
        }
    }
}

fn paint(buffer: &mut [Vec<Cell>], row: i32, col: i32, cell: Cell) {
    if row < 0 || col < 0 {
        return;
    }
    let (row, col) = (row as usize, col as usize);
    if row < buffer.len() && col < buffer[row].len() {
        buffer[row][col] = cell;
    }
}

fn paint_background(buffer: &mut [Vec<Cell>], map: &Mapper, e: &Entity) {
    for &(dx, y, pattern) in CLOUD_PATTERNS {
        let row = map.row(y);
        let start = map.col(e.pos.x + dx);
        for (i, ch) in pattern.chars().enumerate() {
            let col = start + i as i32;
            if row < 0 || col < 0 {
                continue;
            }
            let (r, c) = (row as usize, col as usize);
            // Backdrop never overdraws anything already painted.
            if r < buffer.len() && c < buffer[r].len() && buffer[r][c].ch == ' ' {
                buffer[r][c] = Cell {
                    ch,
                    fg: SKY_COLOR,
                    bg: Color::Reset,
                };
            }
        }
    }
}

fn paint_barrier(buffer: &mut [Vec<Cell>], map: &Mapper, e: &Entity) {
    let Some(body) = e.body.as_ref() else {
        return;
    };
    let Shape::Rect { w, h } = body.shape else {
        return;
    };

    let rows = buffer.len() as i32;
    let cols = buffer[0].len() as i32;
    let left = map.col(e.pos.x - w / 2.0);
    let right = map.col(e.pos.x + w / 2.0);
    let top = map.row(e.pos.y + h / 2.0);
    let bottom = map.row(e.pos.y - h / 2.0);

    // The gap-facing edge gets a lip row so the opening reads clearly:
    // upper barriers hang down from the top, lower ones rise from below.
    let (lip_row, lip_ch) = if e.pos.y > 0.0 {
        (bottom, '▀')
    } else {
        (top, '▄')
    };

    for row in top.max(0)..=bottom.min(rows - 1) {
        for col in left.max(0)..=right.min(cols - 1) {
            let (ch, fg) = if row == lip_row {
                (lip_ch, BARRIER_LIP_COLOR)
            } else {
                ('█', BARRIER_COLOR)
            };
            buffer[row as usize][col as usize] = Cell {
                ch,
                fg,
                bg: Color::Reset,
            };
        }
    }
}

fn paint_ground(buffer: &mut [Vec<Cell>], map: &Mapper, e: &Entity) {
    let rows = buffer.len() as i32;
    let row = map.row(e.pos.y).clamp(0, rows - 1) as usize;
    for cell in buffer[row].iter_mut() {
        *cell = Cell {
            ch: GROUND_CHAR,
            fg: Color::Rgb(90, 70, 50),
            bg: Color::Rgb(50, 40, 30),
        };
    }
}

fn paint_bird(buffer: &mut [Vec<Cell>], map: &Mapper, e: &Entity, wing_up: bool) {
    let row = map.row(e.pos.y);
    let col = map.col(e.pos.x);
    let wing = if wing_up { '/' } else { '\\' };
    for (dx, ch) in [(-1, wing), (0, 'o'), (1, '>')] {
        paint(
            buffer,
            row,
            col + dx,
            Cell {
                ch,
                fg: BIRD_COLOR,
                bg: Color::Reset,
            },
        );
    }
}

fn paint_score(buffer: &mut [Vec<Cell>], map: &Mapper, e: &Entity) {
    let Some(text) = e.label.as_deref() else {
        return;
    };
    let row = map.row(e.pos.y);
    let start = map.col(e.pos.x) - text.len() as i32 / 2;
    for (i, ch) in text.chars().enumerate() {
        paint(
            buffer,
            row,
            start + i as i32,
            Cell {
                ch,
                fg: Color::White,
                bg: Color::Reset,
            },
        );
    }
}

/// Stamp the buffer row-by-row, merging consecutive same-style cells
/// into single spans.
fn stamp(frame: &mut Frame, area: Rect, buffer: &[Vec<Cell>]) {
    for (row_idx, row) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut run = String::new();
        let mut fg = Color::Reset;
        let mut bg = Color::Reset;

        for &cell in row {
            if (cell.fg != fg || cell.bg != bg) && !run.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut run),
                    Style::default().fg(fg).bg(bg),
                ));
            }
            fg = cell.fg;
            bg = cell.bg;
            run.push(cell.ch);
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, Style::default().fg(fg).bg(bg)));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(area.x, area.y + row_idx as u16, area.width, 1),
        );
    }
}

/// Centered bordered modal over the scene with the game-over text.
fn render_banner(frame: &mut Frame, area: Rect, text: &str) {
    let hint = "Press any key to play again";
    let width = (text.len().max(hint.len()) as u16 + 6).min(area.width);
    let height = 5u16.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let modal = Rect::new(x, y, width, height);

    frame.render_widget(Clear, modal);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightRed));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let lines = vec![
        Line::from(Span::styled(
            text.to_string(),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
