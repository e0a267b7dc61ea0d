//! Layout and drawing: board, player, status title, key hints, pause overlay.

use crate::game::GameState;
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

/// One tile is two terminal columns by one row, which reads roughly square.
pub const CELL_WIDTH: u16 = 2;
pub const CELL_HEIGHT: u16 = 1;

/// Rows under the board for the key hints.
const HINT_ROWS: u16 = 1;

const HINTS: &str = " Arrows/WASD move  P pause  R restart  Q quit ";

/// Board size in terminal cells including the border.
fn board_outer_size(width: usize, height: usize) -> (u16, u16) {
    (
        width as u16 * CELL_WIDTH + 2,
        height as u16 * CELL_HEIGHT + 2,
    )
}

/// Bordered board rect, centred in `area` together with the hint row.
pub fn board_outer_rect(area: Rect, width: usize, height: usize) -> Rect {
    let (w, h) = board_outer_size(width, height);
    let total_h = h + HINT_ROWS;
    Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(total_h) / 2,
        width: w.min(area.width),
        height: h.min(area.height),
    }
}

/// Inner board rect (no border) where grid cell (0, 0) starts.
pub fn board_inner_rect(area: Rect, width: usize, height: usize) -> Rect {
    let outer = board_outer_rect(area, width, height);
    Rect {
        x: outer.x + 1,
        y: outer.y + 1,
        width: outer.width.saturating_sub(2),
        height: outer.height.saturating_sub(2),
    }
}

pub fn draw(frame: &mut Frame, state: &GameState, theme: &Theme, paused: bool) {
    let area = frame.area();
    let buf = frame.buffer_mut();

    Block::default()
        .style(Style::default().bg(theme.bg))
        .render(area, buf);

    let outer = board_outer_rect(area, state.grid.width, state.grid.height);
    let title = format!(" Keystone  | Tick {} ", state.ticks);
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(title, theme.title))
        .render(outer, buf);

    let board = board_inner_rect(area, state.grid.width, state.grid.height);
    draw_grid(buf, board, state, theme);
    let (px, py) = state.player.position();
    fill_cell(buf, board, px, py, theme.player);

    let hints = Rect {
        x: outer.x,
        y: outer.y + outer.height,
        width: outer.width,
        height: HINT_ROWS,
    }
    .intersection(area);
    Paragraph::new(Line::from(Span::styled(
        HINTS,
        Style::default().fg(theme.main_fg),
    )))
    .alignment(Alignment::Center)
    .render(hints, buf);

    if paused {
        draw_pause_overlay(buf, area, theme);
    }
}

fn draw_grid(buf: &mut Buffer, board: Rect, state: &GameState, theme: &Theme) {
    for (y, row) in state.grid.rows().enumerate() {
        for (x, tile) in row.iter().enumerate() {
            if let Some(color) = tile.color(theme) {
                fill_cell(buf, board, x, y, color);
            }
        }
    }
}

/// Fill grid cell (x, y) with a solid colour, clipped to the board.
fn fill_cell(buf: &mut Buffer, board: Rect, x: usize, y: usize, color: Color) {
    let x0 = board.x as usize + x * CELL_WIDTH as usize;
    let y0 = board.y as usize + y * CELL_HEIGHT as usize;
    let right = (board.x + board.width) as usize;
    let bottom = (board.y + board.height) as usize;
    for by in y0..(y0 + CELL_HEIGHT as usize).min(bottom) {
        for bx in x0..(x0 + CELL_WIDTH as usize).min(right) {
            buf[(bx as u16, by as u16)]
                .set_symbol("█")
                .set_style(Style::default().fg(color).bg(color));
        }
    }
}

fn draw_pause_overlay(buf: &mut Buffer, area: Rect, theme: &Theme) {
    let popup_w = 26u16;
    let popup_h = 5u16;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };
    Clear.render(popup, buf);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Paused ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " P resume    Q quit ",
            Style::default().fg(theme.main_fg),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
        )
        .style(Style::default().bg(theme.bg))
        .render(popup, buf);
}
