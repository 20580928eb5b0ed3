//! Terminal UI rendering with ratatui

use crate::game::GameState;
use crate::snapshot::{CellView, Snapshot};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const BLOCK: &str = "██";
const EMPTY: &str = "  ";
/// Stats column width
const SIDE_WIDTH: u16 = 16;

/// Render the board, the stats column and the game over overlay
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot) {
    let area = frame.area();

    // Two terminal columns per cell, plus borders
    let board_width = to_u16(snapshot.width).saturating_mul(2).saturating_add(2);
    let board_height = to_u16(snapshot.height).saturating_add(2);
    let game_area = center_rect(area, board_width.saturating_add(SIDE_WIDTH), board_height);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Length(SIDE_WIDTH)])
        .split(game_area);

    render_board(frame, layout[0], snapshot);
    render_stats(frame, layout[1], snapshot);

    if snapshot.state == GameState::GameOver {
        render_overlay(
            frame,
            area,
            "GAME OVER",
            &format!("Score {} - press q", snapshot.score),
        );
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .title(" blockfall ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = snapshot
        .rows()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| match cell {
                        CellView::Empty => Span::raw(EMPTY),
                        CellView::Filled => Span::styled(BLOCK, Style::default().fg(Color::Gray)),
                        CellView::Active => Span::styled(BLOCK, Style::default().fg(Color::Cyan)),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            snapshot.score.to_string(),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            snapshot.lines.to_string(),
            Style::default().fg(Color::Green),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_area = center_rect(area, 26, 5);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{MAX_WIDTH, MIN_HEIGHT};
    use ratatui::{Terminal, backend::TestBackend};

    fn snapshot(state: GameState) -> Snapshot {
        let mut cells = vec![CellView::Empty; 200];
        cells[4] = CellView::Active;
        cells[199] = CellView::Filled;
        Snapshot {
            width: 10,
            height: 20,
            cells,
            score: 120,
            lines: 12,
            state,
        }
    }

    fn draw(snapshot: &Snapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 26)).unwrap();
        terminal.draw(|frame| render_game(frame, snapshot)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_score_and_cells() {
        let screen = draw(&snapshot(GameState::Running));
        assert!(screen.contains("SCORE"));
        assert!(screen.contains("120"));
        assert!(screen.contains("LINES"));
        // One active cell and one filled cell, two glyphs each
        assert_eq!(screen.matches('█').count(), 4);
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_overlay() {
        let screen = draw(&snapshot(GameState::GameOver));
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Score 120"));
    }

    #[test]
    fn test_widest_board_is_clipped() {
        let snapshot = Snapshot {
            width: MAX_WIDTH,
            height: MIN_HEIGHT,
            cells: vec![CellView::Filled; MAX_WIDTH * MIN_HEIGHT],
            score: 0,
            lines: 0,
            state: GameState::Running,
        };
        let screen = draw(&snapshot);
        assert!(screen.contains('█'));
    }

    #[test]
    fn test_oversized_dimensions_saturate() {
        assert_eq!(to_u16(70_000), u16::MAX);
        assert_eq!(to_u16(20), 20);
    }

    #[test]
    fn test_center_rect_clamps() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(center_rect(area, 20, 20), area);
        assert_eq!(center_rect(area, 4, 1), Rect::new(3, 2, 4, 1));
    }
}
