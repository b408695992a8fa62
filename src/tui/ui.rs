//! Stateless UI rendering for the trivia tower.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use trivia_tower_core::VisualState;

use super::app::App;
use super::input::GRID_COLUMNS;
use super::presentation::{CardCell, Dialog, TerminalPresentation};

const CARD_HEIGHT: u16 = 3;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let screen = app.screen();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Status bar
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(3), // Help
        ])
        .split(area);

    draw_title(frame, chunks[0], app);
    draw_status(frame, chunks[1], screen);
    draw_board(frame, chunks[2], screen, app.cursor());
    draw_help(frame, chunks[3], screen, app.status_message());

    if let (Some(dialog), Some(body)) = (*screen.dialog(), app.dialog_text()) {
        draw_dialog(frame, area, dialog, body);
    }
}

fn draw_title(frame: &mut Frame, area: Rect, app: &App) {
    let level = app.game().state().current_level_index() + 1;
    let levels = app.game().config().levels().len();
    let (text, color) = if *app.screen().celebrating() {
        (format!("*** Trivia Tower - Level {} of {} cleared! ***", level, levels), Color::Magenta)
    } else {
        (format!("Trivia Tower - Level {} of {}", level, levels), Color::Cyan)
    };

    let title = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn draw_status(frame: &mut Frame, area: Rect, screen: &TerminalPresentation) {
    let combo_style = if *screen.combo_highlight() {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let line = Line::from(vec![
        Span::styled(format!("Time {}", screen.timer_text()), Style::default().fg(Color::White)),
        Span::raw("   "),
        Span::styled(format!("Score: {}", screen.score()), Style::default().fg(Color::Green)),
        Span::raw("   "),
        Span::styled(format!("Hints: {}", screen.hints()), Style::default().fg(Color::Blue)),
        Span::raw("   "),
        Span::styled(screen.combo_text().clone(), combo_style),
    ]);

    let status = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn draw_board(frame: &mut Frame, area: Rect, screen: &TerminalPresentation, cursor: usize) {
    let cards = screen.cards();
    if cards.is_empty() {
        return;
    }

    let rows = cards.len().div_ceil(GRID_COLUMNS);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints((0..rows).map(|_| Constraint::Length(CARD_HEIGHT)))
        .split(area);

    for (row, chunk) in cards.chunks(GRID_COLUMNS).enumerate() {
        let Some(row_area) = row_areas.get(row) else {
            break;
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..GRID_COLUMNS).map(|_| Constraint::Ratio(1, GRID_COLUMNS as u32)))
            .split(*row_area);

        for (col, cell) in chunk.iter().enumerate() {
            let index = row * GRID_COLUMNS + col;
            draw_card(frame, cols[col], cell, index == cursor);
        }
    }
}

fn draw_card(frame: &mut Frame, area: Rect, cell: &CardCell, focused: bool) {
    let (border, text) = match cell.visual() {
        VisualState::Unmatched => (Color::DarkGray, Color::White),
        VisualState::Selected => (Color::Cyan, Color::Cyan),
        VisualState::Matched => (Color::Green, Color::Green),
        VisualState::Hint => (Color::Yellow, Color::Yellow),
        VisualState::Error => (Color::Red, Color::Red),
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    if focused {
        block = block.border_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    }

    let mut style = Style::default().fg(text);
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let paragraph = Paragraph::new(Line::from(Span::styled(cell.view().label().clone(), style)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn draw_help(frame: &mut Frame, area: Rect, screen: &TerminalPresentation, status: Option<&str>) {
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled("arrows move  enter flip  ", enabled),
        Span::styled("h hint  ", if *screen.hint_enabled() { enabled } else { disabled }),
        Span::styled("n next level  ", if *screen.next_enabled() { enabled } else { disabled }),
        Span::styled("r reset  q quit", enabled),
    ];
    if let Some(message) = status {
        spans.push(Span::styled(format!("   {}", message), Style::default().fg(Color::Red)));
    }

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help, area);
}

fn draw_dialog(frame: &mut Frame, area: Rect, dialog: Dialog, body: String) {
    let color = match dialog {
        Dialog::LevelComplete(_) => Color::Green,
        Dialog::Timeout => Color::Red,
        Dialog::AllComplete { .. } => Color::Magenta,
    };

    let width = body
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(40, 76) as u16
        + 4;
    let height = body.lines().count() as u16 + 4;
    let popup = center_rect(area, width.min(area.width), height.min(area.height));
    let paragraph = Paragraph::new(body)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(dialog.title()));

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
