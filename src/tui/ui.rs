//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::features::focus::{Phase, PlayState};
use crate::tui::app::{App, MAX_TEXT, WIDGET_ID};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: body, status bar, help line
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status bar
            Constraint::Length(1), // Help line
        ])
        .split(frame.area());

    render_status_bar(frame, app, chunks[1]);
    render_help(frame, app, chunks[2]);

    if let Some(ref input) = app.prompt {
        render_prompt(frame, input);
    } else if let Some(ref error) = app.error {
        render_popup(frame, " Input Error ", error, Color::Red);
    } else if let Some(ref alert) = app.alert {
        render_popup(frame, " Focus ", &alert.message, Color::Cyan);
    }
}

/// Render the timer text and tooltip.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let timer = &app.timer;
    let color = match (timer.play_state(), timer.phase()) {
        (PlayState::Idle, _) => Color::White,
        (PlayState::Paused, _) => Color::Yellow,
        (PlayState::Running, Phase::Work) => Color::Green,
        (PlayState::Running, Phase::Break) => Color::Magenta,
    };

    #[allow(clippy::cast_possible_truncation)]
    let text_width = MAX_TEXT.chars().count() as u16;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(text_width + 2), Constraint::Min(0)])
        .split(area);

    let text = Paragraph::new(timer.render_text())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {WIDGET_ID} "))
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(text, columns[0]);

    let tooltip = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(timer.render_tooltip(), Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::TOP | Borders::BOTTOM));
    frame.render_widget(tooltip, columns[1]);
}

/// Render the help/status line.
fn render_help(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status = app.status.as_deref().unwrap_or("");
    let help = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

/// Render the focus length prompt.
fn render_prompt(frame: &mut Frame<'_>, input: &str) {
    let area = centered_rect(frame.area(), 44, 5);
    let body = vec![
        Line::from("Input length for focus session:"),
        Line::from(Span::styled(
            format!("> {input}_"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(body).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Input Your Length ")
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        area,
    );
}

/// Render a bordered message box.
fn render_popup(frame: &mut Frame<'_>, title: &str, message: &str, color: Color) {
    let area = centered_rect(frame.area(), 44, 5);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(color)),
            ),
        area,
    );
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
