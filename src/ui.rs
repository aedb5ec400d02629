//! Terminal rendering. Pure function of a `RenderState` snapshot.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::config::ViewMode;
use crate::render::RenderState;
use crate::session::Severity;

/// Accent and dim colors for a theme name. Unknown themes fall back to dark.
fn theme_colors(theme: &str) -> (Color, Color) {
    match theme {
        "light" => (Color::Blue, Color::DarkGray),
        "matrix" => (Color::Green, Color::DarkGray),
        "amber" => (Color::Yellow, Color::DarkGray),
        "midnight" => (Color::Magenta, Color::DarkGray),
        _ => (Color::Cyan, Color::DarkGray),
    }
}

fn severity_color(kind: Severity, accent: Color) -> Color {
    match kind {
        Severity::Info => Color::Gray,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
        Severity::Output => accent,
    }
}

pub fn draw(frame: &mut Frame, state: &RenderState) {
    let (accent, dim) = theme_colors(&state.theme);

    match state.view_mode {
        ViewMode::Basic => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(3)])
                .split(frame.area());
            draw_output(frame, rows[0], state, accent, dim);
            draw_input(frame, rows[1], state, accent);
        }
        ViewMode::Futuristic => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
                .split(frame.area());
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(3)])
                .split(columns[0]);
            draw_output(frame, rows[0], state, accent, dim);
            draw_input(frame, rows[1], state, accent);
            draw_sidebar(frame, columns[1], state, accent, dim);
        }
    }
}

fn draw_output(frame: &mut Frame, area: Rect, state: &RenderState, accent: Color, dim: Color) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.lines.len().saturating_sub(visible);

    let lines: Vec<Line> = state.lines[start..]
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.content.clone(),
                Style::default().fg(severity_color(line.kind, accent)),
            ))
        })
        .collect();

    let output = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" OMEGA TERMINAL ")
            .border_style(Style::default().fg(dim)),
    );
    frame.render_widget(output, area);
}

fn draw_input(frame: &mut Frame, area: Rect, state: &RenderState, accent: Color) {
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        Span::raw(state.input_buffer.clone()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(input, area);
}

fn draw_sidebar(frame: &mut Frame, area: Rect, state: &RenderState, accent: Color, dim: Color) {
    let mut lines = vec![status_line(
        "wallet",
        state.wallet.clone().unwrap_or_else(|| "disconnected".to_string()),
        state.wallet.is_some(),
        accent,
    )];

    lines.push(status_line(
        "mining",
        if state.is_mining {
            format!("{} blocks / {:.4} OMEGA", state.mine_count, state.total_earned)
        } else {
            "idle".to_string()
        },
        state.is_mining,
        accent,
    ));

    lines.push(status_line(
        "stress",
        if state.is_stress_testing {
            format!("{} txs sent", state.stress_sent)
        } else {
            "idle".to_string()
        },
        state.is_stress_testing,
        accent,
    ));

    lines.push(Line::default());
    for (name, open) in [
        ("youtube", state.panels.youtube_open),
        ("news", state.panels.news_open),
        ("perp", state.panels.perp_open),
    ] {
        lines.push(status_line(
            name,
            if open { "open" } else { "closed" }.to_string(),
            open,
            accent,
        ));
    }

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" STATUS ")
            .border_style(Style::default().fg(dim)),
    );
    frame.render_widget(sidebar, area);
}

fn status_line(label: &str, value: String, active: bool, accent: Color) -> Line<'static> {
    let value_style = if active {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(format!("{:<8} ", label), Style::default().fg(Color::Gray)),
        Span::styled(value, value_style),
    ])
}
