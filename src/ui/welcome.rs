use crate::config::{on_off, Config};
use crate::ui::layout::{centered_rect, render_backdrop};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::path::Path;

/// 渲染首次运行欢迎对话框，`config_path` 由 App 启动时解析一次
pub fn render(f: &mut Frame, area: Rect, config: &Config, config_path: Option<&Path>) {
    render_backdrop(f, area);

    let popup_area = centered_rect(70, 60, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Welcome to Task Dashboard ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Black));

    f.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let config_path = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(unavailable)".to_string());

    let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Manage your tasks and collaborate with your team",
            bold(Color::Yellow),
        )),
        Line::from(""),
        Line::from("A default configuration has been written:"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  decorative motion: ", Style::default().fg(Color::DarkGray)),
            Span::styled(on_off(config.decorative_motion), bold(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("  demo tasks:        ", Style::default().fg(Color::DarkGray)),
            Span::styled(on_off(config.seed_demo_tasks), bold(Color::Green)),
        ]),
        Line::from(""),
        Line::from(Span::styled("Config file:", bold(Color::Cyan))),
        Line::from(Span::styled(config_path, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled("Change it with:", bold(Color::Cyan))),
        Line::from(Span::styled("  tdash config motion on|off", Style::default().fg(Color::Green))),
        Line::from(Span::styled("  tdash config show", Style::default().fg(Color::Green))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  a", Style::default().fg(Color::Yellow)),
            Span::raw("  new task   "),
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw("  search   "),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::raw("  help   "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw("  quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Press any key to start", bold(Color::Green))),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}
