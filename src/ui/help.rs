use crate::input::CommandRegistry;
use crate::ui::layout::{centered_rect, render_backdrop};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn key_line<'a>(keys: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<11}", keys), Style::default().fg(Color::Cyan)),
        Span::raw(desc),
    ])
}

/// 渲染帮助面板
pub fn render(f: &mut Frame, area: Rect, registry: &CommandRegistry) {
    render_backdrop(f, area);

    let popup_area = centered_rect(80, 85, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keyboard Help (Esc or ? to close) ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Black));

    f.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(inner);

    // 左列：导航与任务操作
    let navigation_help = vec![
        heading("Navigation"),
        Line::from(""),
        key_line("j, ↓", "Next task"),
        key_line("k, ↑", "Previous task"),
        key_line("gg, Home", "First task"),
        key_line("G, End", "Last task"),
        key_line("q", "Quit"),
        key_line("Esc", "Cancel"),
        Line::from(""),
        heading("Tasks"),
        Line::from(""),
        key_line("a, n", "New task"),
        key_line("e, Enter", "Edit task"),
        key_line("d, Del", "Delete task"),
        key_line("m", "Toggle overdue motion"),
    ];

    // 中列：搜索与过滤、表单
    let filter_help = vec![
        heading("Search & Filter"),
        Line::from(""),
        key_line("/", "Search (live)"),
        key_line("s / S", "Cycle / pick status"),
        key_line("p / P", "Cycle / pick priority"),
        key_line("0-3", "All / To Do / In Progress / Completed"),
        key_line("x", "Clear filters"),
        Line::from(""),
        heading("Task Form"),
        Line::from(""),
        key_line("Tab", "Next field"),
        key_line("←/→", "Change priority / status"),
        key_line("Enter", "Add collaborator"),
        key_line("d", "Remove collaborator"),
        key_line("Ctrl+S", "Save"),
        key_line("Esc", "Cancel"),
    ];

    // 右列：命令
    let mut command_help = vec![heading("Commands (:)"), Line::from("")];
    for cmd in registry.all_commands() {
        let usage = if cmd.args.is_empty() {
            cmd.name.to_string()
        } else {
            format!("{} {}", cmd.name, cmd.args)
        };
        command_help.push(Line::from(Span::styled(usage, Style::default().fg(Color::Cyan))));
        command_help.push(Line::from(Span::styled(
            format!("  {}", cmd.description),
            Style::default().fg(Color::Gray),
        )));
    }

    let nav_widget = Paragraph::new(navigation_help)
        .block(Block::default().borders(Borders::RIGHT))
        .wrap(Wrap { trim: false });
    let filter_widget = Paragraph::new(filter_help)
        .block(Block::default().borders(Borders::RIGHT))
        .wrap(Wrap { trim: false });
    let command_widget = Paragraph::new(command_help).wrap(Wrap { trim: false });

    f.render_widget(nav_widget, columns[0]);
    f.render_widget(filter_widget, columns[1]);
    f.render_widget(command_widget, columns[2]);
}
