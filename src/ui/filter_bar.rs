use crate::app::{App, Mode};
use crate::models::Status;
use crate::store::{Filter, TaskStats};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// 快捷过滤徽章：(过滤器, 文本)，计数基于全部任务
pub fn quick_filter_badges(stats: &TaskStats) -> Vec<(Filter<Status>, String)> {
    let mut badges = vec![(Filter::All, format!("All Tasks ({})", stats.total))];
    badges.extend(
        Status::ALL
            .iter()
            .map(|&status| (Filter::Only(status), format!("{} ({})", status.label(), stats.count(status)))),
    );
    badges
}

/// 渲染搜索框、过滤器和快捷徽章（共两行 + 边框）
pub fn render(f: &mut Frame, area: Rect, app: &App, stats: &TaskStats) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(22),
            Constraint::Length(22),
        ])
        .split(rows[0]);

    // 搜索框
    let searching = app.mode == Mode::Search;
    let search_border = if searching {
        Color::Rgb(136, 192, 208)
    } else {
        Color::Rgb(76, 86, 106)
    };
    let search_line = if app.view.search.is_empty() && !searching {
        Line::from(Span::styled(
            "Search tasks... (/)",
            Style::default().fg(Color::Rgb(76, 86, 106)),
        ))
    } else {
        let mut spans = vec![Span::styled(
            app.view.search.clone(),
            Style::default().fg(Color::Rgb(236, 239, 244)),
        )];
        if searching {
            spans.push(Span::styled("█", Style::default().fg(Color::Rgb(136, 192, 208))));
        }
        Line::from(spans)
    };
    let search = Paragraph::new(search_line).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(search_border)),
    );
    f.render_widget(search, top[0]);

    let status_text = match app.view.status_filter {
        Filter::All => "All Status".to_string(),
        Filter::Only(status) => status.label().to_string(),
    };
    let priority_text = match app.view.priority_filter {
        Filter::All => "All Priority".to_string(),
        Filter::Only(priority) => priority.label().to_string(),
    };

    for (rect, title, text) in [
        (top[1], " Status (s/S) ", status_text),
        (top[2], " Priority (p/P) ", priority_text),
    ] {
        let widget = Paragraph::new(text)
            .style(Style::default().fg(Color::Rgb(216, 222, 233)))
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Rgb(76, 86, 106))),
            );
        f.render_widget(widget, rect);
    }

    // 快捷徽章（0-3）
    let mut spans = Vec::new();
    for (idx, (filter, label)) in quick_filter_badges(stats).into_iter().enumerate() {
        let style = if filter == app.view.status_filter {
            Style::default()
                .fg(Color::Rgb(46, 52, 64))
                .bg(Color::Rgb(136, 192, 208))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Rgb(129, 161, 193))
        };
        spans.push(Span::styled(format!(" {} ", idx), Style::default().fg(Color::Rgb(76, 86, 106))));
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
}
