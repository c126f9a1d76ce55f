pub mod dialogs;
mod filter_bar;
mod form;
mod help;
pub mod layout;
mod stats;
mod statusbar;
pub mod task_card;
mod task_list;
pub mod text_input;
mod welcome;

use crate::app::{App, Mode, Notification, NotificationLevel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// 主渲染函数
pub fn render(f: &mut Frame, app: &App) {
    let stats = app.store.statistics();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // 标题
            Constraint::Length(4), // 统计卡片
            Constraint::Length(4), // 搜索与过滤
            Constraint::Min(0),    // 任务网格
            Constraint::Length(1), // 状态栏
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    stats::render(f, chunks[1], &stats);
    filter_bar::render(f, chunks[2], app, &stats);
    task_list::render(f, chunks[3], app);
    statusbar::render(f, chunks[4], app);

    // 渲染表单（如果有）
    if let Some(task_form) = &app.form {
        form::render(f, task_form);
    }

    // 渲染对话框（如果有）
    if let Some(dialog) = &app.dialog {
        dialogs::render_dialog(f, dialog);
    }

    // 渲染帮助面板（如果处于帮助模式）
    if app.mode == Mode::Help {
        help::render(f, f.area(), &app.command_registry);
    }

    // 渲染欢迎对话框（如果是首次运行）
    if app.show_welcome_dialog {
        welcome::render(f, f.area(), &app.config, app.config_path.as_deref());
    }

    // 渲染通知栏（如果有通知）
    if let Some(notification) = &app.notification {
        render_notification(f, f.area(), notification);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            " Task Dashboard",
            Style::default()
                .fg(Color::Rgb(136, 192, 208))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " Manage your tasks and collaborate with your team",
            Style::default().fg(Color::Rgb(129, 161, 193)),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// 渲染通知栏
fn render_notification(f: &mut Frame, area: Rect, notification: &Notification) {
    // 通知栏占据顶部 3 行
    let notification_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height.min(3),
    };

    // 根据级别选择颜色
    let (bg_color, fg_color, prefix) = match notification.level {
        NotificationLevel::Info => (Color::Blue, Color::White, "ℹ"),
        NotificationLevel::Success => (Color::Green, Color::White, "✓"),
        NotificationLevel::Warning => (Color::Yellow, Color::Black, "⚠"),
        NotificationLevel::Error => (Color::Red, Color::White, "✗"),
    };

    let content = Line::from(vec![
        Span::styled(
            format!(" {} ", prefix),
            Style::default()
                .fg(fg_color)
                .bg(bg_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(notification.message.as_str(), Style::default().fg(fg_color)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(bg_color))
        .style(Style::default().bg(bg_color));

    f.render_widget(Paragraph::new(content).block(block), notification_area);
}
