use crate::form::{FormField, TaskForm};
use crate::ui::layout::{centered_rect, render_backdrop};
use crate::ui::task_card::{priority_color, status_color};
use crate::ui::text_input::TextField;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Color::Rgb(136, 192, 208) // Nord cyan
    } else {
        Color::Rgb(76, 86, 106)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
}

fn render_text_field(f: &mut Frame, area: Rect, title: &str, field: &TextField, focused: bool) {
    let block = field_block(title, focused);
    let inner = block.inner(area);
    f.render_widget(block, area);
    field.render(f, inner);
}

/// ‹ 值 › 形式的选择器
fn render_choice(f: &mut Frame, area: Rect, title: &str, value: &str, color: Color, focused: bool) {
    let arrow = Style::default().fg(if focused {
        Color::Rgb(136, 192, 208)
    } else {
        Color::Rgb(76, 86, 106)
    });
    let line = Line::from(vec![
        Span::styled("‹ ", arrow),
        Span::styled(value.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(" ›", arrow),
    ]);
    f.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(field_block(title, focused)),
        area,
    );
}

/// 渲染任务表单对话框
pub fn render(f: &mut Frame, form: &TaskForm) {
    render_backdrop(f, f.area());

    let area = centered_rect(70, 85, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!("  {}  ", form.heading()))
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(76, 86, 106)))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(46, 52, 64))); // Nord background

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(4),    // 描述
            Constraint::Length(3), // 优先级 / 状态 / 截止日期
            Constraint::Length(3), // 协作者邮箱
            Constraint::Length(4), // 协作者列表
            Constraint::Length(1), // 按钮与提示
        ])
        .split(inner);

    let focus = form.focus();

    render_text_field(f, chunks[0], " Title * ", &form.title, focus == FormField::Title);
    render_text_field(
        f,
        chunks[1],
        " Description ",
        &form.description,
        focus == FormField::Description,
    );

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[2]);
    render_choice(
        f,
        row[0],
        " Priority ",
        form.priority.label(),
        priority_color(form.priority),
        focus == FormField::Priority,
    );
    render_choice(
        f,
        row[1],
        " Status ",
        form.status.label(),
        status_color(form.status),
        focus == FormField::Status,
    );
    render_text_field(f, row[2], " Due Date ", &form.due_date, focus == FormField::DueDate);

    render_text_field(
        f,
        chunks[3],
        " Share with (Enter to add) ",
        &form.share_email,
        focus == FormField::ShareEmail,
    );

    // 协作者列表
    let list_focused = focus == FormField::Collaborators;
    let collaborators: Vec<Span> = if form.shared_with().is_empty() {
        vec![Span::styled(
            "Not shared with anyone",
            Style::default().fg(Color::Rgb(76, 86, 106)),
        )]
    } else {
        form.shared_with()
            .iter()
            .enumerate()
            .flat_map(|(idx, email)| {
                let style = if list_focused && idx == form.selected_collaborator() {
                    Style::default()
                        .fg(Color::Rgb(46, 52, 64))
                        .bg(Color::Rgb(180, 142, 173))
                } else {
                    Style::default().fg(Color::Rgb(180, 142, 173))
                };
                [Span::styled(format!(" {} ✕ ", email), style), Span::raw(" ")]
            })
            .collect()
    };
    f.render_widget(
        Paragraph::new(Line::from(collaborators))
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(field_block(" Collaborators (d to remove) ", list_focused)),
        chunks[4],
    );

    let footer = Line::from(vec![
        Span::styled(
            format!(" Ctrl+S {} ", form.submit_label()),
            Style::default()
                .fg(Color::Rgb(46, 52, 64))
                .bg(Color::Rgb(163, 190, 140))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            " Esc Cancel ",
            Style::default()
                .fg(Color::Rgb(236, 239, 244))
                .bg(Color::Rgb(76, 86, 106)),
        ),
        Span::styled(
            "   Tab next field · ←/→ change",
            Style::default().fg(Color::Rgb(129, 161, 193)),
        ),
    ]);
    f.render_widget(Paragraph::new(footer), chunks[5]);
}
