use crate::models::{Priority, Status, Task};
use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// 卡片上最多显示的协作者头像数
const MAX_AVATARS: usize = 3;
/// 卡片日期显示格式（Jul 8, 2024）
const CARD_DATE_FORMAT: &str = "%b %-d, %Y";

/// 卡片渲染选项
#[derive(Debug, Clone, Copy)]
pub struct CardOptions {
    pub selected: bool,
    /// 逾期卡片是否闪烁
    pub decorative_motion: bool,
    pub tick: u64,
    pub today: NaiveDate,
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Rgb(191, 97, 106),   // Nord red
        Priority::Medium => Color::Rgb(235, 203, 139), // Nord yellow
        Priority::Low => Color::Rgb(163, 190, 140),    // Nord green
    }
}

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Rgb(129, 161, 193),       // Nord frost
        Status::InProgress => Color::Rgb(208, 135, 112), // Nord orange
        Status::Completed => Color::Rgb(163, 190, 140),
    }
}

/// 协作者头像：邮箱首字母大写
pub fn initial(email: &str) -> String {
    email
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// 最多三个首字母，超出部分显示 "+N"
pub fn collaborator_badges(shared_with: &[String]) -> (Vec<String>, Option<String>) {
    let initials = shared_with
        .iter()
        .take(MAX_AVATARS)
        .map(|email| initial(email))
        .collect();
    let extra = (shared_with.len() > MAX_AVATARS)
        .then(|| format!("+{}", shared_with.len() - MAX_AVATARS));
    (initials, extra)
}

pub fn format_due(due_date: Option<NaiveDate>) -> String {
    match due_date {
        Some(date) => format!("Due: {}", date.format(CARD_DATE_FORMAT)),
        None => "No due date".to_string(),
    }
}

pub fn format_created(created_at: NaiveDate) -> String {
    format!("Created {}", created_at.format(CARD_DATE_FORMAT))
}

/// 闪烁相位：每 5 帧（约 0.5 秒）切换一次
fn pulse_on(tick: u64) -> bool {
    (tick / 5) % 2 == 0
}

fn badge(text: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", text),
        Style::default()
            .fg(Color::Rgb(46, 52, 64))
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )
}

/// 渲染单张任务卡片
pub fn render(f: &mut Frame, area: Rect, task: &Task, opts: CardOptions) {
    let overdue = task.is_overdue(opts.today);
    let muted = Style::default().fg(Color::Rgb(129, 161, 193));

    // 边框：选中 > 逾期 > 默认
    let border_color = if opts.selected {
        Color::Rgb(136, 192, 208)
    } else if overdue {
        if opts.decorative_motion && !pulse_on(opts.tick) {
            Color::Rgb(94, 46, 52)
        } else {
            Color::Rgb(191, 97, 106)
        }
    } else {
        Color::Rgb(76, 86, 106)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(if opts.selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(Style::default().fg(border_color));
    if opts.selected {
        block = block.style(Style::default().bg(Color::Rgb(59, 66, 82)));
    }

    let title_style = if task.status == Status::Completed {
        Style::default()
            .fg(Color::Rgb(216, 222, 233))
            .add_modifier(Modifier::BOLD | Modifier::CROSSED_OUT)
    } else {
        Style::default()
            .fg(Color::Rgb(236, 239, 244))
            .add_modifier(Modifier::BOLD)
    };

    let mut badges = vec![
        badge(task.priority.label(), priority_color(task.priority)),
        Span::raw(" "),
        badge(task.status.label(), status_color(task.status)),
    ];
    if overdue {
        let overdue_color = if opts.decorative_motion && !pulse_on(opts.tick) {
            Color::Rgb(208, 135, 112)
        } else {
            Color::Rgb(191, 97, 106)
        };
        badges.push(Span::raw(" "));
        badges.push(badge("Overdue", overdue_color));
    }

    let due_style = if overdue {
        Style::default().fg(Color::Rgb(191, 97, 106))
    } else {
        muted
    };

    let mut lines = vec![
        Line::from(Span::styled(task.title.clone(), title_style)),
        Line::from(Span::styled(
            task.description.clone(),
            Style::default().fg(Color::Rgb(216, 222, 233)),
        )),
        Line::from(""),
        Line::from(badges),
        Line::from(Span::styled(format_due(task.due_date), due_style)),
    ];

    let (initials, extra) = collaborator_badges(&task.shared_with);
    if !initials.is_empty() {
        let mut spans = vec![Span::styled("Shared with: ", muted)];
        for initial in initials {
            spans.push(Span::styled(
                format!("({})", initial),
                Style::default().fg(Color::Rgb(180, 142, 173)),
            ));
            spans.push(Span::raw(" "));
        }
        if let Some(extra) = extra {
            spans.push(Span::styled(extra, muted));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        format_created(task.created_at),
        Style::default()
            .fg(Color::Rgb(76, 86, 106))
            .add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
