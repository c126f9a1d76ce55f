use crate::store::TaskStats;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// 统计卡片：(标题, 数值, 颜色)
fn stat_cards(stats: &TaskStats) -> [(&'static str, usize, Color); 4] {
    [
        ("Total Tasks", stats.total, Color::Rgb(136, 192, 208)),
        ("Completed", stats.completed, Color::Rgb(163, 190, 140)),
        ("In Progress", stats.in_progress, Color::Rgb(208, 135, 112)),
        ("To Do", stats.todo, Color::Rgb(129, 161, 193)),
    ]
}

pub fn completion_line(stats: &TaskStats) -> String {
    format!("{}% completion rate", stats.completion_rate)
}

/// 渲染统计概览（四张卡片一行）
pub fn render(f: &mut Frame, area: Rect, stats: &TaskStats) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (idx, (title, value, color)) in stat_cards(stats).into_iter().enumerate() {
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(76, 86, 106)));

        let mut lines = vec![Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];
        // 只有总数卡片显示完成率
        if idx == 0 {
            lines.push(Line::from(Span::styled(
                completion_line(stats),
                Style::default().fg(Color::Rgb(163, 190, 140)),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, columns[idx]);
    }
}
