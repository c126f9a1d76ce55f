use crate::app::App;
use crate::ui::layout::{card_columns, first_visible_row, CARD_HEIGHT};
use crate::ui::task_card::{self, CardOptions};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// 空状态提示（有过滤时和无过滤时不同）
pub fn empty_state_hint(has_active_filters: bool) -> &'static str {
    if has_active_filters {
        "Try adjusting your filters to see more tasks."
    } else {
        "Create your first task to get started!"
    }
}

/// 渲染任务卡片网格
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let tasks = app.visible_tasks();

    let block = Block::default()
        .title(format!(" Tasks ({}) ", tasks.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(76, 86, 106)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if tasks.is_empty() {
        render_empty(f, inner, app.view.has_active_filters());
        return;
    }

    let columns = card_columns(inner.width);
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let selected = app.view.selected.min(tasks.len() - 1);
    let first_row = first_visible_row(selected / columns, visible_rows);

    let opts = CardOptions {
        selected: false,
        decorative_motion: app.config.decorative_motion,
        tick: app.tick,
        today: app.today(),
    };

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(inner);

    for (row_idx, row_area) in row_areas.iter().enumerate() {
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (col_idx, card_area) in col_areas.iter().enumerate() {
            let idx = (first_row + row_idx) * columns + col_idx;
            let Some(task) = tasks.get(idx) else {
                return;
            };
            let opts = CardOptions {
                selected: idx == selected,
                ..opts
            };
            task_card::render(f, *card_area, task, opts);
        }
    }
}

fn render_empty(f: &mut Frame, area: Rect, has_active_filters: bool) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::styled(
            "No tasks found",
            Style::default()
                .fg(Color::Rgb(216, 222, 233))
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(
            empty_state_hint(has_active_filters),
            Style::default().fg(Color::Rgb(129, 161, 193)),
        ),
        Line::from(""),
        Line::styled(
            "Press a to add a task",
            Style::default().fg(Color::Rgb(76, 86, 106)),
        ),
    ];

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
