use crate::app::{App, Mode};
use crate::form::TaskForm;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// 渲染状态栏（Helix 风格）
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let (mode_name, mode_color) = match app.mode {
        Mode::Normal => ("NORMAL", Color::Green),
        Mode::Search => ("SEARCH", Color::Cyan),
        Mode::Command => ("COMMAND", Color::Yellow),
        Mode::Form => ("FORM", Color::Blue),
        Mode::Dialog => ("DIALOG", Color::Magenta),
        Mode::Help => ("HELP", Color::Blue),
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", mode_name),
        Style::default()
            .fg(Color::Black)
            .bg(mode_color)
            .add_modifier(Modifier::BOLD),
    )];

    // 显示键序列
    if !app.key_buffer.is_empty() {
        spans.push(Span::raw(format!(
            " [{}]",
            app.key_buffer.iter().collect::<String>()
        )));
    }

    if app.mode == Mode::Command {
        spans.push(Span::raw(format!(" :{}", app.command_input)));
        // 补全提示
        let hints: Vec<&str> = app
            .command_registry
            .find_matches(&app.command_input)
            .iter()
            .take(4)
            .map(|cmd| cmd.name)
            .collect();
        spans.push(Span::styled(
            format!("   {}", hints.join(" ")),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::raw(format!(" {}", task_count_label(app))));

        let summary = app.view.summary();
        if !summary.is_empty() {
            spans.push(Span::styled(
                format!(" | {}", summary),
                Style::default().fg(Color::Cyan),
            ));
        }
        if app.config.decorative_motion {
            spans.push(Span::styled(" | motion", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            " | ? help",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    f.render_widget(paragraph, area);
}

/// 任务计数；编辑表单打开时带上任务编号
fn task_count_label(app: &App) -> String {
    if app.store.is_empty() {
        return "no tasks".to_string();
    }

    let count = format!("{} of {} tasks", app.visible_tasks().len(), app.store.len());
    match app.form.as_ref().and_then(TaskForm::editing) {
        Some(id) => format!("editing #{} | {}", id, count),
        None => count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::TaskStore;

    #[test]
    fn test_task_count_label() {
        let mut app = App::new(Config::default());
        assert_eq!(task_count_label(&app), "3 of 3 tasks");

        app.open_edit_form();
        assert_eq!(task_count_label(&app), "editing #1 | 3 of 3 tasks");

        app.close_form();
        app.open_new_task_form();
        assert_eq!(task_count_label(&app), "3 of 3 tasks");

        let empty = App::with_store(Config::default(), TaskStore::new());
        assert_eq!(task_count_label(&empty), "no tasks");
    }
}
