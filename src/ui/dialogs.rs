use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::layout::{centered_rect, render_backdrop};
use crate::models::TaskId;

/// 确认操作类型
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    DeleteTask(TaskId),
}

/// 选择框用途
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectPurpose {
    StatusFilter,
    PriorityFilter,
}

/// 对话框类型
#[derive(Debug, Clone)]
pub enum DialogType {
    /// 选择对话框（用于选择过滤条件）
    Select {
        title: String,
        items: Vec<String>,
        selected: usize,
        filter: String,
        purpose: SelectPurpose,
    },
    /// 确认对话框
    Confirm {
        title: String,
        message: String,
        yes_selected: bool,
        action: ConfirmAction,
    },
}

impl DialogType {
    /// 按过滤词筛选选项，返回 (原始索引, 选项)
    pub fn filtered_items<'a>(items: &'a [String], filter: &str) -> Vec<(usize, &'a String)> {
        let filter = filter.to_lowercase();
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| filter.is_empty() || item.to_lowercase().contains(&filter))
            .collect()
    }
}

/// 渲染居中的对话框
pub fn render_dialog(f: &mut Frame, dialog: &DialogType) {
    // 渲染半透明背景遮罩
    render_backdrop(f, f.area());

    let area = match dialog {
        DialogType::Select { .. } => centered_rect(50, 50, f.area()),
        DialogType::Confirm { .. } => centered_rect(50, 30, f.area()),
    };

    // 清空对话框区域
    f.render_widget(Clear, area);

    match dialog {
        DialogType::Select {
            title,
            items,
            selected,
            filter,
            ..
        } => render_select_dialog(f, area, title, items, *selected, filter),
        DialogType::Confirm {
            title,
            message,
            yes_selected,
            ..
        } => render_confirm_dialog(f, area, title, message, *yes_selected),
    }
}

/// 渲染选择对话框
fn render_select_dialog(
    f: &mut Frame,
    area: Rect,
    title: &str,
    items: &[String],
    selected: usize,
    filter: &str,
) {
    let block = Block::default()
        .title(format!("  {}  ", title))
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(76, 86, 106))) // Nord border color
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(46, 52, 64))); // Nord background

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 搜索框
            Constraint::Min(0),    // 列表
            Constraint::Length(1), // 帮助
        ])
        .split(inner);

    // 渲染搜索框
    let (search_text, search_style) = if filter.is_empty() {
        (
            "Type to filter...".to_string(),
            Style::default().fg(Color::Rgb(129, 161, 193)),
        )
    } else {
        (
            filter.to_string(),
            Style::default().fg(Color::Rgb(136, 192, 208)),
        )
    };

    let search_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(136, 192, 208)))
        .border_type(ratatui::widgets::BorderType::Rounded);

    let search_inner = search_block.inner(chunks[0]);
    f.render_widget(search_block, chunks[0]);
    f.render_widget(Paragraph::new(search_text).style(search_style), search_inner);

    let filtered_items = DialogType::filtered_items(items, filter);

    let list_items: Vec<ListItem> = filtered_items
        .iter()
        .enumerate()
        .map(|(filtered_idx, (_, item))| {
            if filtered_idx == selected {
                // 选中项：蓝色序号 + 勾
                ListItem::new(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{}", filtered_idx + 1),
                        Style::default()
                            .fg(Color::White)
                            .bg(Color::Rgb(94, 129, 172))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        item.as_str(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled("✓", Style::default().fg(Color::Rgb(163, 190, 140))),
                ]))
                .style(Style::default().bg(Color::Rgb(59, 66, 82)))
            } else {
                ListItem::new(Line::from(format!("     {}", item)))
            }
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    f.render_stateful_widget(List::new(list_items), chunks[1], &mut list_state);

    let help_text = format!(
        "↑↓ navigate  Enter select  Esc cancel  [{}/{}]",
        filtered_items.len(),
        items.len()
    );
    let help_paragraph = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Rgb(129, 161, 193))) // Nord frost color
        .alignment(Alignment::Center);
    f.render_widget(help_paragraph, chunks[2]);
}

/// 渲染确认对话框
fn render_confirm_dialog(f: &mut Frame, area: Rect, title: &str, message: &str, yes_selected: bool) {
    let block = Block::default()
        .title(format!("  {}  ", title))
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(235, 203, 139))) // Nord yellow for warnings
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(46, 52, 64)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // 消息
            Constraint::Length(3), // 按钮
        ])
        .split(inner);

    let message_text = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Rgb(216, 222, 233))); // Nord snow storm
    f.render_widget(message_text, chunks[0]);

    let button_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(chunks[1]);

    // 取消按钮 (n) 在左，删除按钮 (y) 在右
    let no_style = if !yes_selected {
        Style::default()
            .bg(Color::Rgb(76, 86, 106))
            .fg(Color::Rgb(236, 239, 244))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Rgb(216, 222, 233))
            .add_modifier(Modifier::DIM)
    };
    let no_button = Paragraph::new("[ n ] Cancel")
        .style(no_style)
        .alignment(Alignment::Center);
    f.render_widget(no_button, button_chunks[1]);

    let yes_style = if yes_selected {
        Style::default()
            .bg(Color::Rgb(191, 97, 106)) // Nord 柔和红色
            .fg(Color::Rgb(46, 52, 64))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Rgb(191, 97, 106))
            .add_modifier(Modifier::DIM)
    };
    let yes_button = Paragraph::new("[ y ] Delete")
        .style(yes_style)
        .alignment(Alignment::Center);
    f.render_widget(yes_button, button_chunks[2]);
}
