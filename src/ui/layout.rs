use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Block,
    Frame,
};

/// 卡片最小宽度（决定每行几列）
pub const CARD_MIN_WIDTH: u16 = 36;
/// 卡片高度（含边框）
pub const CARD_HEIGHT: u16 = 10;

/// 根据可用宽度计算卡片列数（1 ~ 3 列）
pub fn card_columns(width: u16) -> usize {
    ((width / CARD_MIN_WIDTH) as usize).clamp(1, 3)
}

/// 让选中行可见时的第一行
pub fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    (selected_row + 1).saturating_sub(visible_rows.max(1))
}

/// 渲染半透明背景遮罩
pub fn render_backdrop(f: &mut Frame, area: Rect) {
    let block = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    f.render_widget(block, area);
}

/// 创建一个居中的矩形区域
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_columns() {
        assert_eq!(card_columns(20), 1);
        assert_eq!(card_columns(80), 2);
        assert_eq!(card_columns(120), 3);
        assert_eq!(card_columns(400), 3);
    }

    #[test]
    fn test_first_visible_row_follows_selection() {
        assert_eq!(first_visible_row(0, 2), 0);
        assert_eq!(first_visible_row(1, 2), 0);
        assert_eq!(first_visible_row(3, 2), 2);
        assert_eq!(first_visible_row(3, 0), 3);
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert!(popup.x >= 20 && popup.y >= 12);
    }
}
