use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::{CursorMove, TextArea};

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    Frame,
};

/// 基于 tui-textarea 的输入框（表单字段、搜索框）
pub struct TextField {
    /// 底层 TextArea 组件
    textarea: TextArea<'static>,
    /// 是否允许换行
    multiline: bool,
    placeholder: String,
    focused: bool,
}

impl TextField {
    /// 单行输入框
    pub fn single_line(initial_value: &str, placeholder: &str) -> Self {
        Self::build(initial_value, placeholder, false)
    }

    /// 多行输入框（任务描述）
    pub fn multi_line(initial_value: &str, placeholder: &str) -> Self {
        Self::build(initial_value, placeholder, true)
    }

    fn build(initial_value: &str, placeholder: &str, multiline: bool) -> Self {
        let mut field = Self {
            textarea: TextArea::default(),
            multiline,
            placeholder: placeholder.to_string(),
            focused: false,
        };
        field.set_text(initial_value);
        field
    }

    /// 获取内容
    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(|line| line.is_empty())
    }

    /// 替换全部内容，光标移到末尾
    pub fn set_text(&mut self, text: &str) {
        // split 而不是 lines：保留末尾换行，text() 能原样取回
        let lines: Vec<String> = if self.multiline {
            text.split('\n').map(|s| s.to_string()).collect()
        } else {
            vec![text.replace('\n', " ")]
        };

        self.textarea = TextArea::new(lines);
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
        self.apply_style();
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.apply_style();
    }

    /// Nord 配色，未聚焦时隐藏光标
    fn apply_style(&mut self) {
        self.textarea.set_style(
            Style::default()
                .fg(Color::Rgb(236, 239, 244))
                .bg(Color::Rgb(46, 52, 64)),
        );
        self.textarea.set_placeholder_text(self.placeholder.clone());
        self.textarea
            .set_placeholder_style(Style::default().fg(Color::Rgb(129, 161, 193)));
        self.textarea.set_cursor_line_style(Style::default());

        let cursor_style = if self.focused {
            Style::default()
                .bg(Color::Rgb(136, 192, 208))
                .fg(Color::Rgb(46, 52, 64))
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(cursor_style);
    }

    /// 处理按键，返回 false 表示按键未被消费（交给外层处理）
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('u') => {
                    self.textarea.delete_line_by_head();
                    true
                }
                KeyCode::Char('w') => {
                    self.textarea.delete_word();
                    true
                }
                KeyCode::Char('a') => {
                    self.textarea.move_cursor(CursorMove::Head);
                    true
                }
                KeyCode::Char('e') => {
                    self.textarea.move_cursor(CursorMove::End);
                    true
                }
                _ => false,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                self.textarea.insert_char(c);
                true
            }
            KeyCode::Enter if self.multiline => {
                self.textarea.insert_newline();
                true
            }
            KeyCode::Backspace => {
                self.textarea.delete_char();
                true
            }
            KeyCode::Delete => {
                self.textarea.delete_next_char();
                true
            }
            KeyCode::Left => {
                self.textarea.move_cursor(CursorMove::Back);
                true
            }
            KeyCode::Right => {
                self.textarea.move_cursor(CursorMove::Forward);
                true
            }
            KeyCode::Up if self.multiline => {
                self.textarea.move_cursor(CursorMove::Up);
                true
            }
            KeyCode::Down if self.multiline => {
                self.textarea.move_cursor(CursorMove::Down);
                true
            }
            KeyCode::Home => {
                self.textarea.move_cursor(CursorMove::Head);
                true
            }
            KeyCode::End => {
                self.textarea.move_cursor(CursorMove::End);
                true
            }
            _ => false,
        }
    }

    /// 渲染输入区域
    pub fn render(&self, f: &mut Frame, area: Rect) {
        f.render_widget(&self.textarea, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::single_line("", "title");
        assert!(field.is_empty());

        type_str(&mut field, "helo");
        field.handle_key(key(KeyCode::Backspace));
        type_str(&mut field, "lo");
        assert_eq!(field.text(), "hello");
    }

    #[test]
    fn test_single_line_does_not_consume_enter() {
        let mut field = TextField::single_line("abc", "");
        assert!(!field.handle_key(key(KeyCode::Enter)));
        assert_eq!(field.text(), "abc");
    }

    #[test]
    fn test_multi_line_keeps_newlines() {
        let mut field = TextField::multi_line("first", "");
        assert!(field.handle_key(key(KeyCode::Enter)));
        type_str(&mut field, "second");
        assert_eq!(field.text(), "first\nsecond");

        field.set_text("a\nb");
        assert_eq!(field.text(), "a\nb");
    }

    #[test]
    fn test_set_text_round_trips_trailing_newline() {
        let mut field = TextField::multi_line("", "");
        for text in ["line\n", "\nleading", "a\n\nb", ""] {
            field.set_text(text);
            assert_eq!(field.text(), text);
        }
    }

    #[test]
    fn test_set_text_puts_cursor_at_end() {
        let mut field = TextField::single_line("", "");
        field.set_text("abc");
        type_str(&mut field, "d");
        assert_eq!(field.text(), "abcd");

        field.clear();
        assert!(field.is_empty());
    }
}
