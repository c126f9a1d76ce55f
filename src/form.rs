//! 任务表单：创建 / 编辑会话中的临时字段状态
use crate::models::{Priority, Status, Task, TaskDraft, TaskId};
use crate::ui::text_input::TextField;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 截止日期输入格式
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// 表单字段（Tab 顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    Status,
    DueDate,
    ShareEmail,
    Collaborators,
}

impl FormField {
    const ORDER: [FormField; 7] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::Status,
        FormField::DueDate,
        FormField::ShareEmail,
        FormField::Collaborators,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// 表单校验错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("task title is required")]
    EmptyTitle,
}

/// 提交结果：交给存储的创建或更新操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Create(TaskDraft),
    Update(TaskId, TaskDraft),
}

/// 表单按键处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// 继续编辑
    Continue,
    /// 提交表单
    Submit,
    /// 关闭表单
    Cancel,
}

pub struct TaskForm {
    /// 正在编辑的任务（None = 新建）
    editing: Option<TaskId>,
    pub title: TextField,
    pub description: TextField,
    pub priority: Priority,
    pub status: Status,
    pub due_date: TextField,
    /// 待添加的协作者邮箱
    pub share_email: TextField,
    shared_with: Vec<String>,
    focus: FormField,
    /// 协作者列表中选中的索引（用于移除）
    selected_collaborator: usize,
}

impl TaskForm {
    /// 新建任务表单
    pub fn new_task() -> Self {
        let mut form = Self {
            editing: None,
            title: TextField::single_line("", "Enter task title..."),
            description: TextField::multi_line("", "Enter task description..."),
            priority: Priority::Medium,
            status: Status::Todo,
            due_date: TextField::single_line("", "YYYY-MM-DD"),
            share_email: TextField::single_line("", "Enter email address..."),
            shared_with: Vec::new(),
            focus: FormField::Title,
            selected_collaborator: 0,
        };
        form.sync_focus();
        form
    }

    /// 编辑已有任务，字段预填
    pub fn edit(task: &Task) -> Self {
        let draft = task.to_draft();
        let mut form = Self::new_task();
        form.editing = Some(task.id);
        form.title.set_text(&draft.title);
        form.description.set_text(&draft.description);
        form.priority = draft.priority;
        form.status = draft.status;
        if let Some(due) = draft.due_date {
            form.due_date
                .set_text(&due.format(DATE_INPUT_FORMAT).to_string());
        }
        form.shared_with = draft.shared_with;
        form.sync_focus();
        form
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// 对话框标题
    pub fn heading(&self) -> &'static str {
        if self.is_edit() { "Edit Task" } else { "Create New Task" }
    }

    /// 提交按钮文字
    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() { "Update Task" } else { "Create Task" }
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn shared_with(&self) -> &[String] {
        &self.shared_with
    }

    pub fn selected_collaborator(&self) -> usize {
        self.selected_collaborator
    }

    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
        self.sync_focus();
    }

    /// 下一个字段（没有协作者时跳过列表）
    pub fn next_field(&mut self) {
        let mut idx = self.focus.index();
        loop {
            idx = (idx + 1) % FormField::ORDER.len();
            if self.is_focusable(FormField::ORDER[idx]) {
                break;
            }
        }
        self.set_focus(FormField::ORDER[idx]);
    }

    pub fn prev_field(&mut self) {
        let len = FormField::ORDER.len();
        let mut idx = self.focus.index();
        loop {
            idx = (idx + len - 1) % len;
            if self.is_focusable(FormField::ORDER[idx]) {
                break;
            }
        }
        self.set_focus(FormField::ORDER[idx]);
    }

    fn is_focusable(&self, field: FormField) -> bool {
        field != FormField::Collaborators || !self.shared_with.is_empty()
    }

    fn sync_focus(&mut self) {
        let focus = self.focus;
        self.title.set_focused(focus == FormField::Title);
        self.description.set_focused(focus == FormField::Description);
        self.due_date.set_focused(focus == FormField::DueDate);
        self.share_email.set_focused(focus == FormField::ShareEmail);
    }

    /// 添加协作者：去掉首尾空白后非空且不重复（大小写敏感）才追加
    pub fn add_collaborator(&mut self) -> bool {
        let email = self.share_email.text().trim().to_string();
        if email.is_empty() || self.shared_with.contains(&email) {
            return false;
        }

        self.shared_with.push(email);
        self.share_email.clear();
        true
    }

    /// 按精确匹配移除协作者
    pub fn remove_collaborator(&mut self, email: &str) {
        self.shared_with.retain(|e| e != email);
        self.clamp_collaborator_selection();
    }

    fn remove_selected_collaborator(&mut self) {
        if let Some(email) = self.shared_with.get(self.selected_collaborator).cloned() {
            self.remove_collaborator(&email);
        }
    }

    fn clamp_collaborator_selection(&mut self) {
        if self.shared_with.is_empty() {
            self.selected_collaborator = 0;
            if self.focus == FormField::Collaborators {
                self.set_focus(FormField::ShareEmail);
            }
        } else {
            self.selected_collaborator = self.selected_collaborator.min(self.shared_with.len() - 1);
        }
    }

    /// 解析截止日期；空值表示没有截止日期
    pub fn parsed_due_date(&self) -> Option<NaiveDate> {
        if self.due_date.is_empty() {
            return None;
        }
        let text = self.due_date.text();
        NaiveDate::parse_from_str(text.trim(), DATE_INPUT_FORMAT).ok()
    }

    /// 无法解析的截止日期文本（新建时不设截止日期，编辑时保留原值）
    pub fn invalid_due_date(&self) -> Option<String> {
        let text = self.due_date.text().trim().to_string();
        if text.is_empty() || self.parsed_due_date().is_some() {
            None
        } else {
            Some(text)
        }
    }

    /// 当前字段组成的草稿（不做校验）
    pub fn draft(&self) -> TaskDraft {
        let draft = TaskDraft::new(self.title.text())
            .with_description(self.description.text())
            .with_priority(self.priority)
            .with_status(self.status)
            .with_shared_with(self.shared_with.iter().cloned());

        match self.parsed_due_date() {
            Some(due) => draft.with_due_date(due),
            None => draft,
        }
    }

    /// 提交：唯一的校验规则是标题去空白后非空
    pub fn submit(&self) -> Result<FormSubmission, FormError> {
        if self.title.text().trim().is_empty() {
            return Err(FormError::EmptyTitle);
        }

        let draft = self.draft();
        Ok(match self.editing {
            Some(id) => FormSubmission::Update(id, draft),
            None => FormSubmission::Create(draft),
        })
    }

    /// 处理按键
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        // Ctrl+S 在任何字段都提交
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return FormAction::Submit;
        }

        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Tab => {
                self.next_field();
                return FormAction::Continue;
            }
            KeyCode::BackTab => {
                self.prev_field();
                return FormAction::Continue;
            }
            _ => {}
        }

        match self.focus {
            FormField::Title => {
                if key.code == KeyCode::Enter {
                    return FormAction::Submit;
                }
                self.title.handle_key(key);
            }
            FormField::Description => {
                self.description.handle_key(key);
            }
            FormField::DueDate => {
                if key.code == KeyCode::Enter {
                    return FormAction::Submit;
                }
                self.due_date.handle_key(key);
            }
            FormField::ShareEmail => {
                // Enter 添加协作者而不是提交
                if key.code == KeyCode::Enter {
                    self.add_collaborator();
                } else {
                    self.share_email.handle_key(key);
                }
            }
            FormField::Priority => match key.code {
                KeyCode::Left | KeyCode::Char('h') => self.priority = self.priority.prev(),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                    self.priority = self.priority.next()
                }
                KeyCode::Enter => return FormAction::Submit,
                _ => {}
            },
            FormField::Status => match key.code {
                KeyCode::Left | KeyCode::Char('h') => self.status = self.status.prev(),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                    self.status = self.status.next()
                }
                KeyCode::Enter => return FormAction::Submit,
                _ => {}
            },
            FormField::Collaborators => match key.code {
                KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => {
                    self.selected_collaborator = self.selected_collaborator.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
                    self.selected_collaborator = (self.selected_collaborator + 1)
                        .min(self.shared_with.len().saturating_sub(1));
                }
                KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => {
                    self.remove_selected_collaborator();
                }
                _ => {}
            },
        }

        FormAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut TaskForm, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let mut form = TaskForm::new_task();
        assert_eq!(form.submit(), Err(FormError::EmptyTitle));

        form.title.set_text("   ");
        assert_eq!(form.submit(), Err(FormError::EmptyTitle));
    }

    #[test]
    fn test_new_task_defaults_and_create_submission() {
        let mut form = TaskForm::new_task();
        assert_eq!(form.heading(), "Create New Task");
        assert_eq!(form.priority, Priority::Medium);
        assert_eq!(form.status, Status::Todo);

        type_str(&mut form, "Ship it");
        match form.submit() {
            Ok(FormSubmission::Create(draft)) => {
                assert_eq!(draft.title, "Ship it");
                assert_eq!(draft.due_date, None);
                assert!(draft.shared_with.is_empty());
            }
            other => panic!("unexpected submission: {other:?}"),
        }
    }

    #[test]
    fn test_edit_prefills_and_submits_update() {
        let store = TaskStore::with_seed_tasks();
        let task = &store.tasks()[0];
        let form = TaskForm::edit(task);

        assert_eq!(form.heading(), "Edit Task");
        assert_eq!(form.submit_label(), "Update Task");
        assert_eq!(form.title.text(), task.title);
        assert_eq!(form.due_date.text(), "2024-07-08");
        assert_eq!(form.shared_with(), task.shared_with.as_slice());

        match form.submit() {
            Ok(FormSubmission::Update(id, draft)) => {
                assert_eq!(id, task.id);
                assert_eq!(draft, task.to_draft());
            }
            other => panic!("unexpected submission: {other:?}"),
        }
    }

    #[test]
    fn test_unchanged_edit_keeps_trailing_newline() {
        let mut store = TaskStore::new();
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let task = store
            .create_task_on(TaskDraft::new("Notes").with_description("line\n"), today)
            .clone();

        match TaskForm::edit(&task).submit() {
            Ok(FormSubmission::Update(_, draft)) => {
                assert_eq!(draft.description, "line\n");
                assert_eq!(draft, task.to_draft());
            }
            other => panic!("unexpected submission: {other:?}"),
        }
    }

    #[test]
    fn test_add_same_collaborator_twice_keeps_one() {
        let mut form = TaskForm::new_task();
        form.share_email.set_text("ann@example.com");
        assert!(form.add_collaborator());
        assert!(form.share_email.is_empty());

        form.share_email.set_text("  ann@example.com ");
        assert!(!form.add_collaborator());
        assert_eq!(form.shared_with(), ["ann@example.com".to_string()]);

        // 大小写敏感
        form.share_email.set_text("Ann@example.com");
        assert!(form.add_collaborator());
        assert_eq!(form.shared_with().len(), 2);
    }

    #[test]
    fn test_blank_collaborator_is_ignored() {
        let mut form = TaskForm::new_task();
        form.share_email.set_text("   ");
        assert!(!form.add_collaborator());
        assert!(form.shared_with().is_empty());
    }

    #[test]
    fn test_remove_collaborator_by_exact_match() {
        let mut form = TaskForm::new_task();
        for email in ["a@x.io", "b@x.io"] {
            form.share_email.set_text(email);
            form.add_collaborator();
        }

        form.remove_collaborator("A@x.io");
        assert_eq!(form.shared_with().len(), 2);
        form.remove_collaborator("a@x.io");
        assert_eq!(form.shared_with(), ["b@x.io".to_string()]);
    }

    #[test]
    fn test_enter_on_share_email_adds_instead_of_submitting() {
        let mut form = TaskForm::new_task();
        form.set_focus(FormField::ShareEmail);
        type_str(&mut form, "dev@example.com");

        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Continue);
        assert_eq!(form.shared_with(), ["dev@example.com".to_string()]);
    }

    #[test]
    fn test_collaborator_list_removal_via_keys() {
        let mut form = TaskForm::new_task();
        for email in ["a@x.io", "b@x.io"] {
            form.share_email.set_text(email);
            form.add_collaborator();
        }

        form.set_focus(FormField::Collaborators);
        form.handle_key(key(KeyCode::Down));
        form.handle_key(key(KeyCode::Char('d')));
        assert_eq!(form.shared_with(), ["a@x.io".to_string()]);

        form.handle_key(key(KeyCode::Char('d')));
        assert!(form.shared_with().is_empty());
        assert_eq!(form.focus(), FormField::ShareEmail);
    }

    #[test]
    fn test_tab_order_skips_empty_collaborator_list() {
        let mut form = TaskForm::new_task();
        form.set_focus(FormField::ShareEmail);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), FormField::Title);

        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus(), FormField::ShareEmail);
    }

    #[test]
    fn test_priority_and_status_cycle_with_arrows() {
        let mut form = TaskForm::new_task();
        form.set_focus(FormField::Priority);
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.priority, Priority::High);

        form.set_focus(FormField::Status);
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.status, Status::Completed);
    }

    #[test]
    fn test_due_date_parsing() {
        let mut form = TaskForm::new_task();
        form.title.set_text("x");

        form.due_date.set_text("2024-12-24");
        assert_eq!(form.parsed_due_date(), NaiveDate::from_ymd_opt(2024, 12, 24));
        assert_eq!(form.invalid_due_date(), None);

        form.due_date.set_text("next week");
        assert_eq!(form.parsed_due_date(), None);
        assert_eq!(form.invalid_due_date(), Some("next week".to_string()));
        assert!(form.submit().is_ok());
    }

    #[test]
    fn test_escape_and_ctrl_s() {
        let mut form = TaskForm::new_task();
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Cancel);
        assert_eq!(
            form.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            FormAction::Submit
        );
    }
}
