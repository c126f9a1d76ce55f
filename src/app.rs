use crate::config::{on_off, Config};
use crate::form::{FormError, FormSubmission, TaskForm};
use crate::input::CommandRegistry;
use crate::models::{Task, TaskId};
use crate::state::ViewState;
use crate::store::TaskStore;
use crate::ui::dialogs::{ConfirmAction, DialogType};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Instant;

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// 通知消息
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
}

impl Notification {
    /// 检查通知是否已过期（3秒后自动消失）
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= 3
    }
}

/// 应用模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 正常模式 - 导航和查看
    Normal,
    /// 搜索模式 - 输入搜索词
    Search,
    /// 命令模式 - 输入 : 命令
    Command,
    /// 表单模式 - 创建 / 编辑任务
    Form,
    /// 对话框模式
    Dialog,
    /// 帮助模式 - 显示快捷键
    Help,
}

/// 应用状态
pub struct App {
    /// 任务存储（唯一的权威数据）
    pub store: TaskStore,
    /// 搜索 / 过滤 / 选中状态
    pub view: ViewState,
    /// 当前模式
    pub mode: Mode,
    /// 打开的任务表单
    pub form: Option<TaskForm>,
    /// 当前显示的对话框
    pub dialog: Option<DialogType>,
    /// 按键缓冲区（用于键序列匹配）
    pub key_buffer: Vec<char>,
    /// 命令输入缓冲
    pub command_input: String,
    /// 命令注册表
    pub command_registry: CommandRegistry,
    /// 应用配置
    pub config: Config,
    /// 配置文件路径（启动时解析一次）
    pub config_path: Option<PathBuf>,
    /// 是否显示首次运行欢迎对话框
    pub show_welcome_dialog: bool,
    /// 通知消息
    pub notification: Option<Notification>,
    /// 帧计数（动效使用）
    pub tick: u64,
}

impl App {
    /// 创建新的应用实例
    pub fn new(config: Config) -> Self {
        let store = if config.seed_demo_tasks {
            TaskStore::with_seed_tasks()
        } else {
            TaskStore::new()
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: TaskStore) -> Self {
        tracing::info!(tasks = store.len(), "dashboard started");

        Self {
            store,
            view: ViewState::default(),
            mode: Mode::Normal,
            form: None,
            dialog: None,
            key_buffer: Vec::new(),
            command_input: String::new(),
            command_registry: CommandRegistry::new(),
            config,
            config_path: crate::config::get_config_path().ok(),
            show_welcome_dialog: false,
            notification: None,
            tick: 0,
        }
    }

    /// 处理键盘输入，返回 false 表示退出
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> bool {
        use crate::input::handle_key_input;
        handle_key_input(self, key)
    }

    /// 每帧调用
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.clear_expired_notification();
    }

    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.view.visible_tasks(&self.store)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.view.selected_task(&self.store)
    }

    /// 打开新建任务表单
    pub fn open_new_task_form(&mut self) {
        self.form = Some(TaskForm::new_task());
        self.mode = Mode::Form;
    }

    /// 打开编辑表单（当前选中的任务）
    pub fn open_edit_form(&mut self) {
        let Some(task) = self.selected_task() else {
            self.show_notification("No task selected".to_string(), NotificationLevel::Info);
            return;
        };

        self.form = Some(TaskForm::edit(task));
        self.mode = Mode::Form;
    }

    /// 关闭表单，不修改任何任务
    pub fn close_form(&mut self) {
        self.form = None;
        self.mode = Mode::Normal;
    }

    /// 提交表单：标题为空时保持表单打开
    pub fn submit_form(&mut self) {
        let Some(form) = &self.form else {
            return;
        };

        let invalid_due_date = form.invalid_due_date();
        let submission = match form.submit() {
            Ok(submission) => submission,
            Err(FormError::EmptyTitle) => {
                self.show_notification(
                    "Task title is required".to_string(),
                    NotificationLevel::Warning,
                );
                return;
            }
        };

        let mut created = None;
        let mut kept_due_date = false;
        match submission {
            FormSubmission::Create(draft) => {
                let task = self.store.create_task(draft);
                created = Some(task.id);
                let message = format!("Created \"{}\"", task.title);
                self.show_notification(message, NotificationLevel::Success);
            }
            FormSubmission::Update(id, mut draft) => {
                if invalid_due_date.is_some() {
                    // 无法解析时保留原截止日期
                    draft.due_date = self.store.get(id).and_then(|task| task.due_date);
                    kept_due_date = true;
                }
                match self.store.update_task(id, draft) {
                    Ok(task) => {
                        let message = format!("Updated \"{}\"", task.title);
                        self.show_notification(message, NotificationLevel::Success);
                    }
                    Err(e) => {
                        self.show_notification(e.to_string(), NotificationLevel::Warning);
                        self.close_form();
                        self.view.clamp_selection(&self.store);
                        return;
                    }
                }
            }
        }

        if let Some(text) = invalid_due_date {
            tracing::warn!(due_date = %text, kept_due_date, "unparsable due date ignored");
            let outcome = if kept_due_date {
                "kept the previous date"
            } else {
                "no due date set"
            };
            self.show_notification(
                format!("Invalid due date \"{}\" (use YYYY-MM-DD), {}", text, outcome),
                NotificationLevel::Warning,
            );
        }

        self.close_form();
        self.view.clamp_selection(&self.store);

        // 新任务在当前过滤下可见时选中它，否则选中项不变
        if let Some(id) = created {
            if let Some(pos) = self.visible_tasks().iter().position(|task| task.id == id) {
                self.view.selected = pos;
            }
        }
    }

    /// 删除前弹出确认框
    pub fn request_delete(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };

        let message = format!("Delete task \"{}\"?\nThis cannot be undone.", task.title);
        let id = task.id;
        self.dialog = Some(DialogType::Confirm {
            title: "Delete Task".to_string(),
            message,
            yes_selected: true,
            action: ConfirmAction::DeleteTask(id),
        });
        self.mode = Mode::Dialog;
    }

    /// 删除任务
    pub fn delete_task(&mut self, id: TaskId) {
        match self.store.delete_task(id) {
            Ok(task) => {
                self.show_notification(
                    format!("Deleted \"{}\"", task.title),
                    NotificationLevel::Success,
                );
            }
            Err(e) => {
                self.show_notification(e.to_string(), NotificationLevel::Warning);
            }
        }
        self.view.clamp_selection(&self.store);
    }

    /// 切换逾期卡片动效
    pub fn toggle_motion(&mut self) {
        self.config.decorative_motion = !self.config.decorative_motion;
        let message = format!("Decorative motion {}", on_off(self.config.decorative_motion));
        self.show_notification(message, NotificationLevel::Info);
    }

    /// 显示通知消息
    pub fn show_notification(&mut self, message: String, level: NotificationLevel) {
        match level {
            NotificationLevel::Warning | NotificationLevel::Error => {
                tracing::warn!(%message, "notification")
            }
            _ => tracing::debug!(%message, "notification"),
        }

        self.notification = Some(Notification {
            message,
            level,
            created_at: Instant::now(),
        });
    }

    /// 清除已过期的通知
    pub fn clear_expired_notification(&mut self) {
        if self.notification.as_ref().is_some_and(Notification::is_expired) {
            self.notification = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use crate::store::Filter;

    fn app() -> App {
        App::new(Config::default())
    }

    #[test]
    fn test_new_app_is_seeded_by_config() {
        assert_eq!(app().store.len(), 3);

        let config = Config {
            seed_demo_tasks: false,
            ..Config::default()
        };
        assert!(App::new(config).store.is_empty());
    }

    #[test]
    fn test_submit_with_empty_title_keeps_form_open() {
        let mut app = app();
        app.open_new_task_form();
        app.submit_form();

        assert_eq!(app.mode, Mode::Form);
        assert!(app.form.is_some());
        assert_eq!(app.store.len(), 3);
        assert_eq!(
            app.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Warning)
        );
    }

    #[test]
    fn test_submit_create_prepends() {
        let mut app = app();
        app.open_new_task_form();
        if let Some(form) = app.form.as_mut() {
            form.title.set_text("Plan sprint");
        }
        app.submit_form();

        assert_eq!(app.mode, Mode::Normal);
        assert!(app.form.is_none());
        assert_eq!(app.store.len(), 4);
        assert_eq!(app.store.tasks()[0].title, "Plan sprint");
        assert_eq!(app.selected_task().map(|t| t.title.as_str()), Some("Plan sprint"));
    }

    #[test]
    fn test_create_under_filter_keeps_selection_when_hidden() {
        let mut app = app();
        app.view.set_status_filter(Filter::Only(Status::InProgress));
        app.open_new_task_form();
        if let Some(form) = app.form.as_mut() {
            form.title.set_text("Draft roadmap");
        }
        app.submit_form();

        assert_eq!(app.store.len(), 4);
        assert_eq!(app.visible_tasks().len(), 1);
        assert_eq!(app.selected_task().map(|t| t.id), Some(TaskId(1)));
    }

    #[test]
    fn test_create_under_filter_selects_new_task_when_visible() {
        let mut app = app();
        app.view.set_status_filter(Filter::Only(Status::Todo));
        app.view.selected = 1;
        app.open_new_task_form();
        if let Some(form) = app.form.as_mut() {
            form.title.set_text("Write changelog");
        }
        app.submit_form();

        assert_eq!(app.visible_tasks().len(), 3);
        assert_eq!(app.selected_task().map(|t| t.title.as_str()), Some("Write changelog"));
    }

    #[test]
    fn test_edit_with_invalid_due_date_keeps_previous_date() {
        let mut app = app();
        app.open_edit_form();
        if let Some(form) = app.form.as_mut() {
            form.title.set_text("Renamed");
            form.due_date.set_text("2024-07-32");
        }
        app.submit_form();

        let task = &app.store.tasks()[0];
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 7, 8));
        assert_eq!(app.mode, Mode::Normal);
        let notification = app.notification.as_ref().unwrap();
        assert_eq!(notification.level, NotificationLevel::Warning);
        assert!(notification.message.contains("kept the previous date"));
    }

    #[test]
    fn test_create_with_invalid_due_date_has_no_date() {
        let mut app = app();
        app.open_new_task_form();
        if let Some(form) = app.form.as_mut() {
            form.title.set_text("Ship it");
            form.due_date.set_text("tomorrow");
        }
        app.submit_form();

        assert_eq!(app.store.tasks()[0].due_date, None);
        let notification = app.notification.as_ref().unwrap();
        assert_eq!(notification.level, NotificationLevel::Warning);
        assert!(notification.message.contains("no due date set"));
    }

    #[test]
    fn test_config_path_resolved_at_startup() {
        assert_eq!(app().config_path, crate::config::get_config_path().ok());
    }

    #[test]
    fn test_submit_edit_updates_in_place() {
        let mut app = app();
        app.view.selected = 2;
        app.open_edit_form();
        if let Some(form) = app.form.as_mut() {
            form.status = Status::Completed;
        }
        app.submit_form();

        let task = &app.store.tasks()[2];
        assert_eq!(task.title, "Update database schema");
        assert_eq!(task.status, Status::Completed);
        assert_eq!(app.store.statistics().completed, 1);
    }

    #[test]
    fn test_edit_of_deleted_task_reports_error() {
        let mut app = app();
        app.open_edit_form();
        let id = app.store.tasks()[0].id;
        app.store.delete_task(id).unwrap();

        app.submit_form();
        assert_eq!(app.store.len(), 2);
        assert_eq!(
            app.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Warning)
        );
    }

    #[test]
    fn test_edit_of_deleted_task_with_invalid_due_date_reports_not_found() {
        let mut app = app();
        app.open_edit_form();
        if let Some(form) = app.form.as_mut() {
            form.due_date.set_text("soon");
        }
        let id = app.store.tasks()[0].id;
        app.store.delete_task(id).unwrap();

        app.submit_form();
        assert_eq!(app.mode, Mode::Normal);
        let notification = app.notification.as_ref().unwrap();
        assert!(notification.message.contains("not found"));
    }

    #[test]
    fn test_delete_clamps_selection() {
        let mut app = app();
        app.view.selected = 2;
        let id = app.store.tasks()[2].id;
        app.delete_task(id);

        assert_eq!(app.store.len(), 2);
        assert_eq!(app.view.selected, 1);

        // 再次删除同一个 id 不影响集合
        app.delete_task(id);
        assert_eq!(app.store.len(), 2);
    }

    #[test]
    fn test_request_delete_opens_confirm() {
        let mut app = app();
        app.view.set_status_filter(Filter::Only(Status::InProgress));
        app.request_delete();

        assert_eq!(app.mode, Mode::Dialog);
        match &app.dialog {
            Some(DialogType::Confirm { action, .. }) => {
                assert_eq!(*action, ConfirmAction::DeleteTask(TaskId(1)));
            }
            _ => panic!("expected confirm dialog"),
        }
    }
}
