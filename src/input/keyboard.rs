use crate::app::{App, Mode, NotificationLevel};
use crate::form::FormAction;
use crate::input::Command;
use crate::models::{Priority, Status};
use crate::store::Filter;
use crate::ui::dialogs::{ConfirmAction, DialogType, SelectPurpose};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 处理键盘输入
/// 返回 false 表示应该退出应用
pub fn handle_key_input(app: &mut App, key: KeyEvent) -> bool {
    // 如果显示欢迎对话框，任意按键都关闭它
    if app.show_welcome_dialog {
        app.show_welcome_dialog = false;
        return true;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Search => handle_search_mode(app, key),
        Mode::Command => handle_command_mode(app, key),
        Mode::Form => handle_form_mode(app, key),
        Mode::Dialog => handle_dialog_mode(app, key),
        Mode::Help => handle_help_mode(app, key),
    }
}

/// 处理正常模式的按键
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> bool {
    // Ctrl+C 直接退出
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return false;
    }

    // 尝试匹配命令（使用当前缓冲区和新按键），序列不成立时按单键重新匹配
    let matched = match_key_sequence(&app.key_buffer, key).or_else(|| {
        (!app.key_buffer.is_empty())
            .then(|| match_key_sequence(&[], key))
            .flatten()
    });

    if let Some(cmd) = matched {
        app.key_buffer.clear();

        // 特殊处理退出命令
        if cmd == Command::Quit {
            return false;
        }

        execute_command(app, cmd);
        return true;
    }

    // 如果没有匹配到命令，将字符添加到缓冲区（用于多键序列）
    if let KeyCode::Char(c) = key.code {
        app.key_buffer.push(c);
    } else {
        // 非字符键清空缓冲区
        app.key_buffer.clear();
    }

    // 如果缓冲区太长，清空它
    if app.key_buffer.len() > 2 {
        app.key_buffer.clear();
    }

    true
}

/// 匹配键序列到命令
/// buffer: 之前按过的键（不包含当前键）
/// key: 当前正在按的键
pub fn match_key_sequence(buffer: &[char], key: KeyEvent) -> Option<Command> {
    match (buffer, key.code, key.modifiers) {
        // ===== 单键命令（空缓冲区）=====
        ([], KeyCode::Char('q'), KeyModifiers::NONE) => Some(Command::Quit),
        ([], KeyCode::Char('j'), KeyModifiers::NONE) => Some(Command::TaskDown),
        ([], KeyCode::Char('k'), KeyModifiers::NONE) => Some(Command::TaskUp),
        ([], KeyCode::Char('G'), KeyModifiers::SHIFT) => Some(Command::LastTask),
        ([], KeyCode::Char('a'), KeyModifiers::NONE) => Some(Command::NewTask),
        ([], KeyCode::Char('n'), KeyModifiers::NONE) => Some(Command::NewTask),
        ([], KeyCode::Char('e'), KeyModifiers::NONE) => Some(Command::EditTask),
        ([], KeyCode::Enter, _) => Some(Command::EditTask),
        ([], KeyCode::Char('d'), KeyModifiers::NONE) => Some(Command::DeleteTask),
        ([], KeyCode::Delete, _) => Some(Command::DeleteTask),
        ([], KeyCode::Char('/'), KeyModifiers::NONE) => Some(Command::EnterSearchMode),
        ([], KeyCode::Char('s'), KeyModifiers::NONE) => Some(Command::CycleStatusFilter),
        ([], KeyCode::Char('p'), KeyModifiers::NONE) => Some(Command::CyclePriorityFilter),
        ([], KeyCode::Char('S'), KeyModifiers::SHIFT) => Some(Command::PickStatusFilter),
        ([], KeyCode::Char('P'), KeyModifiers::SHIFT) => Some(Command::PickPriorityFilter),
        ([], KeyCode::Char('x'), KeyModifiers::NONE) => Some(Command::ClearFilters),
        ([], KeyCode::Char('m'), KeyModifiers::NONE) => Some(Command::ToggleMotion),
        ([], KeyCode::Char('?'), _) => Some(Command::ShowHelp),
        ([], KeyCode::Char(':'), _) => Some(Command::EnterCommandMode),
        ([], KeyCode::Esc, _) => Some(Command::Cancel),

        // 快捷过滤（对应状态徽章）
        ([], KeyCode::Char('0'), KeyModifiers::NONE) => Some(Command::SetStatusFilter(Filter::All)),
        ([], KeyCode::Char('1'), KeyModifiers::NONE) => {
            Some(Command::SetStatusFilter(Filter::Only(Status::Todo)))
        }
        ([], KeyCode::Char('2'), KeyModifiers::NONE) => {
            Some(Command::SetStatusFilter(Filter::Only(Status::InProgress)))
        }
        ([], KeyCode::Char('3'), KeyModifiers::NONE) => {
            Some(Command::SetStatusFilter(Filter::Only(Status::Completed)))
        }

        ([], KeyCode::Down, _) => Some(Command::TaskDown),
        ([], KeyCode::Up, _) => Some(Command::TaskUp),
        ([], KeyCode::Home, _) => Some(Command::FirstTask),
        ([], KeyCode::End, _) => Some(Command::LastTask),

        // ===== g 序列 =====
        (['g'], KeyCode::Char('g'), _) => Some(Command::FirstTask),
        (['g'], KeyCode::Char('e'), _) => Some(Command::LastTask),

        _ => None,
    }
}

/// 执行命令
fn execute_command(app: &mut App, cmd: Command) {
    match cmd {
        Command::TaskDown => app.view.select_next(&app.store),
        Command::TaskUp => app.view.select_prev(),
        Command::FirstTask => app.view.selected = 0,
        Command::LastTask => app.view.select_last(&app.store),
        Command::NewTask => app.open_new_task_form(),
        Command::EditTask => app.open_edit_form(),
        Command::DeleteTask => app.request_delete(),
        Command::EnterSearchMode => {
            app.mode = Mode::Search;
        }
        Command::CycleStatusFilter => {
            let next = app.view.status_filter.cycle();
            app.view.set_status_filter(next);
        }
        Command::CyclePriorityFilter => {
            let next = app.view.priority_filter.cycle();
            app.view.set_priority_filter(next);
        }
        Command::PickStatusFilter => {
            let mut items = vec!["All Status".to_string()];
            items.extend(Status::ALL.iter().map(|s| s.label().to_string()));
            open_select(app, "Filter by status", items, SelectPurpose::StatusFilter);
        }
        Command::PickPriorityFilter => {
            let mut items = vec!["All Priority".to_string()];
            items.extend(Priority::ALL.iter().map(|p| p.label().to_string()));
            open_select(app, "Filter by priority", items, SelectPurpose::PriorityFilter);
        }
        Command::SetStatusFilter(filter) => app.view.set_status_filter(filter),
        Command::SetPriorityFilter(filter) => app.view.set_priority_filter(filter),
        Command::ClearFilters => app.view.reset(),
        Command::ToggleMotion => app.toggle_motion(),
        Command::ShowHelp => {
            app.mode = Mode::Help;
        }
        Command::EnterCommandMode => {
            app.mode = Mode::Command;
            app.command_input.clear();
        }
        Command::Cancel => {
            app.mode = Mode::Normal;
            app.key_buffer.clear();
            app.command_input.clear();
        }
        // 在 handle_normal_mode 中处理
        Command::Quit => {}
    }
}

fn open_select(app: &mut App, title: &str, items: Vec<String>, purpose: SelectPurpose) {
    app.dialog = Some(DialogType::Select {
        title: title.to_string(),
        items,
        selected: 0,
        filter: String::new(),
        purpose,
    });
    app.mode = Mode::Dialog;
}

/// 处理搜索模式的按键（实时过滤）
fn handle_search_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            // Esc 清空搜索词并返回
            app.view.set_search(String::new());
            app.mode = Mode::Normal;
        }
        KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            let mut search = app.view.search.clone();
            search.pop();
            app.view.set_search(search);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.view.set_search(String::new());
        }
        KeyCode::Char(c) => {
            let search = format!("{}{}", app.view.search, c);
            app.view.set_search(search);
        }
        _ => {}
    }
    true
}

/// 处理命令模式的按键
fn handle_command_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.command_input.clear();
        }
        KeyCode::Enter => {
            // 执行命令
            let input = std::mem::take(&mut app.command_input);
            app.mode = Mode::Normal;
            return execute_text_command(app, &input);
        }
        KeyCode::Tab => {
            // 补全为第一个匹配的命令名
            let first = app
                .command_registry
                .find_matches(&app.command_input)
                .first()
                .map(|cmd| cmd.name);
            if let Some(name) = first {
                app.command_input = format!("{} ", name);
            }
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    true
}

/// 执行文本命令（从命令模式输入）
/// 返回 false 表示应该退出应用
pub(crate) fn execute_text_command(app: &mut App, input: &str) -> bool {
    let input = input.trim();
    let (name, args) = match input.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (input, ""),
    };

    if name.is_empty() {
        return true;
    }

    let Some(cmd_def) = app.command_registry.find_exact(name) else {
        app.show_notification(format!("Unknown command: {}", name), NotificationLevel::Error);
        return true;
    };

    // 根据命令名执行对应操作
    match cmd_def.name {
        "quit" => return false,
        "task-new" => execute_command(app, Command::NewTask),
        "task-edit" => execute_command(app, Command::EditTask),
        "task-delete" => execute_command(app, Command::DeleteTask),
        "search" => app.view.set_search(args),
        "filter-status" => match args.parse::<Filter<Status>>() {
            Ok(filter) => execute_command(app, Command::SetStatusFilter(filter)),
            Err(e) => app.show_notification(e.to_string(), NotificationLevel::Error),
        },
        "filter-priority" => match args.parse::<Filter<Priority>>() {
            Ok(filter) => execute_command(app, Command::SetPriorityFilter(filter)),
            Err(e) => app.show_notification(e.to_string(), NotificationLevel::Error),
        },
        "clear-filters" => execute_command(app, Command::ClearFilters),
        "motion" => execute_command(app, Command::ToggleMotion),
        "help" => execute_command(app, Command::ShowHelp),
        _ => {}
    }
    true
}

/// 处理表单模式的按键
fn handle_form_mode(app: &mut App, key: KeyEvent) -> bool {
    let Some(form) = app.form.as_mut() else {
        app.mode = Mode::Normal;
        return true;
    };

    match form.handle_key(key) {
        FormAction::Continue => {}
        FormAction::Submit => app.submit_form(),
        FormAction::Cancel => app.close_form(),
    }
    true
}

/// 处理对话框模式的按键
fn handle_dialog_mode(app: &mut App, key: KeyEvent) -> bool {
    let Some(dialog) = &mut app.dialog else {
        app.mode = Mode::Normal;
        return true;
    };

    match dialog {
        DialogType::Select {
            items,
            selected,
            filter,
            purpose,
            ..
        } => match key.code {
            KeyCode::Esc => close_dialog(app),
            KeyCode::Enter => {
                let choice = DialogType::filtered_items(items, filter)
                    .get(*selected)
                    .map(|(idx, _)| *idx);
                let purpose = *purpose;
                close_dialog(app);
                if let Some(idx) = choice {
                    apply_select(app, purpose, idx);
                }
            }
            KeyCode::Up => {
                *selected = selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let filtered_count = DialogType::filtered_items(items, filter).len();
                *selected = (*selected + 1).min(filtered_count.saturating_sub(1));
            }
            KeyCode::Backspace => {
                filter.pop();
                *selected = 0;
            }
            KeyCode::Char(c) => {
                filter.push(c);
                *selected = 0;
            }
            _ => {}
        },
        DialogType::Confirm {
            yes_selected,
            action,
            ..
        } => match key.code {
            KeyCode::Esc | KeyCode::Char('n') => close_dialog(app),
            KeyCode::Char('y') => {
                let action = action.clone();
                close_dialog(app);
                apply_confirm(app, action);
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                *yes_selected = !*yes_selected;
            }
            KeyCode::Enter => {
                let confirmed = *yes_selected;
                let action = action.clone();
                close_dialog(app);
                if confirmed {
                    apply_confirm(app, action);
                }
            }
            _ => {}
        },
    }
    true
}

fn close_dialog(app: &mut App) {
    app.dialog = None;
    app.mode = Mode::Normal;
}

/// 选择框确认后的处理（索引 0 = 全部）
fn apply_select(app: &mut App, purpose: SelectPurpose, idx: usize) {
    let cmd = match purpose {
        SelectPurpose::StatusFilter => Command::SetStatusFilter(
            idx.checked_sub(1)
                .and_then(|i| Status::ALL.get(i).copied())
                .map_or(Filter::All, Filter::Only),
        ),
        SelectPurpose::PriorityFilter => Command::SetPriorityFilter(
            idx.checked_sub(1)
                .and_then(|i| Priority::ALL.get(i).copied())
                .map_or(Filter::All, Filter::Only),
        ),
    };
    execute_command(app, cmd);
}

fn apply_confirm(app: &mut App, action: ConfirmAction) {
    match action {
        ConfirmAction::DeleteTask(id) => app.delete_task(id),
    }
}

/// 处理帮助模式的按键
fn handle_help_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::TaskId;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_input(app, key(code))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn app() -> App {
        App::new(Config::default())
    }

    #[test]
    fn test_match_single_keys() {
        assert_eq!(match_key_sequence(&[], key(KeyCode::Char('j'))), Some(Command::TaskDown));
        assert_eq!(match_key_sequence(&[], key(KeyCode::Char('a'))), Some(Command::NewTask));
        assert_eq!(
            match_key_sequence(&[], key(KeyCode::Char('2'))),
            Some(Command::SetStatusFilter(Filter::Only(Status::InProgress)))
        );
        assert_eq!(
            match_key_sequence(&[], KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT)),
            Some(Command::PickStatusFilter)
        );
        assert_eq!(match_key_sequence(&[], key(KeyCode::Char('g'))), None);
    }

    #[test]
    fn test_match_g_sequence() {
        assert_eq!(
            match_key_sequence(&['g'], key(KeyCode::Char('g'))),
            Some(Command::FirstTask)
        );

        let mut app = app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.view.selected, 2);
        type_str(&mut app, "gg");
        assert_eq!(app.view.selected, 0);
        assert!(app.key_buffer.is_empty());

        // 未完成的序列不吞掉后面的单键
        type_str(&mut app, "gj");
        assert_eq!(app.view.selected, 1);
        assert!(app.key_buffer.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Char('q')));

        let mut app = self::app();
        press(&mut app, KeyCode::Char(':'));
        type_str(&mut app, "q");
        assert!(!press(&mut app, KeyCode::Enter));
    }

    #[test]
    fn test_create_task_through_form_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Form);

        type_str(&mut app, "Write changelog");
        handle_key_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
        );

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.len(), 4);
        assert_eq!(app.store.tasks()[0].title, "Write changelog");
    }

    #[test]
    fn test_search_mode_filters_live() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "schema");
        assert_eq!(app.visible_tasks().len(), 1);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.view.search, "schema");

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc);
        assert!(app.view.search.is_empty());
        assert_eq!(app.visible_tasks().len(), 3);
    }

    #[test]
    fn test_delete_with_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, Mode::Dialog);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store.len(), 3);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.store.len(), 2);
        assert!(app.store.get(TaskId(1)).is_none());
    }

    #[test]
    fn test_quick_filters_and_clear() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.visible_tasks().len(), 2);

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.view.priority_filter, Filter::Only(Priority::High));
        assert_eq!(app.visible_tasks().len(), 1);

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.visible_tasks().len(), 3);
    }

    #[test]
    fn test_pick_priority_filter_dialog() {
        let mut app = app();
        handle_key_input(&mut app, KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT));
        assert_eq!(app.mode, Mode::Dialog);

        // 输入过滤词 "med" 后只剩 Medium
        type_str(&mut app, "med");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.view.priority_filter, Filter::Only(Priority::Medium));
        assert_eq!(app.visible_tasks().len(), 1);
    }

    #[test]
    fn test_text_commands() {
        let mut app = app();
        assert!(execute_text_command(&mut app, "filter-status completed"));
        assert!(app.visible_tasks().is_empty());

        assert!(execute_text_command(&mut app, "fs all"));
        assert!(execute_text_command(&mut app, "search review"));
        assert_eq!(app.visible_tasks().len(), 1);

        assert!(execute_text_command(&mut app, "fp urgent"));
        assert_eq!(
            app.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Error)
        );

        assert!(execute_text_command(&mut app, "priority medium"));
        assert_eq!(app.view.priority_filter, Filter::Only(Priority::Medium));
        assert_eq!(app.visible_tasks().len(), 1);
        assert!(execute_text_command(&mut app, "filter-priority high"));
        assert!(app.visible_tasks().is_empty());

        assert!(execute_text_command(&mut app, "bogus"));
        assert!(!execute_text_command(&mut app, "quit"));
    }

    #[test]
    fn test_welcome_dialog_swallows_first_key() {
        let mut app = app();
        app.show_welcome_dialog = true;
        press(&mut app, KeyCode::Char('a'));
        assert!(!app.show_welcome_dialog);
        assert_eq!(app.mode, Mode::Normal);
    }
}
