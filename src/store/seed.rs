use crate::models::{Priority, Status, Task, TaskId};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// 启动时填充的示例任务（没有持久化层时使用）
pub fn seed_tasks() -> Vec<Task> {
    let created = |day| date(2024, 7, day).unwrap_or_default();

    vec![
        Task {
            id: TaskId(1),
            title: "Complete project documentation".to_string(),
            description: "Write comprehensive documentation for the new feature".to_string(),
            priority: Priority::High,
            status: Status::InProgress,
            due_date: date(2024, 7, 8),
            shared_with: vec!["john@example.com".to_string()],
            created_at: created(5),
        },
        Task {
            id: TaskId(2),
            title: "Review pull requests".to_string(),
            description: "Review and approve pending pull requests from team members".to_string(),
            priority: Priority::Medium,
            status: Status::Todo,
            due_date: date(2024, 7, 6),
            shared_with: Vec::new(),
            created_at: created(4),
        },
        Task {
            id: TaskId(3),
            title: "Update database schema".to_string(),
            description: "Implement new database schema changes for user management".to_string(),
            priority: Priority::High,
            status: Status::Todo,
            due_date: date(2024, 7, 7),
            shared_with: vec!["admin@example.com".to_string()],
            created_at: created(3),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_tasks_literals() {
        let tasks = seed_tasks();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].status, Status::InProgress);
        assert_eq!(tasks[1].shared_with.len(), 0);
        assert_eq!(tasks[2].due_date, date(2024, 7, 7));
        assert_eq!(tasks[2].created_at, NaiveDate::from_ymd_opt(2024, 7, 3).unwrap());
    }
}
