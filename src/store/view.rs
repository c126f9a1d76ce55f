//! 派生视图：统计、过滤、逾期判断
//!
//! 都是对当前快照的纯函数，每次渲染重新计算。

use crate::models::{ParseError, Priority, Status, Task};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// 任务统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub todo: usize,
    /// 完成率百分比（0-100）
    pub completion_rate: u8,
}

impl TaskStats {
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Todo => self.todo,
            Status::InProgress => self.in_progress,
            Status::Completed => self.completed,
        }
    }
}

/// 计算统计数据，空集合的完成率为 0
pub fn compute_statistics(tasks: &[Task]) -> TaskStats {
    let total = tasks.len();
    let count = |status: Status| tasks.iter().filter(|t| t.status == status).count();
    let completed = count(Status::Completed);

    let completion_rate = if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as u8
    } else {
        0
    };

    TaskStats {
        total,
        completed,
        in_progress: count(Status::InProgress),
        todo: count(Status::Todo),
        completion_rate,
    }
}

/// 过滤条件："全部" 或精确匹配某个值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.pad("all"),
            Filter::Only(value) => value.fmt(f),
        }
    }
}

impl<T> FromStr for Filter<T>
where
    T: FromStr<Err = ParseError>,
{
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Filter::All);
        }
        s.parse().map(Filter::Only)
    }
}

impl Filter<Status> {
    /// 状态过滤器循环：All -> Todo -> InProgress -> Completed -> All
    pub fn cycle(self) -> Self {
        match self {
            Filter::All => Filter::Only(Status::Todo),
            Filter::Only(Status::Completed) => Filter::All,
            Filter::Only(status) => Filter::Only(status.next()),
        }
    }
}

impl Filter<Priority> {
    /// 优先级过滤器循环：All -> High -> Medium -> Low -> All
    pub fn cycle(self) -> Self {
        match self {
            Filter::All => Filter::Only(Priority::High),
            Filter::Only(Priority::High) => Filter::Only(Priority::Medium),
            Filter::Only(Priority::Medium) => Filter::Only(Priority::Low),
            Filter::Only(Priority::Low) => Filter::All,
        }
    }
}

/// 搜索（标题或描述，大小写不敏感的子串）+ 状态过滤 + 优先级过滤，保持原有顺序
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    search_term: &str,
    status_filter: Filter<Status>,
    priority_filter: Filter<Priority>,
) -> Vec<&'a Task> {
    let needle = search_term.to_lowercase();

    tasks
        .iter()
        .filter(|task| {
            let matches_search = task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle);
            matches_search
                && status_filter.matches(&task.status)
                && priority_filter.matches(&task.priority)
        })
        .collect()
}

/// 未完成且截止日期严格早于今天
pub fn is_overdue(due_date: NaiveDate, status: Status, today: NaiveDate) -> bool {
    status != Status::Completed && due_date < today
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskDraft, TaskId};
    use crate::store::{seed_tasks, TaskStore};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store_with_statuses(statuses: &[Status]) -> TaskStore {
        let mut store = TaskStore::new();
        for (i, status) in statuses.iter().enumerate() {
            store.create_task(TaskDraft::new(format!("task {i}")).with_status(*status));
        }
        store
    }

    #[test]
    fn test_statistics_empty() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats, TaskStats::default());
        assert_eq!(stats.completion_rate, 0);
    }

    #[test]
    fn test_statistics_mixed() {
        let store = store_with_statuses(&[
            Status::Completed,
            Status::Completed,
            Status::Todo,
            Status::InProgress,
        ]);
        let stats = compute_statistics(store.tasks());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.todo, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.completion_rate, 50);
        assert_eq!(stats.count(Status::Completed), 2);
    }

    #[test]
    fn test_completion_rate_rounds() {
        // 1/3 -> 33, 2/3 -> 67, 1/8 -> 13
        let one_third = store_with_statuses(&[Status::Completed, Status::Todo, Status::Todo]);
        assert_eq!(one_third.statistics().completion_rate, 33);

        let two_thirds =
            store_with_statuses(&[Status::Completed, Status::Completed, Status::Todo]);
        assert_eq!(two_thirds.statistics().completion_rate, 67);

        let mut statuses = vec![Status::Todo; 7];
        statuses.push(Status::Completed);
        assert_eq!(store_with_statuses(&statuses).statistics().completion_rate, 13);
    }

    #[test]
    fn test_search_schema_on_seed_data() {
        let tasks = seed_tasks();
        let view = filter_tasks(&tasks, "schema", Filter::All, Filter::All);

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].title, "Update database schema");
    }

    #[test]
    fn test_search_is_case_insensitive_and_covers_description() {
        let tasks = seed_tasks();

        let view = filter_tasks(&tasks, "PULL", Filter::All, Filter::All);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, TaskId(2));

        // 只出现在描述里
        let view = filter_tasks(&tasks, "user management", Filter::All, Filter::All);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, TaskId(3));
    }

    #[test]
    fn test_filters_are_conjunctive_and_keep_order() {
        let tasks = seed_tasks();

        let todo = filter_tasks(&tasks, "", Filter::Only(Status::Todo), Filter::All);
        let ids: Vec<_> = todo.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TaskId(2), TaskId(3)]);

        let todo_high = filter_tasks(
            &tasks,
            "",
            Filter::Only(Status::Todo),
            Filter::Only(Priority::High),
        );
        assert_eq!(todo_high.len(), 1);
        assert_eq!(todo_high[0].id, TaskId(3));

        let none = filter_tasks(&tasks, "documentation", Filter::Only(Status::Todo), Filter::All);
        assert!(none.is_empty());
    }

    #[test]
    fn test_is_overdue() {
        let today = date("2024-07-07");
        assert!(is_overdue(date("2020-01-01"), Status::Todo, today));
        assert!(!is_overdue(date("2020-01-01"), Status::Completed, today));
        assert!(!is_overdue(date("2099-12-31"), Status::Todo, today));
        // 当天到期不算逾期
        assert!(!is_overdue(today, Status::InProgress, today));
    }

    #[test]
    fn test_is_overdue_against_real_clock() {
        let today = chrono::Local::now().date_naive();
        assert!(is_overdue(date("2020-01-01"), Status::Todo, today));
        assert!(!is_overdue(date("2020-01-01"), Status::Completed, today));
        let future = today + chrono::Days::new(30);
        assert!(!is_overdue(future, Status::Todo, today));
    }

    #[test]
    fn test_filter_parse_and_cycle() {
        assert_eq!("all".parse::<Filter<Status>>(), Ok(Filter::All));
        assert_eq!(
            "in-progress".parse::<Filter<Status>>(),
            Ok(Filter::Only(Status::InProgress))
        );
        assert_eq!("ALL".parse::<Filter<Priority>>(), Ok(Filter::All));
        assert!("soon".parse::<Filter<Priority>>().is_err());

        let mut filter = Filter::<Status>::All;
        for _ in 0..4 {
            filter = filter.cycle();
        }
        assert_eq!(filter, Filter::All);
        assert_eq!(Filter::<Priority>::All.cycle(), Filter::Only(Priority::High));
        assert_eq!(Filter::Only(Priority::Low).to_string(), "low");
    }
}
