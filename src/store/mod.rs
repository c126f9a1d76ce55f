//! 内存任务存储：唯一持有任务集合，所有修改都经过这里
pub mod seed;
pub mod view;

pub use seed::seed_tasks;
pub use view::{compute_statistics, filter_tasks, is_overdue, Filter, TaskStats};

use crate::models::{Task, TaskDraft, TaskId};
use chrono::NaiveDate;

/// 存储操作错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("task #{0} not found")]
    NotFound(TaskId),
}

/// 任务集合（最新创建的排在最前面）
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// 用已有任务初始化，保持给定顺序
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id.0).max().unwrap_or(0) + 1;
        Self { tasks, next_id }
    }

    /// 带三条示例任务的存储
    pub fn with_seed_tasks() -> Self {
        Self::from_tasks(seed_tasks())
    }

    /// 当前快照
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// 创建任务，created_at 取本地当天日期
    pub fn create_task(&mut self, draft: TaskDraft) -> &Task {
        self.create_task_on(draft, chrono::Local::now().date_naive())
    }

    /// 创建任务并插入到集合头部
    pub fn create_task_on(&mut self, draft: TaskDraft, today: NaiveDate) -> &Task {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let task = Task {
            id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: draft.status,
            due_date: draft.due_date,
            shared_with: draft.shared_with,
            created_at: today,
        };
        tracing::debug!(task_id = %id, title = %task.title, "task created");

        self.tasks.insert(0, task);
        &self.tasks[0]
    }

    /// 整体替换除 id / created_at 以外的字段，位置不变
    pub fn update_task(&mut self, id: TaskId, draft: TaskDraft) -> Result<&Task, StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            tracing::warn!(task_id = %id, "update ignored: task not found");
            return Err(StoreError::NotFound(id));
        };

        task.title = draft.title;
        task.description = draft.description;
        task.priority = draft.priority;
        task.status = draft.status;
        task.due_date = draft.due_date;
        task.shared_with = draft.shared_with;
        tracing::debug!(task_id = %id, "task updated");

        Ok(&*task)
    }

    /// 永久删除任务
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, StoreError> {
        let Some(index) = self.position(id) else {
            tracing::warn!(task_id = %id, "delete ignored: task not found");
            return Err(StoreError::NotFound(id));
        };

        let task = self.tasks.remove(index);
        tracing::debug!(task_id = %id, "task deleted");
        Ok(task)
    }

    pub fn statistics(&self) -> TaskStats {
        compute_statistics(&self.tasks)
    }
}
