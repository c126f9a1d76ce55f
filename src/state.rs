//! 视图状态：搜索词、过滤器、选中项
//!
//! 只在本次会话内有效，不持久化，也不拥有任何任务数据。
use crate::models::{Priority, Status, Task};
use crate::store::{filter_tasks, Filter, TaskStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// 搜索词
    pub search: String,
    pub status_filter: Filter<Status>,
    pub priority_filter: Filter<Priority>,
    /// 过滤结果中选中的索引
    pub selected: usize,
}

impl ViewState {
    /// 当前过滤视图
    pub fn visible_tasks<'a>(&self, store: &'a TaskStore) -> Vec<&'a Task> {
        filter_tasks(
            store.tasks(),
            &self.search,
            self.status_filter,
            self.priority_filter,
        )
    }

    /// 是否有搜索词或过滤器生效
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || !self.status_filter.is_all() || !self.priority_filter.is_all()
    }

    pub fn selected_task<'a>(&self, store: &'a TaskStore) -> Option<&'a Task> {
        self.visible_tasks(store).get(self.selected).copied()
    }

    /// 视图变化后把选中索引限制在范围内
    pub fn clamp_selection(&mut self, store: &TaskStore) {
        let len = self.visible_tasks(store).len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn select_next(&mut self, store: &TaskStore) {
        let len = self.visible_tasks(store).len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_last(&mut self, store: &TaskStore) {
        self.selected = self.visible_tasks(store).len().saturating_sub(1);
    }

    pub fn set_status_filter(&mut self, filter: Filter<Status>) {
        self.status_filter = filter;
        self.selected = 0;
    }

    pub fn set_priority_filter(&mut self, filter: Filter<Priority>) {
        self.priority_filter = filter;
        self.selected = 0;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.selected = 0;
    }

    /// 清空搜索和过滤器
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 状态栏上的简短描述
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.search.is_empty() {
            parts.push(format!("search \"{}\"", self.search));
        }
        if let Filter::Only(status) = self.status_filter {
            parts.push(format!("status {}", status));
        }
        if let Filter::Only(priority) = self.priority_filter {
            parts.push(format!("priority {}", priority));
        }
        parts.join(" · ")
    }
}
