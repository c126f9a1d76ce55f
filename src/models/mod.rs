pub mod priority;
pub mod status;
pub mod task;

pub use priority::Priority;
pub use status::Status;
pub use task::{Task, TaskDraft, TaskId};

/// 枚举值解析错误（状态、优先级、过滤器）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown status '{0}' (expected todo, in-progress or completed)")]
    Status(String),
    #[error("unknown priority '{0}' (expected low, medium or high)")]
    Priority(String),
}
