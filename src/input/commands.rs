use crate::models::{Priority, Status};
use crate::store::Filter;

/// 应用命令枚举
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // ===== 退出 =====
    Quit,

    // ===== 导航 =====
    /// 选择下一个任务
    TaskDown,
    /// 选择上一个任务
    TaskUp,
    /// 跳到第一个任务
    FirstTask,
    /// 跳到最后一个任务
    LastTask,

    // ===== 任务操作 =====
    /// 创建新任务
    NewTask,
    /// 编辑当前任务
    EditTask,
    /// 删除当前任务（需确认）
    DeleteTask,

    // ===== 搜索与过滤 =====
    /// 进入搜索输入
    EnterSearchMode,
    /// 循环切换状态过滤器
    CycleStatusFilter,
    /// 循环切换优先级过滤器
    CyclePriorityFilter,
    /// 弹出状态过滤器选择框
    PickStatusFilter,
    /// 弹出优先级过滤器选择框
    PickPriorityFilter,
    /// 设置状态过滤器（快捷过滤）
    SetStatusFilter(Filter<Status>),
    /// 设置优先级过滤器
    SetPriorityFilter(Filter<Priority>),
    /// 清空搜索和过滤器
    ClearFilters,

    // ===== 其他 =====
    /// 切换逾期卡片动效
    ToggleMotion,
    /// 显示帮助
    ShowHelp,
    /// 进入命令模式
    EnterCommandMode,
    /// 取消当前操作
    Cancel,
}
