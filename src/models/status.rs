use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseError;

/// 任务状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl Status {
    /// 所有状态，按看板顺序
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Completed];

    /// 序列化使用的名称
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }

    /// 界面显示名称
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// 循环切换到下一个状态（表单中使用）
    pub fn next(self) -> Self {
        match self {
            Status::Todo => Status::InProgress,
            Status::InProgress => Status::Completed,
            Status::Completed => Status::Todo,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Status::Todo => Status::Completed,
            Status::InProgress => Status::Todo,
            Status::Completed => Status::InProgress,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(Status::Todo),
            "in-progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            other => Err(ParseError::Status(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!("todo".parse::<Status>(), Ok(Status::Todo));
        assert_eq!("In-Progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!(" completed ".parse::<Status>(), Ok(Status::Completed));
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_cycle() {
        for status in Status::ALL {
            assert_eq!(status.next().prev(), status);
        }
        assert_eq!(Status::Completed.next(), Status::Todo);
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
