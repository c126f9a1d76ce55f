/// 命令注册表 - 类似 Helix 的 : 命令
use std::collections::HashMap;

/// 命令定义
#[derive(Debug, Clone)]
pub struct CommandDef {
    /// 完整命令名
    pub name: &'static str,
    /// 命令别名列表
    pub aliases: Vec<&'static str>,
    /// 参数提示（无参数为空）
    pub args: &'static str,
    /// 命令描述
    pub description: &'static str,
}

/// 命令注册表
pub struct CommandRegistry {
    commands: Vec<CommandDef>,
    // 命令名/别名 -> 命令索引的映射
    lookup: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
            lookup: HashMap::new(),
        };
        registry.register_default_commands();
        registry
    }

    /// 注册默认命令
    fn register_default_commands(&mut self) {
        self.register(CommandDef {
            name: "quit",
            aliases: vec!["q"],
            args: "",
            description: "Quit the dashboard",
        });

        // 任务管理命令
        self.register(CommandDef {
            name: "task-new",
            aliases: vec!["tn", "new", "add"],
            args: "",
            description: "Create a new task",
        });

        self.register(CommandDef {
            name: "task-edit",
            aliases: vec!["te", "edit"],
            args: "",
            description: "Edit the selected task",
        });

        self.register(CommandDef {
            name: "task-delete",
            aliases: vec!["td", "delete", "del"],
            args: "",
            description: "Delete the selected task",
        });

        // 搜索与过滤
        self.register(CommandDef {
            name: "search",
            aliases: vec!["s", "find"],
            args: "<text>",
            description: "Search titles and descriptions",
        });

        self.register(CommandDef {
            name: "filter-status",
            aliases: vec!["fs", "status"],
            args: "<all|todo|in-progress|completed>",
            description: "Filter by status",
        });

        self.register(CommandDef {
            name: "filter-priority",
            aliases: vec!["fp", "priority"],
            args: "<all|low|medium|high>",
            description: "Filter by priority",
        });

        self.register(CommandDef {
            name: "clear-filters",
            aliases: vec!["cf", "clear", "reset"],
            args: "",
            description: "Clear search and filters",
        });

        // 显示
        self.register(CommandDef {
            name: "motion",
            aliases: vec!["m"],
            args: "",
            description: "Toggle decorative motion on overdue cards",
        });

        self.register(CommandDef {
            name: "help",
            aliases: vec!["h", "?"],
            args: "",
            description: "Show keyboard help",
        });
    }

    /// 注册一个命令
    fn register(&mut self, cmd: CommandDef) {
        let idx = self.commands.len();

        // 注册主命令名
        self.lookup.insert(cmd.name.to_string(), idx);

        // 注册所有别名
        for alias in &cmd.aliases {
            self.lookup.insert(alias.to_string(), idx);
        }

        self.commands.push(cmd);
    }

    /// 根据输入查找匹配的命令（前缀匹配，用于补全提示）
    pub fn find_matches(&self, input: &str) -> Vec<&CommandDef> {
        let word = input.split_whitespace().next().unwrap_or("");
        if word.is_empty() {
            // 如果输入为空，返回所有命令
            return self.commands.iter().collect();
        }

        let input_lower = word.to_lowercase();
        let mut matches: Vec<&CommandDef> = self
            .commands
            .iter()
            .filter(|cmd| {
                cmd.name.starts_with(&input_lower)
                    || cmd.aliases.iter().any(|alias| alias.starts_with(&input_lower))
            })
            .collect();

        // 按命令名长度排序（优先显示短命令）
        matches.sort_by_key(|cmd| cmd.name.len());

        matches
    }

    /// 精确查找命令（用于执行）
    pub fn find_exact(&self, name: &str) -> Option<&CommandDef> {
        let idx = self.lookup.get(name)?;
        self.commands.get(*idx)
    }

    /// 获取所有命令
    pub fn all_commands(&self) -> &[CommandDef] {
        &self.commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_matches() {
        let registry = CommandRegistry::new();

        // 测试前缀匹配
        let matches = registry.find_matches("q");
        assert!(matches.iter().any(|cmd| cmd.name == "quit"));

        // 测试别名匹配
        let matches = registry.find_matches("fp");
        assert!(matches.iter().any(|cmd| cmd.name == "filter-priority"));

        // 参数不影响匹配
        let matches = registry.find_matches("filter-s todo");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "filter-status");

        // 测试空输入
        let matches = registry.find_matches("");
        assert_eq!(matches.len(), registry.all_commands().len());
    }

    #[test]
    fn test_find_exact() {
        let registry = CommandRegistry::new();

        // 测试主命令名
        assert!(registry.find_exact("quit").is_some());

        // 测试别名
        assert_eq!(registry.find_exact("q").map(|c| c.name), Some("quit"));
        assert_eq!(registry.find_exact("add").map(|c| c.name), Some("task-new"));

        // 测试不存在的命令
        assert!(registry.find_exact("nonexistent").is_none());
    }
}
