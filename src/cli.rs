use anyhow::{bail, Context, Result};
use std::env;

use crate::config;
use crate::models::{Priority, Status, Task};
use crate::store::{filter_tasks, Filter, TaskStats, TaskStore};

/// 处理 CLI 命令
/// 返回 true 表示应该继续进入 TUI，false 表示已处理完毕应该退出
pub fn handle_cli() -> Result<bool> {
    let args: Vec<String> = env::args().collect();

    // 如果没有参数，进入 TUI 模式
    if args.len() < 2 {
        return Ok(true);
    }

    match args[1].as_str() {
        "list" => {
            if let Err(e) = cli_list(&args[2..]) {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
            Ok(false)
        }
        "stats" => {
            let stats = TaskStore::with_seed_tasks().statistics();
            print!("{}", format_stats(&stats));
            Ok(false)
        }
        "config" => {
            if let Err(e) = handle_config_command(&args[2..]) {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
            Ok(false)
        }
        "--help" | "-h" | "help" => {
            print_help();
            Ok(false)
        }
        "--version" | "-V" | "-v" => {
            print_version();
            Ok(false)
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            eprintln!("Run 'tdash --help' for usage");
            std::process::exit(1);
        }
    }
}

// ============================================================================
// list
// ============================================================================

/// `list` 子命令参数
#[derive(Debug, Default, PartialEq, Eq)]
struct ListArgs {
    search: String,
    status: Filter<Status>,
    priority: Filter<Priority>,
    json: bool,
}

impl ListArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--json" => parsed.json = true,
                "--search" => {
                    parsed.search = iter.next().context("--search needs a value")?.clone();
                }
                "--status" => {
                    let value = iter.next().context("--status needs a value")?;
                    parsed.status = value.parse()?;
                }
                "--priority" => {
                    let value = iter.next().context("--priority needs a value")?;
                    parsed.priority = value.parse()?;
                }
                other => bail!("unknown option '{}'\nUsage: tdash list [--search TEXT] [--status S] [--priority P] [--json]", other),
            }
        }

        Ok(parsed)
    }
}

fn cli_list(args: &[String]) -> Result<()> {
    let list_args = ListArgs::parse(args)?;
    let store = TaskStore::with_seed_tasks();
    let tasks = filter_tasks(
        store.tasks(),
        &list_args.search,
        list_args.status,
        list_args.priority,
    );

    if list_args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();
    print!("{}", format_task_table(&tasks, today));
    Ok(())
}

fn format_task_table(tasks: &[&Task], today: chrono::NaiveDate) -> String {
    let mut out = String::new();
    out.push_str("ID    TITLE                                PRIORITY  STATUS       DUE\n");
    out.push_str("----  -----------------------------------  --------  -----------  ----------\n");

    for task in tasks {
        let due = match task.due_date {
            Some(date) if task.is_overdue(today) => format!("{} (overdue)", date),
            Some(date) => date.to_string(),
            None => "-".to_string(),
        };
        out.push_str(&format!(
            "{:<4}  {:<35}  {:<8}  {:<11}  {}\n",
            task.id,
            truncate(&task.title, 35),
            task.priority,
            task.status,
            due
        ));
    }

    out
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(max_len.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

fn format_stats(stats: &TaskStats) -> String {
    format!(
        "Total Tasks:  {}\n  {}% completion rate\nCompleted:    {}\nIn Progress:  {}\nTo Do:        {}\n",
        stats.total, stats.completion_rate, stats.completed, stats.in_progress, stats.todo
    )
}

// ============================================================================
// config
// ============================================================================

fn handle_config_command(args: &[String]) -> Result<()> {
    let Some(sub) = args.first() else {
        return config::show_config();
    };

    let value = || args.get(1).context(format!("Usage: tdash config {} <value>", sub));

    match sub.as_str() {
        "show" => config::show_config(),
        "path" => {
            println!("{}", config::get_config_path()?.display());
            Ok(())
        }
        "motion" => config::set_motion(config::parse_switch(value()?)?),
        "seed" => config::set_seed(config::parse_switch(value()?)?),
        "log-level" => config::set_log_level(value()?.clone()),
        other => bail!(
            "unknown config option: {}\nAvailable: show, path, motion, seed, log-level",
            other
        ),
    }
}

/// 打印帮助信息
fn print_help() {
    println!("Task Dashboard (tdash) - manage your tasks in the terminal\n");
    println!("Usage:");
    println!("  tdash                   Start the TUI");
    println!("  tdash <command> [args]  Run a CLI command");
    println!("  tdash --help            Show this help");
    println!("  tdash --version         Show version\n");

    println!("Commands:");
    println!("  list [--search TEXT] [--status S] [--priority P] [--json]");
    println!("                          List the demo tasks (S: all|todo|in-progress|completed,");
    println!("                          P: all|low|medium|high)");
    println!("  stats                   Show task statistics");
    println!("  config show             Show the current configuration");
    println!("  config path             Print the config file path");
    println!("  config motion on|off    Pulse overdue cards");
    println!("  config seed on|off      Load demo tasks on startup");
    println!("  config log-level LEVEL  Set the log filter (RUST_LOG wins)\n");

    println!("Examples:");
    println!("  tdash list --status todo --priority high");
    println!("  tdash list --search schema --json");
    println!("  tdash config motion off");
}

/// 打印版本信息
fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const NAME: &str = env!("CARGO_PKG_NAME");
    println!("{} {}", NAME, VERSION);
}
