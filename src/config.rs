/// 应用配置管理
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// 逾期任务卡片的闪烁动效
    #[serde(default = "default_true")]
    pub decorative_motion: bool,
    /// 启动时填充示例任务
    #[serde(default = "default_true")]
    pub seed_demo_tasks: bool,
    /// 日志级别（RUST_LOG 优先）
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 日志文件路径，默认写到临时目录
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decorative_motion: true,
            seed_demo_tasks: true,
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl Config {
    /// 实际使用的日志文件路径
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("tdash.log"))
    }
}

/// 获取配置文件路径
/// Windows: %APPDATA%\task-dashboard\config.toml
/// macOS: ~/Library/Application Support/task-dashboard/config.toml
/// Linux: ~/.config/task-dashboard/config.toml
pub fn get_config_path() -> Result<PathBuf> {
    let base_dirs =
        directories::BaseDirs::new().context("failed to determine the user config directory")?;
    Ok(base_dirs.config_dir().join("task-dashboard").join("config.toml"))
}

/// 加载配置
pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path()?)
}

/// 从指定路径加载，文件不存在时返回默认配置
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))?;

    Ok(config)
}

/// 保存配置
pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(config, &get_config_path()?)
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    // 确保目录存在
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;

    Ok(())
}

/// 首次运行检查
/// 返回 (config, is_first_run)
pub fn check_first_run() -> Result<(Config, bool)> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        // 首次运行，写出默认配置
        let config = Config::default();
        save_config_to(&config, &config_path)?;

        Ok((config, true))
    } else {
        Ok((load_config_from(&config_path)?, false))
    }
}

/// 解析 on/off 开关参数
pub fn parse_switch(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => anyhow::bail!("expected on or off, got '{}'", other),
    }
}

/// 更新动效开关
pub fn set_motion(enabled: bool) -> Result<()> {
    let mut config = load_config()?;
    config.decorative_motion = enabled;
    save_config(&config)?;
    println!("✓ decorative motion: {}", on_off(config.decorative_motion));
    Ok(())
}

/// 更新示例任务开关
pub fn set_seed(enabled: bool) -> Result<()> {
    let mut config = load_config()?;
    config.seed_demo_tasks = enabled;
    save_config(&config)?;
    println!("✓ demo tasks: {}", on_off(config.seed_demo_tasks));
    Ok(())
}

/// 更新日志级别
pub fn set_log_level(level: String) -> Result<()> {
    tracing_subscriber::EnvFilter::try_new(&level)
        .with_context(|| format!("invalid log level '{}'", level))?;

    let mut config = load_config()?;
    config.log_level = level;
    save_config(&config)?;
    println!("✓ log level: {}", config.log_level);
    Ok(())
}

/// 显示当前配置
pub fn show_config() -> Result<()> {
    let config = load_config()?;
    println!("Current configuration:");
    println!("  decorative motion: {}", on_off(config.decorative_motion));
    println!("  demo tasks:        {}", on_off(config.seed_demo_tasks));
    println!("  log level:         {}", config.log_level);
    println!("  log file:          {}", config.log_path().display());
    println!();
    println!("Config file: {}", get_config_path()?.display());
    Ok(())
}

pub(crate) fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
