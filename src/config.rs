//! 全局配置系统
//!
//! 提供线程安全的全局配置单例，包括各层日志级别和新文档的容量提示。
//!
//! # 使用示例
//! ```
//! use fex_script::config::{Config, LogConfig, init, config};
//! use tracing::Level;
//!
//! let cfg = Config {
//!     log: LogConfig {
//!         global: Level::DEBUG,
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! init(cfg);
//! // 之后通过 config() 全局访问
//! assert_eq!(config().log.global, Level::DEBUG);
//! ```

use fex_config::{CapacityConfig, Layer};
use once_cell::sync::OnceCell;
use tracing::Level;

static GLOBAL_CONFIG: OnceCell<Config> = OnceCell::new();

/// 初始化全局配置（必须在任何操作前调用一次）
///
/// # Panics
/// 如果配置已经初始化，会 panic
pub fn init(config: Config) {
    GLOBAL_CONFIG
        .set(config)
        .expect("Config already initialized");
}

/// 尝试初始化全局配置
///
/// 已经初始化时保留原配置并返回 `false`
pub fn try_init(config: Config) -> bool {
    GLOBAL_CONFIG.set(config).is_ok()
}

/// 获取全局配置引用
///
/// # Panics
/// 如果配置未初始化，会 panic
pub fn config() -> &'static Config {
    GLOBAL_CONFIG.get().expect("Config not initialized")
}

/// 检查配置是否已初始化
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

/// 全局配置结构
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// 日志配置
    pub log: LogConfig,
    /// 新文档的容量提示
    pub capacity: CapacityConfig,
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 全局默认日志级别
    pub global: Level,
    /// Document 日志级别（None 表示使用 global）
    pub document: Option<Level>,
    /// Section 日志级别
    pub section: Option<Level>,
    /// Entry 日志级别
    pub entry: Option<Level>,
    /// Arena 日志级别
    pub arena: Option<Level>,
}

impl LogConfig {
    /// 获取指定层的有效日志级别（未单独设置时使用 global）
    pub fn level_for(&self, layer: Layer) -> Level {
        let specific = match layer {
            Layer::Document => self.document,
            Layer::Section => self.section,
            Layer::Entry => self.entry,
            Layer::Arena => self.arena,
        };
        specific.unwrap_or(self.global)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::INFO,
            document: None,
            section: None,
            entry: None,
            arena: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.log.global, Level::INFO);
        assert_eq!(cfg.capacity, CapacityConfig::default());
    }

    #[test]
    fn test_log_level_for() {
        let cfg = LogConfig {
            global: Level::WARN,
            arena: Some(Level::TRACE),
            ..Default::default()
        };

        assert_eq!(cfg.level_for(Layer::Arena), Level::TRACE);
        assert_eq!(cfg.level_for(Layer::Section), Level::WARN);
    }

    #[test]
    fn test_log_level_for_each_layer() {
        let cfg = LogConfig {
            global: Level::ERROR,
            document: Some(Level::INFO),
            section: Some(Level::DEBUG),
            entry: Some(Level::TRACE),
            arena: None,
        };

        assert_eq!(cfg.level_for(Layer::Document), Level::INFO);
        assert_eq!(cfg.level_for(Layer::Section), Level::DEBUG);
        assert_eq!(cfg.level_for(Layer::Entry), Level::TRACE);
        assert_eq!(cfg.level_for(Layer::Arena), Level::ERROR);
    }
}
