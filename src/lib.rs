//! Fex Script - board configuration script model
//!
//! In-memory model of a board configuration script: an ordered list of named
//! sections, each an ordered list of typed entries (null marker, 32-bit
//! word, byte string, GPIO descriptor).
//!
//! # Architecture
//!
//! ```text
//! fex-config/  - Pure configuration data structures
//! fex-core/    - Document model (pure logic, no IO)
//! src/         - Global configuration and logger initialisation
//! ```
//!
//! # Quick Start
//!
//! ```
//! use fex_script::{new_script, Config, EntryKind};
//!
//! fex_script::init(Config::default());
//! let mut script = new_script().unwrap();
//! script.new_section("target").unwrap().new_null("sw").unwrap();
//!
//! let entry = script.sections().next().unwrap().entries().next().unwrap();
//! assert_eq!(entry.kind(), EntryKind::Null);
//! ```

pub mod config;
pub mod logger;

// 重导出常用类型
pub use config::{Config, LogConfig};
pub use fex_config::{CapacityConfig, Layer};
pub use fex_core::{
    AllocTarget, ByteString, Entry, EntryId, EntryKind, Gpio, Name, Script, ScriptError,
    ScriptResult, Section, SectionId, Value, NAME_MAX,
};
pub use fex_core::targets;
pub use logger::{init_logger, LogFormat};

/// 初始化（使用前先调用）
///
/// Initialises configuration only; call [`logger::init_logger`] separately
/// when log output is wanted.
pub fn init(config: Config) {
    config::init(config);
}

/// Initialise configuration and logging together
pub fn init_with_logger(config: Config, format: LogFormat) {
    config::init(config);
    logger::init_with_format(format);
}

/// Create an empty script using the global capacity hints.
///
/// Falls back to the default configuration if none was initialised.
pub fn new_script() -> ScriptResult<Script> {
    if !config::is_initialized() {
        config::try_init(Config::default());
    }
    Script::with_capacity(&config::config().capacity)
}
