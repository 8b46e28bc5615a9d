//! 日志系统初始化
//!
//! Built on `tracing` and `tracing-subscriber`, with one filter target per
//! document-model layer (`fex::document`, `fex::section`, `fex::entry`,
//! `fex::arena`).
//!
//! # Example
//! ```ignore
//! use fex_script::config::{Config, init};
//! use fex_script::logger::init_logger;
//!
//! init(Config::default());
//! init_logger();
//! ```

use std::io;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer as _,
};

use crate::config;
use fex_config::Layer;
use fex_core::targets;

/// 日志输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 彩色格式化（开发使用）
    #[default]
    Pretty,
    /// 紧凑格式
    Compact,
    /// JSON 格式（工具集成）
    Json,
}

/// Initialise logging with the default format.
///
/// Must be called after `config::init()`.
pub fn init_logger() {
    init_with_format(LogFormat::default());
}

/// Initialise logging with the given format
pub fn init_with_format(format: LogFormat) {
    init_with_file(format, None::<&str>);
}

/// Initialise logging, optionally teeing to a file
///
/// # Arguments
/// * `format` - console format
/// * `file` - log file path, `None` for console only
pub fn init_with_file<P: AsRef<std::path::Path>>(format: LogFormat, file: Option<P>) {
    if !config::is_initialized() {
        panic!("Config must be initialized before logger");
    }

    let filter = layer_targets(&config::config().log);

    if let Some(path) = file {
        let file_handle = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("Failed to open log file");

        let stdout_layer = create_format_layer(format, io::stdout).with_filter(filter.clone());
        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(move || file_handle.try_clone().expect("Failed to clone file handle"))
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(stdout_layer)
            .with(file_layer)
            .init();
    } else {
        let stdout_layer = create_format_layer(format, io::stdout).with_filter(filter);
        tracing_subscriber::registry().with(stdout_layer).init();
    }
}

/// Per-layer target filter from the log configuration
pub fn layer_targets(cfg: &config::LogConfig) -> Targets {
    Layer::ALL
        .iter()
        .fold(Targets::new().with_default(cfg.global), |filter, layer| {
            filter.with_target(targets::for_layer(*layer), cfg.level_for(*layer))
        })
}

fn create_format_layer<W, F>(format: LogFormat, make_writer: F) -> Box<dyn tracing_subscriber::Layer<tracing_subscriber::Registry> + Send + Sync>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
    }
}

/// Simple console logger for tests
#[cfg(test)]
pub fn init_test_logger() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Whether DEBUG output is enabled for a layer
#[inline]
pub fn is_enabled(layer: Layer) -> bool {
    match layer {
        Layer::Document => tracing::enabled!(target: targets::DOCUMENT, tracing::Level::DEBUG),
        Layer::Section => tracing::enabled!(target: targets::SECTION, tracing::Level::DEBUG),
        Layer::Entry => tracing::enabled!(target: targets::ENTRY, tracing::Level::DEBUG),
        Layer::Arena => tracing::enabled!(target: targets::ARENA, tracing::Level::DEBUG),
    }
}

/// 创建指定层的 span
#[macro_export]
macro_rules! layer_span {
    ($layer:expr, $name:expr) => {
        match $layer {
            $crate::Layer::Document => tracing::span!(target: $crate::targets::DOCUMENT, tracing::Level::DEBUG, $name),
            $crate::Layer::Section => tracing::span!(target: $crate::targets::SECTION, tracing::Level::DEBUG, $name),
            $crate::Layer::Entry => tracing::span!(target: $crate::targets::ENTRY, tracing::Level::DEBUG, $name),
            $crate::Layer::Arena => tracing::span!(target: $crate::targets::ARENA, tracing::Level::DEBUG, $name),
        }
    };
    ($layer:expr, $name:expr, $($field:tt)*) => {
        match $layer {
            $crate::Layer::Document => tracing::span!(target: $crate::targets::DOCUMENT, tracing::Level::DEBUG, $name, $($field)*),
            $crate::Layer::Section => tracing::span!(target: $crate::targets::SECTION, tracing::Level::DEBUG, $name, $($field)*),
            $crate::Layer::Entry => tracing::span!(target: $crate::targets::ENTRY, tracing::Level::DEBUG, $name, $($field)*),
            $crate::Layer::Arena => tracing::span!(target: $crate::targets::ARENA, tracing::Level::DEBUG, $name, $($field)*),
        }
    };
}
