//! 日志初始化

use clap::ValueEnum;
use tracing_subscriber::{EnvFilter, fmt};

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// 未设置 `RUST_LOG` 时使用的过滤规则
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "cyberblog_rs=debug"
    } else {
        "cyberblog_rs=info"
    }
}

/// 初始化全局 tracing subscriber，`RUST_LOG` 优先于 `--verbose`
pub fn init_tracing(verbose: bool, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    match format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "cyberblog_rs=info");
        assert_eq!(default_filter(true), "cyberblog_rs=debug");
    }
}
