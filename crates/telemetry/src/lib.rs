//! telemetry - 可观测性库
//!
//! 日志统一输出到 stderr，stdout 留给命令输出；指标由 Prometheus recorder 收集

pub use metrics_exporter_prometheus::PrometheusHandle;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 日志格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 人类可读格式（开发环境）
    #[default]
    Pretty,
    /// JSON 格式（生产环境）
    Json,
}

impl LogFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Pretty }
    }
}

/// 初始化 tracing
///
/// `RUST_LOG` 存在时优先于 `log_level`；全局 subscriber 只能安装一次，
/// 重复调用返回错误
pub fn init_tracing(log_level: &str, format: LogFormat) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
}

/// 安装 Prometheus 指标 recorder
///
/// 全局 recorder 只能安装一次，重复调用返回错误
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}
