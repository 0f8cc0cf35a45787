//! 进程运行时

use mdmail_config::AppConfig;
use mdmail_telemetry::{LogFormat, PrometheusHandle, init_metrics, init_tracing};
use tracing::{info, warn};

/// 初始化进程运行时（日志与指标）
///
/// 生产环境或配置了 json 时输出 JSON 日志；指标 recorder 安装失败时返回 `None`
pub fn init_runtime(config: &AppConfig) -> Option<PrometheusHandle> {
    let format = LogFormat::from_json_flag(config.telemetry.json || config.is_production());

    if let Err(e) = init_tracing(&config.telemetry.log_level, format) {
        eprintln!("tracing already initialized: {}", e);
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );

    match init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Failed to install metrics recorder");
            None
        }
    }
}

/// 等待关闭信号
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
