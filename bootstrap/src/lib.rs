//! mdmail-bootstrap - 组装默认能力
//!
//! 从配置创建使用 lettre 传输和 comrak 渲染的 Mailer

mod runtime;

pub use runtime::*;

use std::sync::Arc;

use mdmail_adapter_markdown::ComrakRenderer;
use mdmail_adapter_smtp::SmtpTransportFactory;
use mdmail_config::AppConfig;
use mdmail_errors::AppResult;
use mdmail_mailer::Mailer;
use mdmail_ports::TransportFactory;
use tracing::info;

/// 使用默认 SMTP 传输创建 Mailer
pub fn build_mailer(config: &AppConfig) -> AppResult<Mailer> {
    build_mailer_with(config, Arc::new(SmtpTransportFactory))
}

/// 使用指定传输工厂创建 Mailer，渲染固定为 comrak
pub fn build_mailer_with(
    config: &AppConfig,
    transport_factory: Arc<dyn TransportFactory>,
) -> AppResult<Mailer> {
    let mailer = Mailer::new(
        config.smtp.clone(),
        transport_factory,
        Arc::new(ComrakRenderer::new()),
    )?;

    info!(
        host = %config.smtp.host,
        port = config.smtp.port,
        secure = config.smtp.secure_connection,
        "Mailer ready"
    );

    Ok(mailer)
}
