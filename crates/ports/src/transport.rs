//! Mail transport trait 定义

use std::sync::Arc;

use async_trait::async_trait;
use mdmail_config::TransportConfig;
use mdmail_errors::AppResult;

use crate::{MailResult, OutgoingMessage};

/// 邮件传输 trait
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// 校验连接与认证，返回值对 Mailer 不透明
    async fn verify(&self) -> AppResult<serde_json::Value>;

    /// 发送一封邮件
    async fn send(&self, message: OutgoingMessage) -> AppResult<MailResult>;

    /// 关闭传输（同步，不等待远端）
    fn close(&self) -> AppResult<()>;
}

/// 传输工厂 trait
///
/// Mailer 构造时调用一次，拿到整个生命周期内共用的传输句柄
pub trait TransportFactory: Send + Sync {
    fn create(&self, config: &TransportConfig) -> AppResult<Arc<dyn MailTransport>>;
}
