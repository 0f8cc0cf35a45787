//! 传输适配
//!
//! 调用底层传输时 panic 与返回 `Err` 走同一条错误通道，调用方无法也无需区分

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use mdmail_errors::{AppError, AppResult};
use mdmail_ports::{MailResult, MailTransport, OutgoingMessage};
use tracing::{debug, warn};

/// 包装注入的 [`MailTransport`]
#[derive(Clone)]
pub struct TransportAdapter {
    transport: Arc<dyn MailTransport>,
}

impl TransportAdapter {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// 校验连接，返回底层传输给出的值
    pub async fn verify(&self) -> AppResult<serde_json::Value> {
        guarded("verify", || self.transport.verify()).await
    }

    /// 发送邮件，结果原样返回
    pub async fn send(&self, message: OutgoingMessage) -> AppResult<MailResult> {
        debug!(to = %message.to, subject = %message.subject, "Dispatching message to transport");
        guarded("send", move || self.transport.send(message)).await
    }

    /// 关闭传输
    pub fn close(&self) -> AppResult<()> {
        catch_unwind(AssertUnwindSafe(|| self.transport.close()))
            .map_err(|payload| panicked("close", payload))?
    }
}

/// 在调用和轮询两个阶段都捕获 panic
async fn guarded<'a, T>(
    operation: &'static str,
    call: impl FnOnce() -> BoxFuture<'a, AppResult<T>>,
) -> AppResult<T> {
    let future =
        catch_unwind(AssertUnwindSafe(call)).map_err(|payload| panicked(operation, payload))?;

    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|payload| panicked(operation, payload))?
}

fn panicked(operation: &'static str, payload: Box<dyn Any + Send>) -> AppError {
    let reason = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());

    warn!(operation, reason = %reason, "Transport panicked");
    AppError::transport(format!("transport {} panicked: {}", operation, reason))
}
