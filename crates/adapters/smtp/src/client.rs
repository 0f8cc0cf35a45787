//! SMTP 传输实现

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::Response;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use mdmail_config::TransportConfig;
use mdmail_errors::{AppError, AppResult};
use mdmail_ports::{
    Envelope, MailResult, MailTransport, OutgoingMessage, SendInfo, TransportFactory,
};
use parking_lot::RwLock;
use secrecy::ExposeSecret;
use tracing::{debug, info};
use uuid::Uuid;

type Inner = Arc<AsyncSmtpTransport<Tokio1Executor>>;

/// 基于 lettre 的 SMTP 传输
///
/// 未启用连接池，每次发送建立一个连接；关闭后丢弃底层传输
pub struct SmtpTransport {
    host: String,
    inner: RwLock<Option<Inner>>,
}

impl SmtpTransport {
    /// 从配置构建 SMTP 传输（不建立连接）
    pub fn from_config(config: &TransportConfig) -> AppResult<Self> {
        let credentials = Credentials::new(
            config.auth.user.clone(),
            config.auth.pass.expose_secret().clone(),
        );

        let transport = if config.secure_connection {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| AppError::transport(format!("Failed to create SMTP transport: {}", e)))?
        .port(config.port)
        .credentials(credentials)
        .timeout(Some(Duration::from_secs(config.timeout_secs)))
        .build();

        debug!(
            host = %config.host,
            port = config.port,
            secure = config.secure_connection,
            "SMTP transport created"
        );

        Ok(Self {
            host: config.host.clone(),
            inner: RwLock::new(Some(Arc::new(transport))),
        })
    }

    fn transport(&self) -> AppResult<Inner> {
        self.inner
            .read()
            .clone()
            .ok_or_else(|| AppError::transport("SMTP transport is closed"))
    }

    /// 构建 multipart/alternative 邮件
    fn build_message(message: &OutgoingMessage, message_id: &str) -> AppResult<Message> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|e| AppError::validation(format!("Invalid from address: {}", e)))?;

        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| AppError::validation(format!("Invalid to address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject)
            .message_id(Some(message_id.to_string()))
            .multipart(MultiPart::alternative_plain_html(
                message.text.clone(),
                message.html.clone(),
            ))
            .map_err(|e| AppError::internal(format!("Failed to build message: {}", e)))
    }
}

/// 生成 `<uuid@发件域名>` 形式的 Message-ID
fn new_message_id(from: &str) -> String {
    let domain = from
        .rsplit_once('@')
        .map(|(_, domain)| domain.trim_end_matches('>'))
        .filter(|domain| !domain.is_empty())
        .unwrap_or("localhost");
    format!("<{}@{}>", Uuid::new_v4(), domain)
}

/// 信封与 SMTP 响应转换为发送结果
fn mail_result(
    message_id: String,
    envelope: &lettre::address::Envelope,
    response: &Response,
) -> MailResult {
    let to: Vec<String> = envelope.to().iter().map(|a| a.to_string()).collect();

    MailResult {
        info: SendInfo {
            message_id,
            envelope: Envelope {
                from: envelope.from().map(|a| a.to_string()),
                to: to.clone(),
            },
            accepted: to,
            rejected: Vec::new(),
            pending: Vec::new(),
        },
        response: format!(
            "{} {}",
            response.code(),
            response
                .message()
                .collect::<Vec<_>>()
                .join(" ")
        ),
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn verify(&self) -> AppResult<serde_json::Value> {
        let transport = self.transport()?;

        let connected = transport
            .test_connection()
            .await
            .map_err(|e| AppError::transport(format!("SMTP verification failed: {}", e)))?;

        if !connected {
            return Err(AppError::transport(format!(
                "SMTP server {} did not accept the connection",
                self.host
            )));
        }

        debug!(host = %self.host, "SMTP connection verified");
        Ok(serde_json::Value::Bool(true))
    }

    async fn send(&self, message: OutgoingMessage) -> AppResult<MailResult> {
        let transport = self.transport()?;
        let message_id = new_message_id(&message.from);
        let email = Self::build_message(&message, &message_id)?;
        let envelope = email.envelope().clone();

        let response = transport
            .send(email)
            .await
            .map_err(|e| AppError::transport(format!("Failed to send email: {}", e)))?;

        info!(to = %message.to, message_id = %message_id, "Email accepted by SMTP server");

        Ok(mail_result(message_id, &envelope, &response))
    }

    fn close(&self) -> AppResult<()> {
        if self.inner.write().take().is_some() {
            debug!(host = %self.host, "SMTP transport closed");
        }
        Ok(())
    }
}

/// 为 Mailer 创建 [`SmtpTransport`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SmtpTransportFactory;

impl TransportFactory for SmtpTransportFactory {
    fn create(&self, config: &TransportConfig) -> AppResult<Arc<dyn MailTransport>> {
        Ok(Arc::new(SmtpTransport::from_config(config)?))
    }
}
