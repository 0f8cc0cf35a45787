//! Mailer 门面

use std::sync::Arc;

use mdmail_config::TransportConfig;
use mdmail_errors::{AppError, AppResult};
use mdmail_ports::{MailResult, MarkdownRenderer, OutgoingMessage, TransportFactory};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::render::RenderAdapter;
use crate::request::MailRequest;
use crate::subject::{FALLBACK_SUBJECT, SubjectExtractor, extract_subject};
use crate::transport::TransportAdapter;

/// 生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Open,
    Closed,
    Destroyed,
}

/// 一个 Mailer 实例持有的能力
struct Channels {
    transport: TransportAdapter,
    renderer: RenderAdapter,
}

enum Lifecycle {
    Open(Arc<Channels>),
    Closed,
    Destroyed,
}

impl Lifecycle {
    fn state(&self) -> LifecycleState {
        match self {
            Self::Open(_) => LifecycleState::Open,
            Self::Closed => LifecycleState::Closed,
            Self::Destroyed => LifecycleState::Destroyed,
        }
    }
}

/// Markdown 邮件发送器
///
/// 每个操作开始时取得能力的快照：关闭或销毁之后发起的操作立即失败，
/// 已经在进行中的操作继续使用快照直到完成。
pub struct Mailer {
    state: Mutex<Lifecycle>,
    extractor: SubjectExtractor,
}

impl Mailer {
    /// 创建 builder
    pub fn builder() -> MailerBuilder {
        MailerBuilder::default()
    }

    /// 用配置、传输工厂和 renderer 创建 Mailer
    pub fn new(
        config: TransportConfig,
        transport_factory: Arc<dyn TransportFactory>,
        renderer: Arc<dyn MarkdownRenderer>,
    ) -> AppResult<Self> {
        Self::builder()
            .config(config)
            .transport_factory(transport_factory)
            .renderer(renderer)
            .build()
    }

    /// 当前生命周期状态
    pub fn state(&self) -> LifecycleState {
        self.state.lock().state()
    }

    /// 发送 markdown 邮件
    ///
    /// 未指定主题时从正文第一行提取，提取为空则使用 "No subject"
    pub async fn send_mail(&self, request: MailRequest) -> AppResult<MailResult> {
        let result = self.dispatch(request).await;

        match &result {
            Ok(sent) => {
                metrics::counter!("mdmail_mail_sent_total").increment(1);
                info!(message_id = %sent.info.message_id, "Mail sent successfully");
            }
            Err(e) => {
                metrics::counter!("mdmail_mail_failed_total", "error" => e.error_code())
                    .increment(1);
                if !e.is_lifecycle() {
                    warn!(error = %e, code = e.error_code(), "Failed to send mail");
                }
            }
        }

        result
    }

    async fn dispatch(&self, request: MailRequest) -> AppResult<MailResult> {
        let channels = self.channels()?;

        let MailRequest {
            body,
            from,
            to,
            subject,
        } = request;

        let subject = match subject {
            Some(subject) => subject,
            None => {
                let extracted = (self.extractor)(&body);
                if extracted.is_empty() {
                    FALLBACK_SUBJECT.to_string()
                } else {
                    extracted
                }
            }
        };

        debug!(to = %to, subject = %subject, "Sending markdown mail");

        let html = channels.renderer.render(&body).await?;

        channels
            .transport
            .send(OutgoingMessage {
                from,
                to,
                subject,
                text: body,
                html,
            })
            .await
    }

    /// 校验传输连接
    pub async fn verify_mailer(&self) -> AppResult<serde_json::Value> {
        let channels = self.channels()?;
        let verified = channels.transport.verify().await?;
        debug!("Transport verified");
        Ok(verified)
    }

    /// 关闭 Mailer
    ///
    /// 底层传输只关闭一次，重复调用不做任何事
    pub fn close_mailer(&self) -> AppResult<()> {
        let previous = {
            let mut state = self.state.lock();
            match state.state() {
                LifecycleState::Open => std::mem::replace(&mut *state, Lifecycle::Closed),
                LifecycleState::Closed => return Ok(()),
                LifecycleState::Destroyed => return Err(AppError::Destroyed),
            }
        };

        match previous {
            Lifecycle::Open(channels) => {
                info!("Closing mailer");
                channels.transport.close()
            }
            _ => Ok(()),
        }
    }

    /// 销毁 Mailer
    ///
    /// 仍处于 Open 时先关闭传输，然后丢弃所有能力引用，之后任何调用都会失败
    pub fn destroy(&self) -> AppResult<()> {
        let previous = {
            let mut state = self.state.lock();
            if state.state() == LifecycleState::Destroyed {
                return Err(AppError::Destroyed);
            }
            std::mem::replace(&mut *state, Lifecycle::Destroyed)
        };

        info!("Destroying mailer");
        match previous {
            Lifecycle::Open(channels) => channels.transport.close(),
            _ => Ok(()),
        }
    }

    fn channels(&self) -> AppResult<Arc<Channels>> {
        match &*self.state.lock() {
            Lifecycle::Open(channels) => Ok(Arc::clone(channels)),
            Lifecycle::Closed => Err(AppError::Closed),
            Lifecycle::Destroyed => Err(AppError::Destroyed),
        }
    }
}

/// [`Mailer`] 的 builder
pub struct MailerBuilder {
    config: Option<TransportConfig>,
    transport_factory: Option<Arc<dyn TransportFactory>>,
    renderer: Option<Arc<dyn MarkdownRenderer>>,
    extractor: SubjectExtractor,
}

impl Default for MailerBuilder {
    fn default() -> Self {
        Self {
            config: None,
            transport_factory: None,
            renderer: None,
            extractor: extract_subject,
        }
    }
}

impl MailerBuilder {
    /// 设置传输配置
    pub fn config(mut self, config: TransportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// 设置传输工厂
    pub fn transport_factory(mut self, factory: Arc<dyn TransportFactory>) -> Self {
        self.transport_factory = Some(factory);
        self
    }

    /// 设置 markdown renderer
    pub fn renderer(mut self, renderer: Arc<dyn MarkdownRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// 替换主题提取函数
    pub fn subject_extractor(mut self, extractor: SubjectExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// 校验参数并创建传输
    pub fn build(self) -> AppResult<Mailer> {
        let config = self
            .config
            .ok_or_else(|| AppError::validation("transport configuration is required"))?;
        let factory = self
            .transport_factory
            .ok_or_else(|| AppError::validation("transport factory is required"))?;
        let renderer = self
            .renderer
            .ok_or_else(|| AppError::validation("markdown renderer is required"))?;

        config.validate()?;

        let transport = factory.create(&config)?;

        debug!(host = %config.host, port = config.port, "Mailer opened");

        Ok(Mailer {
            state: Mutex::new(Lifecycle::Open(Arc::new(Channels {
                transport: TransportAdapter::new(transport),
                renderer: RenderAdapter::new(renderer),
            }))),
            extractor: self.extractor,
        })
    }
}
