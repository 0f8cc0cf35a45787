//! mdmail-mailer - Markdown 邮件发送核心
//!
//! 把 markdown 正文渲染成 HTML，与原文一起作为 multipart/alternative
//! 交给注入的传输层发送：
//! - 主题提取（正文第一行，去掉标题井号）
//! - 渲染适配（固定渲染选项）
//! - 传输适配（panic 与返回错误走同一条错误通道）
//! - Mailer 门面与生命周期（Open → Closed → Destroyed）

mod mailer;
mod render;
mod request;
mod subject;
mod transport;

pub use mailer::{LifecycleState, Mailer, MailerBuilder};
pub use render::RenderAdapter;
pub use request::MailRequest;
pub use subject::{FALLBACK_SUBJECT, SubjectExtractor, extract_subject};
pub use transport::TransportAdapter;
