//! SMTP 适配器
//!
//! 基于 lettre 的 [`MailTransport`](mdmail_ports::MailTransport) 实现：
//! - 隐式 TLS / STARTTLS
//! - multipart/alternative（纯文本 + HTML）
//! - 生成 Message-ID

mod client;

pub use client::{SmtpTransport, SmtpTransportFactory};
