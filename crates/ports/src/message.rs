//! 传输层收发的数据结构

use serde::{Deserialize, Serialize};

/// 交给传输层的完整消息（multipart/alternative 的两个部分）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    /// 原始 markdown，作为 text/plain 部分
    pub text: String,
    /// 渲染后的 HTML，作为 text/html 部分
    pub html: String,
}

/// SMTP 信封
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub from: Option<String>,
    pub to: Vec<String>,
}

/// 投递信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendInfo {
    pub message_id: String,
    pub envelope: Envelope,
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
    pub pending: Vec<String>,
}

/// 发送结果，由传输层给出，Mailer 不做任何改写
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailResult {
    pub info: SendInfo,
    pub response: String,
}
