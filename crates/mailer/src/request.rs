//! 发信请求

use serde::Deserialize;

/// 一次发信请求
///
/// 字段由类型保证为字符串，空字符串原样交给传输
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MailRequest {
    /// markdown 正文
    pub body: String,
    pub from: String,
    pub to: String,
    /// 为空时从正文第一行提取
    #[serde(default)]
    pub subject: Option<String>,
}

impl MailRequest {
    pub fn new(body: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            from: from.into(),
            to: to.into(),
            subject: None,
        }
    }

    /// 设置显式主题
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_strings_are_kept() {
        let request = MailRequest::new("", "", "");
        assert_eq!(request.body, "");
        assert_eq!(request.to, "");
        assert_eq!(request.subject, None);
    }

    #[test]
    fn test_deserialize_without_subject() {
        let request: MailRequest = serde_json::from_str(
            r##"{"body":"# Hi","from":"a@example.com","to":"b@example.com"}"##,
        )
        .unwrap();
        assert_eq!(request.subject, None);

        let request: MailRequest = serde_json::from_str(
            r##"{"body":"# Hi","from":"a@example.com","to":"b@example.com","subject":"S"}"##,
        )
        .unwrap();
        assert_eq!(request.subject.as_deref(), Some("S"));
    }

    #[test]
    fn test_deserialize_missing_body_fails() {
        let result: Result<MailRequest, _> =
            serde_json::from_str(r#"{"from":"a@example.com","to":"b@example.com"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_null_address_fails() {
        let result: Result<MailRequest, _> =
            serde_json::from_str(r#"{"body":"x","from":null,"to":"b@example.com"}"#);
        assert!(result.is_err());

        let result: Result<MailRequest, _> =
            serde_json::from_str(r#"{"body":"x","from":"a@example.com","to":7}"#);
        assert!(result.is_err());
    }
}
