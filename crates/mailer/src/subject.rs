//! 从 markdown 正文提取主题

/// 提取结果为空时 Mailer 使用的主题
pub const FALLBACK_SUBJECT: &str = "No subject";

/// 主题提取函数签名，可在构造 Mailer 时替换
pub type SubjectExtractor = fn(&str) -> String;

const WHITESPACE: &[char] = &[' ', '\n', '\r', '\t'];
const HEADING: &[char] = &['#', ' ', '\n', '\r', '\t'];

/// 取正文第一行作为主题，并去掉 markdown 标题标记
///
/// 结果可能为空字符串，默认值由调用方决定
pub fn extract_subject(body: &str) -> String {
    let body = body.trim_matches(WHITESPACE);
    let first_line = match body.find('\n') {
        Some(index) => &body[..index],
        None => body,
    };
    first_line.trim_matches(HEADING).to_string()
}
