//! Markdown renderer trait 定义

use async_trait::async_trait;
use mdmail_errors::AppResult;
use serde::{Deserialize, Serialize};

/// Markdown 渲染选项
///
/// 邮件场景下固定使用 [`RenderOptions::default`]，调用方不可配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// GitHub Flavored Markdown
    pub gfm: bool,
    /// GFM 表格
    pub tables: bool,
    /// 单个换行渲染为 `<br>`
    pub breaks: bool,
    /// 转义原始 HTML
    pub sanitize: bool,
    /// 智能标点（弯引号、破折号）
    pub smartypants: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            tables: true,
            breaks: false,
            sanitize: true,
            smartypants: false,
        }
    }
}

/// Markdown 渲染 trait
#[async_trait]
pub trait MarkdownRenderer: Send + Sync {
    /// 将 markdown 渲染为 HTML
    async fn render(&self, markdown: &str, options: &RenderOptions) -> AppResult<String>;
}
