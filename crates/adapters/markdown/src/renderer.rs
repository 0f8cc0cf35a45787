//! comrak 渲染实现

use async_trait::async_trait;
use comrak::{Options, markdown_to_html};
use mdmail_errors::{AppError, AppResult};
use mdmail_ports::{MarkdownRenderer, RenderOptions};
use tracing::debug;

/// comrak renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct ComrakRenderer;

impl ComrakRenderer {
    pub fn new() -> Self {
        Self
    }

    /// 同步渲染
    pub fn render_sync(markdown: &str, options: &RenderOptions) -> String {
        let mut comrak_options = Options::default();

        comrak_options.extension.table = options.tables;
        comrak_options.extension.strikethrough = options.gfm;
        comrak_options.extension.autolink = options.gfm;
        comrak_options.extension.tasklist = options.gfm;

        // 原始 HTML 转义输出而不是透传
        comrak_options.render.unsafe_ = !options.sanitize;
        comrak_options.render.escape = options.sanitize;
        comrak_options.render.hardbreaks = options.breaks;

        comrak_options.parse.smart = options.smartypants;

        markdown_to_html(markdown, &comrak_options)
    }
}

#[async_trait]
impl MarkdownRenderer for ComrakRenderer {
    async fn render(&self, markdown: &str, options: &RenderOptions) -> AppResult<String> {
        let markdown = markdown.to_string();
        let options = *options;

        // 在 tokio 的 blocking 线程池中执行 CPU 密集的解析
        let html = tokio::task::spawn_blocking(move || Self::render_sync(&markdown, &options))
            .await
            .map_err(|e| AppError::render(format!("Markdown render task failed: {}", e)))?;

        debug!(bytes = html.len(), "Markdown rendered");
        Ok(html)
    }
}
