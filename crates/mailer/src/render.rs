//! 渲染适配

use std::sync::Arc;

use mdmail_errors::AppResult;
use mdmail_ports::{MarkdownRenderer, RenderOptions};
use tracing::debug;

/// 以固定选项调用注入的 renderer
///
/// 不重试，不改写输出，错误原样返回
#[derive(Clone)]
pub struct RenderAdapter {
    renderer: Arc<dyn MarkdownRenderer>,
    options: RenderOptions,
}

impl RenderAdapter {
    pub fn new(renderer: Arc<dyn MarkdownRenderer>) -> Self {
        Self {
            renderer,
            options: RenderOptions::default(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// 渲染 markdown
    pub async fn render(&self, markdown: &str) -> AppResult<String> {
        debug!(bytes = markdown.len(), "Rendering markdown body");
        self.renderer.render(markdown, &self.options).await
    }
}
