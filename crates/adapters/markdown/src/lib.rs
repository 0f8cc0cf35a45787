//! Markdown 适配器
//!
//! 基于 comrak 的 [`MarkdownRenderer`](mdmail_ports::MarkdownRenderer) 实现，
//! 支持 GFM 表格、删除线与自动链接

mod renderer;

pub use renderer::ComrakRenderer;
