//! ports - 抽象 trait 层
//!
//! 定义 Mailer 依赖的能力接口：邮件传输与 Markdown 渲染

mod message;
mod renderer;
mod transport;

pub use message::*;
pub use renderer::*;
pub use transport::*;
