//! LLM 模块
//!
//! 定义文本补全接口和请求类型。具体的网络实现由调用方提供。

mod client;
mod types;

pub use client::TextCompletion;
pub use types::*;
