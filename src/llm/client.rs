//! 文本补全接口

use async_trait::async_trait;
use std::sync::Arc;

use super::types::{ChatMessage, ChatOptions, LlmError};

/// 文本补全服务
///
/// 一次调用对应一次模型请求，失败时返回 [`LlmError`]。
/// OpenAI / Anthropic 等具体后端实现此 trait。
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// 发送消息并返回完整的补全文本
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
    ) -> Result<String, LlmError>;
}

#[async_trait]
impl<T: TextCompletion + ?Sized> TextCompletion for Arc<T> {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
    ) -> Result<String, LlmError> {
        (**self).complete(messages, options).await
    }
}
