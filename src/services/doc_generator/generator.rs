//! 文档生成器
//!
//! 封装文本补全服务：构建 prompt、调用模型，失败时返回占位文本。

use async_trait::async_trait;
use tracing::{debug, error};

use super::prompts;
use crate::config::GeneratorConfig;
use crate::llm::{ChatMessage, ChatOptions, LlmError, TextCompletion};

/// 文档补全服务
///
/// `generate` 总是返回字符串，调用失败由实现方自行兜底，不向外抛出。
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn generate(&self, signature: &str, context: &str) -> String;
}

/// 生成失败时的占位文本
pub fn fallback_docstring(signature: &str) -> String {
    format!("Generated docstring for {}", signature)
}

/// 文档生成器
pub struct DocGenerator<C> {
    client: C,
    config: GeneratorConfig,
}

impl<C: TextCompletion> DocGenerator<C> {
    /// 创建新的文档生成器
    pub fn new(client: C, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    /// 为函数签名生成文档字符串
    pub async fn generate_for_function(&self, signature: &str, context: &str) -> String {
        match self.request(signature, context).await {
            Ok(text) => text,
            Err(e) => {
                error!("LLM generation failed for {}, returning fallback: {}", signature, e);
                fallback_docstring(signature)
            }
        }
    }

    async fn request(&self, signature: &str, context: &str) -> Result<String, LlmError> {
        let messages = vec![ChatMessage::user(prompts::format_docstring_prompt(
            signature, context,
        ))];

        let options = ChatOptions {
            model: self.config.model.clone(),
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        };

        debug!("Requesting docstring: signature={}, model={}", signature, options.model);
        let output = self.client.complete(messages, options).await?;

        let text = output.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl<C: TextCompletion> CompletionService for DocGenerator<C> {
    async fn generate(&self, signature: &str, context: &str) -> String {
        self.generate_for_function(signature, context).await
    }
}
