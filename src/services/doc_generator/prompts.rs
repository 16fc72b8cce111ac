//! LLM Prompt 模板

/// 函数文档字符串生成 Prompt
pub const DOCSTRING_PROMPT: &str = "Write a concise docstring for the following function signature:\n\n{signature}\n\nContext:\n{doc}\n";

/// 格式化文档字符串生成 Prompt
pub fn format_docstring_prompt(signature: &str, context: &str) -> String {
    DOCSTRING_PROMPT
        .replace("{signature}", signature)
        .replace("{doc}", context)
}
