//! 文档字符串格式化

use serde::{Deserialize, Serialize};
use tracing::debug;

/// 文档字符串格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocStyle {
    /// 结束引号前换行
    #[default]
    Google,
    /// 单行包裹
    Plain,
}

/// 将生成的文本包裹为文档字符串字面量
pub fn wrap_docstring(name: &str, text: &str, style: DocStyle) -> String {
    debug!("Formatting docstring for {} ({:?})", name, style);
    match style {
        DocStyle::Google => format!("\"\"\"{}\n\"\"\"", text),
        DocStyle::Plain => format!("\"\"\"{}\"\"\"", text),
    }
}
