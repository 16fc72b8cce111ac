//! 源码结构提取结果类型定义
//!
//! 序列化格式与前端约定保持一致：`type` 标签、`args` / `doc` / `lineno` 字段名。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ErrorRecord;

/// 默认扫描的文件扩展名
pub const DEFAULT_EXTENSIONS: &[&str] = &["py"];

/// 函数（或方法）定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    /// 普通位置/关键字参数名，按声明顺序
    #[serde(rename = "args")]
    pub parameters: Vec<String>,
    /// 函数体首条字符串字面量语句
    #[serde(rename = "doc")]
    pub existing_doc: Option<String>,
    /// `def` 所在行（从 1 开始）
    #[serde(rename = "lineno")]
    pub source_line: usize,
}

impl FunctionRecord {
    /// 生成签名字符串，例如 `add(a, b)`
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.parameters.join(", "))
    }
}

/// 类定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    #[serde(rename = "doc")]
    pub existing_doc: Option<String>,
    /// 类体中直接定义的方法（不含嵌套、不含继承）
    pub methods: Vec<FunctionRecord>,
    #[serde(rename = "lineno")]
    pub source_line: usize,
}

/// 定义记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DefinitionRecord {
    Function(FunctionRecord),
    Class(ClassRecord),
}

impl DefinitionRecord {
    pub fn name(&self) -> &str {
        match self {
            DefinitionRecord::Function(f) => &f.name,
            DefinitionRecord::Class(c) => &c.name,
        }
    }

    pub fn source_line(&self) -> usize {
        match self {
            DefinitionRecord::Function(f) => f.source_line,
            DefinitionRecord::Class(c) => c.source_line,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionRecord> {
        match self {
            DefinitionRecord::Function(f) => Some(f),
            DefinitionRecord::Class(_) => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassRecord> {
        match self {
            DefinitionRecord::Class(c) => Some(c),
            DefinitionRecord::Function(_) => None,
        }
    }
}

/// 单个文件的解析结果：定义列表或失败记录，二者互斥
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileResult {
    Definitions(Vec<DefinitionRecord>),
    Error(ErrorRecord),
}

impl FileResult {
    pub fn is_error(&self) -> bool {
        matches!(self, FileResult::Error(_))
    }

    pub fn definitions(&self) -> Option<&[DefinitionRecord]> {
        match self {
            FileResult::Definitions(items) => Some(items),
            FileResult::Error(_) => None,
        }
    }
}

/// 目录解析结果：文件路径 -> 解析结果
pub type DirectoryResult = BTreeMap<String, FileResult>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hello() -> FunctionRecord {
        FunctionRecord {
            name: "hello".to_string(),
            parameters: vec!["self".to_string()],
            existing_doc: None,
            source_line: 3,
        }
    }

    #[test]
    fn test_signature() {
        let record = FunctionRecord {
            name: "add".to_string(),
            parameters: vec!["a".to_string(), "b".to_string()],
            existing_doc: None,
            source_line: 1,
        };
        assert_eq!(record.signature(), "add(a, b)");

        let empty = FunctionRecord {
            parameters: Vec::new(),
            ..record
        };
        assert_eq!(empty.signature(), "add()");
    }

    #[test]
    fn test_record_wire_format() {
        let class = DefinitionRecord::Class(ClassRecord {
            name: "Greeter".to_string(),
            existing_doc: Some("Greets.".to_string()),
            methods: vec![hello()],
            source_line: 1,
        });

        assert_eq!(
            serde_json::to_value(&class).unwrap(),
            json!({
                "type": "class",
                "name": "Greeter",
                "doc": "Greets.",
                "methods": [{"name": "hello", "args": ["self"], "doc": null, "lineno": 3}],
                "lineno": 1
            })
        );

        let function = DefinitionRecord::Function(hello());
        assert_eq!(serde_json::to_value(&function).unwrap()["type"], "function");
    }

    #[test]
    fn test_file_result_is_untagged() {
        let ok = FileResult::Definitions(vec![DefinitionRecord::Function(hello())]);
        assert!(serde_json::to_value(&ok).unwrap().is_array());

        let failed = FileResult::Error(ErrorRecord {
            message: "boom".to_string(),
        });
        assert_eq!(serde_json::to_value(&failed).unwrap(), json!({"error": "boom"}));
        assert!(failed.is_error());
        assert!(failed.definitions().is_none());
    }
}
