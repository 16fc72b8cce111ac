//! 源码解析器主模块
//!
//! 解析 Python 源码，提取函数、类、方法及已有的文档字符串

mod extractor;
mod literal;
mod syntax;
pub mod types;
mod walker;

use std::path::Path;
use tracing::{info, warn};

use crate::config::ParserConfig;
use crate::error::{DocError, DocResult};

pub use extractor::extract_definitions;
pub use types::{ClassRecord, DefinitionRecord, DirectoryResult, FileResult, FunctionRecord};

/// 源码解析器
pub struct CodeParser {
    extensions: Vec<String>,
    /// 编译后的忽略模式（glob patterns）
    ignore_patterns: Vec<glob::Pattern>,
}

impl CodeParser {
    /// 创建新的源码解析器
    pub fn new(config: ParserConfig) -> Self {
        let ignore_patterns = config
            .ignore_patterns
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Invalid ignore pattern '{}': {}", p, e);
                    None
                }
            })
            .collect();

        Self {
            extensions: config.extensions,
            ignore_patterns,
        }
    }

    /// 解析已读入内存的源码
    pub fn parse_source(&self, path: &str, source: &str) -> DocResult<Vec<DefinitionRecord>> {
        extract_definitions(path, source)
    }

    /// 解析单个文件
    pub fn parse_file(&self, path: impl AsRef<Path>) -> DocResult<Vec<DefinitionRecord>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DocError::not_found(path));
        }

        let items = walker::parse_path(path)?;
        info!("Parsed {}: {} definitions", path.display(), items.len());
        Ok(items)
    }

    /// 递归解析目录下所有源码文件
    pub fn parse_directory(&self, root: impl AsRef<Path>) -> DocResult<DirectoryResult> {
        walker::walk_directory(root.as_ref(), &self.extensions, &self.ignore_patterns)
    }
}

impl Default for CodeParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}
