//! 应用配置管理
//!
//! 配置从 JSON 文件加载，缺省字段使用默认值。配置对象由调用方显式传递，
//! 不使用全局单例，也不写入进程环境变量。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{DocError, DocResult};
use crate::services::code_parser::types::DEFAULT_EXTENSIONS;
use crate::services::doc_generator::DocStyle;

/// 应用配置结构体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 源码扫描配置
    #[serde(default)]
    pub parser: ParserConfig,

    /// 文档生成配置
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// 文档字符串格式
    #[serde(default)]
    pub doc_style: DocStyle,
}

/// 源码扫描配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// 扫描的文件扩展名（不含点）
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// 忽略的文件/目录名（glob）
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

/// 文档生成配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// 模型名称
    #[serde(default = "default_model")]
    pub model: String,

    /// 温度参数 (0.0 - 2.0)
    #[serde(default)]
    pub temperature: f64,

    /// 最大 token 数
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore_patterns: Vec::new(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 字符串解析配置
    pub fn from_json_str(content: &str) -> DocResult<Self> {
        serde_json::from_str(content).map_err(|e| DocError::Config(format!("解析配置失败: {}", e)))
    }

    /// 从文件加载配置
    pub fn load(path: impl AsRef<Path>) -> DocResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// 文件存在时加载，否则使用默认配置
    pub fn load_or_default(path: impl AsRef<Path>) -> DocResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
