//! 统一错误处理模块
//!
//! 定义库级错误类型。单文件解析失败、根路径无效等会作为硬错误返回给调用方；
//! 目录遍历中的单文件失败则降级为 [`ErrorRecord`] 数据。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// 库错误枚举
#[derive(Error, Debug)]
pub enum DocError {
    /// 源码语法错误
    #[error("解析错误 ({path}): {message}")]
    Parse { path: String, message: String },

    /// 路径不存在或类型不符
    #[error("未找到: {path}")]
    NotFound { path: PathBuf },

    /// 读取文件失败
    #[error("IO错误 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl DocError {
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }
}

/// 目录遍历中单个文件的失败记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// 失败信息
    #[serde(rename = "error")]
    pub message: String,
}

impl From<&DocError> for ErrorRecord {
    fn from(err: &DocError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// 便捷类型别名
pub type DocResult<T> = Result<T, DocError>;
