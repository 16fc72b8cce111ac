//! Code Doc Generator
//!
//! 解析 Python 源码，提取函数、类及方法的签名和已有文档字符串，
//! 并借助 LLM 补全服务生成文档字符串建议。

pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod services;

pub use config::AppConfig;
pub use error::{DocError, DocResult, ErrorRecord};
pub use services::code_parser::{
    extract_definitions, ClassRecord, CodeParser, DefinitionRecord, DirectoryResult, FileResult,
    FunctionRecord,
};
pub use services::doc_generator::{
    wrap_docstring, CompletionService, DocGenerator, DocPipeline, DocProposal, DocStyle,
    PipelineReport,
};
