//! 文档生成器模块
//!
//! 基于 LLM 为源码中的函数生成文档字符串建议
//!
//! # 功能
//!
//! - 解析单个文件或递归解析目录
//! - 为每个函数签名调用补全服务，失败时使用占位文本
//! - 按指定格式包裹为文档字符串字面量
//!
//! # 使用示例
//!
//! ```ignore
//! use docgen_rs::config::AppConfig;
//! use docgen_rs::services::doc_generator::{DocGenerator, DocPipeline};
//!
//! let config = AppConfig::load_or_default("config.json")?;
//! let generator = DocGenerator::new(my_completion_client, config.generator.clone());
//! let pipeline = DocPipeline::from_config(&config);
//!
//! let report = pipeline.propose("src/", &generator).await?;
//! for proposal in &report.proposals {
//!     println!("{}", proposal);
//! }
//! ```

mod formatter;
mod generator;
mod pipeline;
pub mod prompts;

pub use formatter::{wrap_docstring, DocStyle};
pub use generator::{fallback_docstring, CompletionService, DocGenerator};
pub use pipeline::{DocPipeline, DocProposal, PipelineReport};
