//! 服务层模块

pub mod code_parser;
pub mod doc_generator;

pub use code_parser::CodeParser;
pub use doc_generator::{DocGenerator, DocPipeline};
