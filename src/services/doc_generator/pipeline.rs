//! 文档建议流水线
//!
//! 解析文件或目录，为每个函数记录依次请求文档，并格式化为待审阅的建议。
//! 只产出文本，不修改源文件。

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

use super::formatter::{wrap_docstring, DocStyle};
use super::generator::CompletionService;
use crate::config::AppConfig;
use crate::error::{DocError, DocResult, ErrorRecord};
use crate::services::code_parser::{CodeParser, DefinitionRecord, FileResult};

/// 单个函数的文档建议
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocProposal {
    pub file: String,
    pub name: String,
    pub line: usize,
    pub signature: String,
    /// 已格式化的文档字符串字面量
    pub docstring: String,
}

impl fmt::Display for DocProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {}::{} ---", self.file, self.name)?;
        writeln!(f, "{}", self.docstring)
    }
}

/// 流水线结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub proposals: Vec<DocProposal>,
    /// 解析失败的文件
    pub failures: BTreeMap<String, ErrorRecord>,
}

/// 文档建议流水线
pub struct DocPipeline {
    parser: CodeParser,
    style: DocStyle,
}

impl DocPipeline {
    pub fn new(parser: CodeParser, style: DocStyle) -> Self {
        Self { parser, style }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(CodeParser::new(config.parser.clone()), config.doc_style)
    }

    /// 为文件或目录中的所有函数生成文档建议
    pub async fn propose(
        &self,
        path: impl AsRef<Path>,
        service: &dyn CompletionService,
    ) -> DocResult<PipelineReport> {
        let path = path.as_ref();
        let mut report = PipelineReport::default();

        if path.is_dir() {
            let results = self.parser.parse_directory(path)?;
            for (file, result) in results {
                match result {
                    FileResult::Definitions(items) => {
                        self.propose_items(&file, &items, service, &mut report).await;
                    }
                    FileResult::Error(record) => {
                        warn!("Skipping {}: {}", file, record.message);
                        report.failures.insert(file, record);
                    }
                }
            }
        } else if path.is_file() {
            let items = self.parser.parse_file(path)?;
            self.propose_items(&path.to_string_lossy(), &items, service, &mut report)
                .await;
        } else {
            return Err(DocError::not_found(path));
        }

        info!(
            "Docstring proposals for {}: {} generated, {} files failed",
            path.display(),
            report.proposals.len(),
            report.failures.len()
        );
        Ok(report)
    }

    async fn propose_items(
        &self,
        file: &str,
        items: &[DefinitionRecord],
        service: &dyn CompletionService,
        report: &mut PipelineReport,
    ) {
        // 类记录跳过：其方法已作为独立的函数记录出现
        for func in items.iter().filter_map(DefinitionRecord::as_function) {
            let signature = func.signature();
            let context = func.existing_doc.as_deref().unwrap_or("");
            let generated = service.generate(&signature, context).await;

            report.proposals.push(DocProposal {
                file: file.to_string(),
                name: func.name.clone(),
                line: func.source_line,
                docstring: wrap_docstring(&func.name, &generated, self.style),
                signature,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// 回显签名和上下文
    #[derive(Default)]
    struct EchoService {
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl CompletionService for EchoService {
        async fn generate(&self, signature: &str, context: &str) -> String {
            self.calls
                .lock()
                .unwrap()
                .push((signature.to_string(), context.to_string()));
            format!("Doc for {}", signature)
        }
    }

    const GREETER: &str = "\
class Greeter:
    \"\"\"Greets.\"\"\"

    def hello(self, name):
        \"\"\"Say hello.\"\"\"
        return name

def add(a, b):
    return a + b
";

    #[tokio::test]
    async fn test_propose_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("greeter.py");
        fs::write(&path, GREETER).unwrap();

        let service = EchoService::default();
        let pipeline = DocPipeline::new(CodeParser::default(), DocStyle::Google);
        let report = pipeline.propose(&path, &service).await.unwrap();

        let signatures: Vec<&str> = report.proposals.iter().map(|p| p.signature.as_str()).collect();
        assert_eq!(signatures, vec!["add(a, b)", "hello(self, name)"]);
        assert!(report.failures.is_empty());

        let add = &report.proposals[0];
        assert_eq!(add.line, 8);
        assert_eq!(add.docstring, "\"\"\"Doc for add(a, b)\n\"\"\"");

        let calls = service.calls.lock().unwrap();
        assert_eq!(calls[1], ("hello(self, name)".to_string(), "Say hello.".to_string()));
    }

    #[tokio::test]
    async fn test_propose_directory_collects_failures() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok.py"), "def ok():\n    pass\n").unwrap();
        fs::write(dir.path().join("broken.py"), "def broken(:\n    pass\n").unwrap();

        let service = EchoService::default();
        let pipeline = DocPipeline::from_config(&AppConfig {
            doc_style: DocStyle::Plain,
            ..AppConfig::default()
        });
        let report = pipeline.propose(dir.path(), &service).await.unwrap();

        assert_eq!(report.proposals.len(), 1);
        assert_eq!(report.proposals[0].docstring, "\"\"\"Doc for ok()\"\"\"");
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures.keys().all(|k| k.ends_with("broken.py")));
    }

    #[tokio::test]
    async fn test_propose_invalid_single_file_is_hard_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.py");
        fs::write(&path, "class :\n").unwrap();

        let pipeline = DocPipeline::new(CodeParser::default(), DocStyle::Google);
        let err = pipeline.propose(&path, &EchoService::default()).await.unwrap_err();
        assert!(matches!(err, DocError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_propose_missing_path() {
        let dir = TempDir::new().unwrap();
        let pipeline = DocPipeline::new(CodeParser::default(), DocStyle::Google);
        let err = pipeline
            .propose(dir.path().join("missing"), &EchoService::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DocError::NotFound { .. }));
    }

    #[test]
    fn test_proposal_display() {
        let proposal = DocProposal {
            file: "src/math.py".to_string(),
            name: "add".to_string(),
            line: 1,
            signature: "add(a, b)".to_string(),
            docstring: "\"\"\"Add.\n\"\"\"".to_string(),
        };
        assert_eq!(proposal.to_string(), "--- src/math.py::add ---\n\"\"\"Add.\n\"\"\"\n");
    }
}
