//! 目录遍历
//!
//! 递归发现源码文件并逐个解析。单个文件的失败记录为 [`ErrorRecord`]，不会中断遍历。

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::extractor::extract_definitions;
use super::types::{DefinitionRecord, DirectoryResult, FileResult};
use crate::error::{DocError, DocResult, ErrorRecord};

/// 遍历目录并解析所有匹配的源码文件
pub fn walk_directory(
    root: &Path,
    extensions: &[String],
    ignore_patterns: &[glob::Pattern],
) -> DocResult<DirectoryResult> {
    if !root.is_dir() {
        return Err(DocError::not_found(root));
    }

    info!("Starting directory walk: {}", root.display());
    let mut results = DirectoryResult::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // 根目录本身不参与忽略匹配
            e.depth() == 0 || !is_ignored(&e.file_name().to_string_lossy(), ignore_patterns)
        })
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        // 指向文件的符号链接按目标解析；指向目录的符号链接不进入
        if !is_file(&entry) || !has_extension(entry.path(), extensions) {
            continue;
        }

        let key = entry.path().to_string_lossy().to_string();
        let result = match parse_path(entry.path()) {
            Ok(items) => {
                debug!("Parsed {}: {} definitions", key, items.len());
                FileResult::Definitions(items)
            }
            Err(e) => {
                warn!("Failed to parse {}: {}", key, e);
                FileResult::Error(ErrorRecord::from(&e))
            }
        };
        results.insert(key, result);
    }

    let failed = results.values().filter(|r| r.is_error()).count();
    info!(
        "Directory walk completed: {} files, {} failed",
        results.len(),
        failed
    );

    Ok(results)
}

/// 读取并解析单个文件
pub(super) fn parse_path(path: &Path) -> DocResult<Vec<DefinitionRecord>> {
    let content = fs::read_to_string(path).map_err(|source| DocError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extract_definitions(&path.to_string_lossy(), &content)
}

fn is_file(entry: &walkdir::DirEntry) -> bool {
    if entry.path_is_symlink() {
        entry.path().is_file()
    } else {
        entry.file_type().is_file()
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}

fn is_ignored(name: &str, patterns: &[glob::Pattern]) -> bool {
    patterns.iter().any(|p| p.matches(name))
}
