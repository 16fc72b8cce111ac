//! 结构提取器
//!
//! 对整棵语法树做一次广度优先遍历，任何嵌套层级的函数和类都会产生一条记录。
//! 类记录的 `methods` 只包含类体的直接子函数；这些方法同时也会作为独立的
//! 函数记录出现在结果中。

use std::borrow::Cow;
use std::collections::VecDeque;

use super::syntax::{docstring, parse_module, ClassDef, FunctionDef, Module, Stmt};
use super::types::{ClassRecord, DefinitionRecord, FunctionRecord};
use crate::error::{DocError, DocResult};

/// 从源码文本提取定义记录
///
/// `path` 仅用于错误信息。源码先去掉 UTF-8 BOM，并把 `\r\n` 和单独的 `\r`
/// 统一为 `\n`。
pub fn extract_definitions(path: &str, source: &str) -> DocResult<Vec<DefinitionRecord>> {
    let source = normalize_source(source);
    let module = parse_module(&source).map_err(|message| DocError::parse(path, message))?;
    Ok(collect_definitions(&module))
}

fn normalize_source(source: &str) -> Cow<'_, str> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    if source.contains('\r') {
        Cow::Owned(source.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(source)
    }
}

fn collect_definitions(module: &Module) -> Vec<DefinitionRecord> {
    let mut items = Vec::new();
    let mut queue: VecDeque<&Stmt> = module.body.iter().collect();

    while let Some(stmt) = queue.pop_front() {
        match stmt {
            Stmt::FunctionDef(func) => {
                items.push(DefinitionRecord::Function(function_record(func)));
                queue.extend(func.body.iter());
            }
            Stmt::ClassDef(class) => {
                items.push(DefinitionRecord::Class(class_record(class)));
                queue.extend(class.body.iter());
            }
            Stmt::Compound(nested) => queue.extend(nested.iter()),
            Stmt::Expr(_) | Stmt::Other => {}
        }
    }

    items
}

fn function_record(func: &FunctionDef) -> FunctionRecord {
    FunctionRecord {
        name: func.name.clone(),
        parameters: func.parameters.clone(),
        existing_doc: docstring(&func.body),
        source_line: func.line,
    }
}

fn class_record(class: &ClassDef) -> ClassRecord {
    let methods = class
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::FunctionDef(func) => Some(function_record(func)),
            _ => None,
        })
        .collect();

    ClassRecord {
        name: class.name.clone(),
        existing_doc: docstring(&class.body),
        methods,
        source_line: class.line,
    }
}
