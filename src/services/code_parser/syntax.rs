//! Python 语法树
//!
//! 使用 tree-sitter 解析源码，再降级为只包含提取所需节点的封闭 AST：
//! 模块、函数定义、类定义、字符串表达式语句，其余语句只保留其内部嵌套的语句块。

use tree_sitter::{Node, Parser};

use super::literal::{clean_docstring, decode_string_literal};

/// 模块（文件）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub body: Vec<Stmt>,
}

/// 语句
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    FunctionDef(FunctionDef),
    ClassDef(ClassDef),
    /// 表达式语句
    Expr(Literal),
    /// 复合语句（if/for/while/try/with/match 等），保存其所有子语句块中的语句
    Compound(Vec<Stmt>),
    /// 其他简单语句
    Other,
}

/// 表达式语句的值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// 已解码的字符串字面量
    Str(String),
    NonStr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Stmt>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub name: String,
    pub body: Vec<Stmt>,
    pub line: usize,
}

/// 取语句块的文档字符串：首条语句必须是字符串表达式
pub fn docstring(body: &[Stmt]) -> Option<String> {
    match body.first() {
        Some(Stmt::Expr(Literal::Str(text))) => Some(clean_docstring(text)),
        _ => None,
    }
}

/// 解析 Python 源码
///
/// 语法树中存在 ERROR / MISSING 节点，或含有 Python 2 专有语句时返回错误描述。
pub fn parse_module(source: &str) -> Result<Module, String> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::language())
        .map_err(|e| format!("failed to load Python grammar: {}", e))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| "parser produced no syntax tree".to_string())?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(describe_error(root));
    }

    let src = source.as_bytes();
    if let Some(node) = first_legacy_statement(root, src) {
        let pos = node.start_position();
        return Err(format!(
            "invalid syntax at line {}, column {}",
            pos.row + 1,
            pos.column + 1
        ));
    }

    Ok(Module {
        body: lower_block(root, src),
    })
}

/// 定位第一个错误节点并生成描述
fn describe_error(root: Node) -> String {
    match first_error(root) {
        Some(node) => {
            let pos = node.start_position();
            if node.is_missing() {
                format!(
                    "missing \"{}\" at line {}, column {}",
                    node.kind(),
                    pos.row + 1,
                    pos.column + 1
                )
            } else {
                format!("invalid syntax at line {}, column {}", pos.row + 1, pos.column + 1)
            }
        }
        None => "invalid syntax".to_string(),
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

/// 查找 `print x` / `exec code` 形式的 Python 2 语句
///
/// `print (x)` 和 `print >> f, x` 在 Python 3 中仍是合法表达式，不视为错误。
fn first_legacy_statement<'a>(node: Node<'a>, src: &[u8]) -> Option<Node<'a>> {
    match node.kind() {
        "exec_statement" => return Some(node),
        "print_statement" => {
            let mut cursor = node.walk();
            let chevron = node
                .named_children(&mut cursor)
                .any(|child| child.kind() == "chevron");
            let parenthesized = node
                .child_by_field_name("argument")
                .is_some_and(|arg| src.get(arg.start_byte()) == Some(&b'('));
            if !chevron && !parenthesized {
                return Some(node);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(found) = first_legacy_statement(child, src) {
            return Some(found);
        }
    }
    None
}

fn node_text(node: Node, src: &[u8]) -> String {
    node.utf8_text(src).map(str::to_string).unwrap_or_default()
}

/// 降级语句块（module 或 block）
fn lower_block(node: Node, src: &[u8]) -> Vec<Stmt> {
    let mut cursor = node.walk();
    let stmts = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .map(|child| lower_stmt(child, src))
        .collect();
    stmts
}

fn lower_stmt(node: Node, src: &[u8]) -> Stmt {
    match node.kind() {
        "function_definition" => Stmt::FunctionDef(lower_function(node, src)),
        "class_definition" => Stmt::ClassDef(lower_class(node, src)),
        "decorated_definition" => node
            .child_by_field_name("definition")
            .map(|def| lower_stmt(def, src))
            .unwrap_or(Stmt::Other),
        "expression_statement" => Stmt::Expr(lower_expression_statement(node, src)),
        _ => {
            let mut nested = Vec::new();
            collect_nested_blocks(node, src, &mut nested);
            if nested.is_empty() {
                Stmt::Other
            } else {
                Stmt::Compound(nested)
            }
        }
    }
}

/// 收集复合语句内部（含 elif/else/except/finally/case 子句）所有语句块
fn collect_nested_blocks(node: Node, src: &[u8], out: &mut Vec<Stmt>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "block" => out.extend(lower_block(child, src)),
            "function_definition" | "class_definition" | "decorated_definition" => {
                out.push(lower_stmt(child, src))
            }
            _ => collect_nested_blocks(child, src, out),
        }
    }
}

fn lower_function(node: Node, src: &[u8]) -> FunctionDef {
    FunctionDef {
        name: node
            .child_by_field_name("name")
            .map(|n| node_text(n, src))
            .unwrap_or_default(),
        parameters: node
            .child_by_field_name("parameters")
            .map(|n| extract_parameters(n, src))
            .unwrap_or_default(),
        body: node
            .child_by_field_name("body")
            .map(|n| lower_block(n, src))
            .unwrap_or_default(),
        line: node.start_position().row + 1,
    }
}

fn lower_class(node: Node, src: &[u8]) -> ClassDef {
    ClassDef {
        name: node
            .child_by_field_name("name")
            .map(|n| node_text(n, src))
            .unwrap_or_default(),
        body: node
            .child_by_field_name("body")
            .map(|n| lower_block(n, src))
            .unwrap_or_default(),
        line: node.start_position().row + 1,
    }
}

/// 提取普通位置/关键字参数名
///
/// `/` 之前的仅位置参数被丢弃；遇到 `*`、`*args`、`**kwargs` 后停止。
fn extract_parameters(node: Node, src: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "identifier" => names.push(node_text(child, src)),
            "typed_parameter" => match child.named_child(0) {
                Some(inner) if inner.kind() == "identifier" => names.push(node_text(inner, src)),
                // *args: T / **kwargs: T
                Some(_) => break,
                None => {}
            },
            "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = child.child_by_field_name("name") {
                    names.push(node_text(name, src));
                }
            }
            "positional_separator" | "/" => names.clear(),
            "keyword_separator" | "*" | "list_splat_pattern" | "dictionary_splat_pattern" => break,
            _ => {}
        }
    }

    names
}

fn lower_expression_statement(node: Node, src: &[u8]) -> Literal {
    if node.named_child_count() != 1 {
        return Literal::NonStr;
    }
    let Some(mut expr) = node.named_child(0) else {
        return Literal::NonStr;
    };

    while expr.kind() == "parenthesized_expression" && expr.named_child_count() == 1 {
        match expr.named_child(0) {
            Some(inner) => expr = inner,
            None => break,
        }
    }

    match expr.kind() {
        "string" => decode_string_literal(&node_text(expr, src))
            .map(Literal::Str)
            .unwrap_or(Literal::NonStr),
        "concatenated_string" => {
            let mut cursor = expr.walk();
            let parts: Option<Vec<String>> = expr
                .named_children(&mut cursor)
                .filter(|part| part.kind() == "string")
                .map(|part| decode_string_literal(&node_text(part, src)))
                .collect();
            parts.map(|p| Literal::Str(p.concat())).unwrap_or(Literal::NonStr)
        }
        _ => Literal::NonStr,
    }
}
