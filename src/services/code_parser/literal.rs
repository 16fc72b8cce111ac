//! Python 字符串字面量解码
//!
//! 处理前缀、引号、转义序列，并按 `inspect.cleandoc` 的规则整理文档字符串缩进。

const TAB_SIZE: usize = 8;

/// 解码单个字符串字面量的源码文本
///
/// 字节串、f-string 不算文档字符串，返回 `None`。
pub fn decode_string_literal(text: &str) -> Option<String> {
    let quote_pos = text.find(['\'', '"'])?;
    let (prefix, rest) = text.split_at(quote_pos);
    if !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let prefix = prefix.to_ascii_lowercase();
    if prefix.contains(['b', 'f', 't']) {
        return None;
    }
    let raw = prefix.contains('r');

    let quote = if rest.starts_with("\"\"\"") || rest.starts_with("'''") {
        &rest[..3]
    } else {
        &rest[..1]
    };
    if rest.len() < quote.len() * 2 || !rest.ends_with(quote) {
        return None;
    }
    let body = &rest[quote.len()..rest.len() - quote.len()];

    if raw {
        Some(body.to_string())
    } else {
        Some(unescape(body))
    }
}

/// 处理转义序列
fn unescape(body: &str) -> String {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != '\\' {
            out.push(c);
            i += 1;
            continue;
        }

        let Some(&next) = chars.get(i + 1) else {
            out.push('\\');
            break;
        };
        i += 2;

        match next {
            // 续行
            '\n' => {}
            '\r' => {
                if chars.get(i) == Some(&'\n') {
                    i += 1;
                }
            }
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0b}'),
            '0'..='7' => {
                let mut value = next.to_digit(8).unwrap_or(0);
                let mut taken = 0;
                while taken < 2 {
                    match chars.get(i).and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            i += 1;
                            taken += 1;
                        }
                        None => break,
                    }
                }
                match char::from_u32(value) {
                    Some(ch) => out.push(ch),
                    None => out.push('\u{fffd}'),
                }
            }
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                match read_hex(&chars, i, width) {
                    Some(ch) => {
                        out.push(ch);
                        i += width;
                    }
                    None => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

/// 从 `start` 读取 `width` 位十六进制数并转为字符
fn read_hex(chars: &[char], start: usize, width: usize) -> Option<char> {
    let digits = chars.get(start..start + width)?;
    let mut value: u32 = 0;
    for d in digits {
        value = value * 16 + d.to_digit(16)?;
    }
    char::from_u32(value)
}

/// 展开制表符
fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_SIZE - column % TAB_SIZE;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

/// 整理文档字符串缩进，规则同 `inspect.cleandoc`
pub fn clean_docstring(doc: &str) -> String {
    let mut lines: Vec<String> = doc.split('\n').map(expand_tabs).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let content = line.trim_start().chars().count();
            (content > 0).then(|| line.chars().count() - content)
        })
        .min();

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(margin) = margin {
        for line in lines.iter_mut().skip(1) {
            *line = line.chars().skip(margin).collect();
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.is_empty()).count();
    lines.drain(..leading);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_quotes_and_prefixes() {
        assert_eq!(decode_string_literal(r#""Greets.""#).as_deref(), Some("Greets."));
        assert_eq!(decode_string_literal("'single'").as_deref(), Some("single"));
        assert_eq!(decode_string_literal(r#""""triple""""#).as_deref(), Some("triple"));
        assert_eq!(decode_string_literal("'''also'''").as_deref(), Some("also"));
        assert_eq!(decode_string_literal(r#"u"unicode""#).as_deref(), Some("unicode"));
        assert_eq!(decode_string_literal("''").as_deref(), Some(""));
        assert_eq!(decode_string_literal("\"\"\"\"\"\"").as_deref(), Some(""));
    }

    #[test]
    fn test_bytes_and_fstrings_are_not_docs() {
        assert_eq!(decode_string_literal(r#"b"bytes""#), None);
        assert_eq!(decode_string_literal(r#"Rb"raw bytes""#), None);
        assert_eq!(decode_string_literal(r#"f"{x}""#), None);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(decode_string_literal(r#""a\nb""#).as_deref(), Some("a\nb"));
        assert_eq!(decode_string_literal(r#""tab\there""#).as_deref(), Some("tab\there"));
        assert_eq!(decode_string_literal(r#""q\"q""#).as_deref(), Some("q\"q"));
        assert_eq!(decode_string_literal(r#""\x41é\101""#).as_deref(), Some("AéA"));
        assert_eq!(decode_string_literal(r#""keep \d""#).as_deref(), Some("keep \\d"));
        assert_eq!(decode_string_literal("\"joined \\\nline\"").as_deref(), Some("joined line"));
    }

    #[test]
    fn test_raw_strings_keep_backslashes() {
        assert_eq!(decode_string_literal(r#"r"a\nb""#).as_deref(), Some(r"a\nb"));
        assert_eq!(decode_string_literal(r#"R"""x\ty""""#).as_deref(), Some(r"x\ty"));
    }

    #[test]
    fn test_clean_docstring() {
        let raw = "\n    Summary line.\n\n    Details here.\n        Indented more.\n    ";
        assert_eq!(
            clean_docstring(raw),
            "Summary line.\n\nDetails here.\n    Indented more."
        );
        assert_eq!(clean_docstring("  One liner.  "), "One liner.  ");
        assert_eq!(clean_docstring(""), "");
    }

    #[test]
    fn test_clean_docstring_expands_tabs() {
        assert_eq!(clean_docstring("First.\n\tSecond.\n\t\tThird."), "First.\nSecond.\n        Third.");
    }
}
