//! 用户正则跳转变体的模式守卫
//!
//! 一次性（非增量）的正则跳转允许用户输入任意模式，编译前先做
//! 静态检查：长度上限、嵌套量词形状。编译失败或被拒都以值返回，
//! 调用方映射为"空结果 + 诊断信息"，永远不会向宿主抛错。

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::models::{FlashMatch, MatchOrigin};

pub const MAX_PATTERN_LEN: usize = 256;

pub type Result<T> = std::result::Result<T, PatternError>;

#[derive(Debug)]
pub enum PatternError {
    TooLong(usize),
    Unsafe(&'static str),
    Invalid(String),
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternError::TooLong(len) => {
                write!(f, "pattern too long: {} > {}", len, MAX_PATTERN_LEN)
            }
            PatternError::Unsafe(reason) => write!(f, "unsafe pattern: {}", reason),
            PatternError::Invalid(msg) => write!(f, "invalid pattern: {}", msg),
        }
    }
}

impl std::error::Error for PatternError {}

/// 量词紧跟在内部含量词的分组后面，是灾难性回溯的典型形状
fn has_nested_quantifier(pattern: &str) -> bool {
    let mut group_has_quant: Vec<bool> = vec![false];
    let mut closed_group_quant: Option<bool> = None;
    let mut in_class = false;
    let mut escaped = false;
    let mut after_open_paren = false;

    for c in pattern.chars() {
        if escaped {
            escaped = false;
            closed_group_quant = None;
            after_open_paren = false;
            continue;
        }
        match c {
            '\\' => {
                escaped = true;
                closed_group_quant = None;
                after_open_paren = false;
            }
            '[' if !in_class => {
                in_class = true;
                after_open_paren = false;
            }
            ']' if in_class => in_class = false,
            _ if in_class => {}
            '(' => {
                group_has_quant.push(false);
                closed_group_quant = None;
                after_open_paren = true;
            }
            ')' => {
                let inner = group_has_quant.pop().unwrap_or(false);
                if let Some(parent) = group_has_quant.last_mut() {
                    *parent |= inner;
                }
                closed_group_quant = Some(inner);
                after_open_paren = false;
            }
            // "(?:" "(?i)" 一类的 ? 是分组语法，不是量词
            '?' if after_open_paren => after_open_paren = false,
            '*' | '+' | '?' | '{' => {
                if closed_group_quant == Some(true) {
                    return true;
                }
                if let Some(top) = group_has_quant.last_mut() {
                    *top = true;
                }
                closed_group_quant = None;
                after_open_paren = false;
            }
            _ => {
                closed_group_quant = None;
                after_open_paren = false;
            }
        }
    }
    false
}

/// 静态检查 + Unicode 模式编译，失败回退到非 Unicode 模式
pub fn compile_user_pattern(pattern: &str, case_sensitive: bool) -> Result<Regex> {
    let len = pattern.chars().count();
    if len > MAX_PATTERN_LEN {
        return Err(PatternError::TooLong(len));
    }
    if has_nested_quantifier(pattern) {
        return Err(PatternError::Unsafe("nested quantifier"));
    }

    let unicode_attempt = RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .unicode(true)
        .build();
    match unicode_attempt {
        Ok(regex) => Ok(regex),
        Err(first_err) => RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .unicode(false)
            .build()
            .map_err(|_| PatternError::Invalid(first_err.to_string())),
    }
}

/// 一次性正则跳转：匹配列表 + 可选诊断，任何失败都表现为空结果
pub fn pattern_targets(
    pattern: &str,
    case_sensitive: bool,
    text: &str,
    base_offset: usize,
    max_matches: usize,
) -> (Vec<FlashMatch>, Option<String>) {
    let regex = match compile_user_pattern(pattern, case_sensitive) {
        Ok(regex) => regex,
        Err(err) => {
            warn!(error = %err, "user pattern rejected");
            return (Vec::new(), Some(err.to_string()));
        }
    };

    let mut matches = Vec::new();
    let mut diagnostic = None;
    let mut char_offset = 0usize;
    let mut byte_offset = 0usize;
    let mut byte_pos = 0usize;
    while byte_pos <= text.len() {
        let Some(found) = regex.find_at(text, byte_pos) else {
            break;
        };
        char_offset += text[byte_offset..found.start()].chars().count();
        byte_offset = found.start();
        matches.push(FlashMatch::new(
            base_offset + char_offset,
            found.as_str().chars().count(),
            found.as_str(),
            MatchOrigin::Literal,
        ));
        if matches.len() >= max_matches {
            diagnostic = Some(format!("match volume over cap {}", max_matches));
            break;
        }

        byte_pos = if found.end() > found.start() {
            found.end()
        } else {
            match text[found.start()..].chars().next() {
                Some(c) => found.start() + c.len_utf8(),
                None => break,
            }
        };
    }
    (matches, diagnostic)
}

#[cfg(test)]
#[path = "../../../tests/unit/services/pattern.rs"]
mod tests;
