//! 跳转落点计算
//!
//! 词边界策略在可见切片上做有界扫描（双向各 128 字符），
//! 不会为一次跳转物化整篇文档；超长连写词按窗口边缘截断。

use unicode_xid::UnicodeXID;

use crate::core::host::VisibleSlice;
use crate::models::FlashMatch;
use crate::services::config::JumpPosition;

const WORD_SCAN_WINDOW: usize = 128;

fn is_word_char(c: char) -> bool {
    c.is_xid_start() || c.is_xid_continue() || c == '_'
}

/// 选定匹配 + 落点策略 -> 目标字符偏移。
/// 词策略拿不到切片上下文时退化为匹配起点。
pub fn compute_jump_offset(
    m: &FlashMatch,
    policy: JumpPosition,
    slice: Option<&VisibleSlice>,
) -> usize {
    match policy {
        JumpPosition::MatchStart => m.index,
        JumpPosition::MatchLastChar => m.index + m.len.saturating_sub(1),
        JumpPosition::AfterMatch => m.end(),
        JumpPosition::WordStart => word_start(m, slice).unwrap_or(m.index),
        JumpPosition::WordEnd => word_end(m, slice)
            .map(|end| end.saturating_sub(1))
            .unwrap_or(m.index),
        JumpPosition::AfterWordEnd => word_end(m, slice).unwrap_or(m.index),
    }
}

fn word_start(m: &FlashMatch, slice: Option<&VisibleSlice>) -> Option<usize> {
    let slice = slice?;
    let rel = m.index.checked_sub(slice.base_offset)?;
    let chars: Vec<char> = slice.text.chars().collect();
    if rel > chars.len() {
        return None;
    }

    let mut start = rel;
    let mut steps = 0;
    while start > 0 && steps < WORD_SCAN_WINDOW && is_word_char(chars[start - 1]) {
        start -= 1;
        steps += 1;
    }
    Some(slice.base_offset + start)
}

/// 词尾后一位；WordEnd 策略再减一落在词尾字符上
fn word_end(m: &FlashMatch, slice: Option<&VisibleSlice>) -> Option<usize> {
    let slice = slice?;
    let rel_end = m.end().checked_sub(slice.base_offset)?;
    let chars: Vec<char> = slice.text.chars().collect();
    if rel_end > chars.len() {
        return None;
    }

    let mut end = rel_end;
    let mut steps = 0;
    while end < chars.len() && steps < WORD_SCAN_WINDOW && is_word_char(chars[end]) {
        end += 1;
        steps += 1;
    }
    Some(slice.base_offset + end)
}

#[cfg(test)]
#[path = "../../tests/unit/flash/jump.rs"]
mod tests;
