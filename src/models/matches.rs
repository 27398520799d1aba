//! 匹配数据模型
//!
//! 每次检测调用都重新生成 FlashMatch，跨按键没有持久身份。
//! 排序约定：index 升序，同位置短匹配在前。

use compact_str::CompactString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOrigin {
    Literal,
    Phonetic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMatch {
    /// 文档绝对字符偏移
    pub index: usize,
    /// 跨越的字符数
    pub len: usize,
    /// 命中的原文
    pub text: CompactString,
    /// 分配的选择键（1-2 字符），未分配为空
    pub label: CompactString,
    pub origin: MatchOrigin,
}

impl FlashMatch {
    pub fn new(index: usize, len: usize, text: impl Into<CompactString>, origin: MatchOrigin) -> Self {
        Self {
            index,
            len,
            text: text.into(),
            label: CompactString::default(),
            origin,
        }
    }

    pub fn end(&self) -> usize {
        self.index + self.len
    }

    pub fn label_first(&self) -> Option<char> {
        self.label.chars().next()
    }

    pub fn has_label(&self, label: &str) -> bool {
        !self.label.is_empty() && self.label == label
    }
}

/// 合并字面与拼音结果后的统一整理：(index, len) 去重 + 文档序排序
pub fn sort_and_dedup(matches: &mut Vec<FlashMatch>) {
    matches.sort_by_key(|m| (m.index, m.len));
    matches.dedup_by_key(|m| (m.index, m.len));
}
