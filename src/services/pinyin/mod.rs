//! 拼音码索引
//!
//! 单个汉字 -> 它的全部双码集合（含多音字读音），按字懒加载缓存。
//! 映射是字符的纯函数，缓存伴随索引实例整个生命周期。

mod table;

use compact_str::CompactString;
use pinyin::ToPinyinMulti;
use rustc_hash::FxHashMap;

pub(crate) use table::{compress, normalize_reading};

/// 键入串切出的一个查询单元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeToken {
    text: CompactString,
    /// 完整双码按字面匹配；末尾悬挂的单字符按前缀匹配
    exact: bool,
}

impl CodeToken {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }
}

/// 从左到右按 2 字符切分，末尾落单的字符是前缀单元
pub fn split_tokens(query: &str) -> Vec<CodeToken> {
    let chars: Vec<char> = query.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len() / 2 + 1);
    let mut i = 0;
    while i < chars.len() {
        if i + 1 < chars.len() {
            let mut text = CompactString::default();
            text.push(chars[i]);
            text.push(chars[i + 1]);
            tokens.push(CodeToken { text, exact: true });
            i += 2;
        } else {
            let mut text = CompactString::default();
            text.push(chars[i]);
            tokens.push(CodeToken { text, exact: false });
            i += 1;
        }
    }
    tokens
}

#[derive(Default)]
pub struct PinyinIndex {
    cache: FxHashMap<char, Vec<CompactString>>,
}

impl PinyinIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 非表意字符返回空集
    pub fn codes_for(&mut self, ch: char) -> &[CompactString] {
        self.cache.entry(ch).or_insert_with(|| {
            let mut codes: Vec<CompactString> = Vec::new();
            if let Some(multi) = ch.to_pinyin_multi() {
                for reading in multi {
                    codes.extend(compress(reading.plain()));
                }
            }
            codes.sort();
            codes.dedup();
            codes
        })
    }

    /// 一个字符是否命中一个查询单元
    pub fn char_matches(&mut self, ch: char, token: &CodeToken) -> bool {
        let codes = self.codes_for(ch);
        if token.exact {
            codes.iter().any(|code| *code == token.text)
        } else {
            codes.iter().any(|code| code.starts_with(token.text.as_str()))
        }
    }

    /// 连续字符逐个命中连续单元才算整体命中
    pub fn run_matches(&mut self, chars: &[char], tokens: &[CodeToken]) -> bool {
        chars.len() == tokens.len()
            && chars
                .iter()
                .zip(tokens.iter())
                .all(|(&ch, token)| self.char_matches(ch, token))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/services/pinyin.rs"]
mod tests;
