//! 匹配查找器
//!
//! 在一段文本切片里找出搜索串的全部匹配（文档序）。
//! 字面模式：元字符转义后的子串正则；拼音模式下再叠加双码窗口扫描，
//! 两路结果按 (index, len) 去重合并。

use regex::Regex;
use tracing::{debug, warn};

use crate::models::{sort_and_dedup, FlashMatch, MatchOrigin};
use crate::services::config::{FlashConfig, InputMode};
use crate::services::pinyin::{split_tokens, PinyinIndex};

/// 字节偏移 -> 字符偏移的单调游标，匹配结果升序时避免重复扫描
struct CharCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    fn char_offset(&mut self, byte_target: usize) -> usize {
        while self.byte < byte_target {
            match self.text[self.byte..].chars().next() {
                Some(c) => {
                    self.byte += c.len_utf8();
                    self.chars += 1;
                }
                None => break,
            }
        }
        self.chars
    }
}

pub struct MatchFinder {
    case_sensitive: bool,
    input_mode: InputMode,
    max_matches: usize,
    pinyin: PinyinIndex,
}

impl MatchFinder {
    pub fn new(config: &FlashConfig) -> Self {
        Self {
            case_sensitive: config.case_sensitive,
            input_mode: config.input_mode,
            max_matches: config.max_matches.max(1),
            pinyin: PinyinIndex::new(),
        }
    }

    /// 全部匹配，index 升序、同位置短匹配在前
    pub fn find(&mut self, search: &str, text: &str, base_offset: usize) -> Vec<FlashMatch> {
        if search.is_empty() {
            return Vec::new();
        }

        let mut matches = self.find_literal(search, text, base_offset);
        if self.input_mode == InputMode::Pinyin {
            matches.extend(self.find_phonetic(search, text, base_offset));
            sort_and_dedup(&mut matches);
        }

        if matches.len() > self.max_matches {
            warn!(
                total = matches.len(),
                cap = self.max_matches,
                "match volume over cap, truncating"
            );
            matches.truncate(self.max_matches);
        }
        matches
    }

    fn find_literal(&self, search: &str, text: &str, base_offset: usize) -> Vec<FlashMatch> {
        let escaped = regex::escape(search);
        let pattern = if self.case_sensitive {
            escaped
        } else {
            format!("(?i){escaped}")
        };
        let regex = match Regex::new(&pattern) {
            Ok(regex) => regex,
            Err(err) => {
                // 转义后的字面量不应编译失败，失败也只降级为无匹配
                warn!(error = %err, "literal pattern failed to compile");
                return Vec::new();
            }
        };

        let mut matches = Vec::new();
        let mut cursor = CharCursor::new(text);
        let mut byte_pos = 0usize;
        while byte_pos <= text.len() {
            let Some(found) = regex.find_at(text, byte_pos) else {
                break;
            };
            let char_start = cursor.char_offset(found.start());
            let char_len = found.as_str().chars().count();
            matches.push(FlashMatch::new(
                base_offset + char_start,
                char_len,
                found.as_str(),
                MatchOrigin::Literal,
            ));
            if matches.len() >= self.max_matches {
                break;
            }

            byte_pos = if found.end() > found.start() {
                found.end()
            } else {
                // 零宽匹配强制步进，保证终止
                match text[found.start()..].chars().next() {
                    Some(c) => found.start() + c.len_utf8(),
                    None => break,
                }
            };
        }
        matches
    }

    /// 拼音窗口扫描。搜索串含非字母时拼音路直接为空。
    fn find_phonetic(&mut self, search: &str, text: &str, base_offset: usize) -> Vec<FlashMatch> {
        if search.is_empty() || !search.chars().all(|c| c.is_ascii_alphabetic()) {
            return Vec::new();
        }
        let tokens = split_tokens(&search.to_ascii_lowercase());
        let window = tokens.len();
        let chars: Vec<char> = text.chars().collect();
        if window == 0 || chars.len() < window {
            return Vec::new();
        }

        let mut matches = Vec::new();
        for start in 0..=chars.len() - window {
            let run = &chars[start..start + window];
            if self.pinyin.run_matches(run, &tokens) {
                matches.push(FlashMatch::new(
                    base_offset + start,
                    window,
                    run.iter().collect::<String>(),
                    MatchOrigin::Phonetic,
                ));
                if matches.len() >= self.max_matches {
                    debug!(cap = self.max_matches, "phonetic scan hit cap");
                    break;
                }
            }
        }
        matches
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/services/finder.rs"]
mod tests;
