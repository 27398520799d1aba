//! 配置服务：跳转引擎的全部可配置项
//!
//! 支持序列化持久化；alphabet 顺序有意义，重复字符会被忽略。

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::models::FlashTheme;

/// 搜索输入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    #[default]
    Literal,
    /// 字面匹配之外附加拼音双码匹配
    Pinyin,
}

/// 跳转落点策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpPosition {
    #[default]
    MatchStart,
    /// 匹配末字符（end - 1）
    MatchLastChar,
    /// 匹配结束后一位
    AfterMatch,
    /// 所在词的词首（有界回扫）
    WordStart,
    /// 所在词的词尾字符
    WordEnd,
    /// 词尾后一位
    AfterWordEnd,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashConfig {
    /// 标签字母池，顺序即分配顺序。优先排家排键。
    pub alphabet: String,
    /// 开始尝试标签解释前的最小搜索长度
    pub min_search_length: usize,
    pub case_sensitive: bool,
    pub input_mode: InputMode,
    pub jump_position: JumpPosition,
    /// 解析序列中任一键带 Shift 时使用的落点策略
    pub jump_position_shift: JumpPosition,
    /// 仅剩一个候选时立即跳转
    pub auto_jump: bool,
    /// 单次调用处理的匹配数上限，超出截断并记日志
    pub max_matches: usize,
    /// 键盘布局重映射表（原始键 -> 规范键），为空即恒等
    pub key_layout: FxHashMap<char, char>,
    pub theme: FlashTheme,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            alphabet: "asdfghjklqwertyuiopzxcvbnm".to_string(),
            min_search_length: 1,
            case_sensitive: false,
            input_mode: InputMode::Literal,
            jump_position: JumpPosition::MatchStart,
            jump_position_shift: JumpPosition::AfterMatch,
            auto_jump: true,
            max_matches: 300,
            key_layout: FxHashMap::default(),
            theme: FlashTheme::default(),
        }
    }
}

impl FlashConfig {
    /// 清洗后的字母池：小写、去空白、按首次出现去重
    pub fn sanitized_alphabet(&self) -> Vec<char> {
        let mut out: Vec<char> = Vec::with_capacity(self.alphabet.len());
        for c in self.alphabet.chars() {
            if c.is_whitespace() {
                continue;
            }
            let c = c.to_lowercase().next().unwrap_or(c);
            if !out.contains(&c) {
                out.push(c);
            }
        }
        out
    }

    /// 不合理取值回落到默认，配置永远不会让引擎失效
    pub fn sanitize(&mut self) {
        if self.sanitized_alphabet().is_empty() {
            self.alphabet = FlashConfig::default().alphabet;
        }
        if self.max_matches == 0 {
            self.max_matches = FlashConfig::default().max_matches;
        }
    }
}
