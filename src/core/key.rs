//! 按键规范化
//!
//! 宿主上报的是原始按键名（单字符或 "Escape" 这类命名键）。
//! 这里把它解析为封闭的 FlashKey 枚举，并提供键盘布局重映射。

use rustc_hash::FxHashMap;

/// 控制器关心的按键类别。未列出的命名键一律 Ignored。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKey {
    Escape,
    Tab,
    Backspace,
    /// 修饰键或其他非可打印键，不改变任何状态
    Ignored,
    Char(char),
}

impl FlashKey {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Escape" | "Esc" => FlashKey::Escape,
            "Tab" => FlashKey::Tab,
            "Backspace" => FlashKey::Backspace,
            _ => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => FlashKey::Char(c),
                    _ => FlashKey::Ignored,
                }
            }
        }
    }
}

/// 布局重映射 + 小写折叠。标签匹配前必须先过这一步。
///
/// layout 是纯函数式的字符映射表（如 Dvorak -> QWERTY），为空即恒等。
pub fn normalize_key(c: char, layout: &FxHashMap<char, char>) -> char {
    let mapped = layout.get(&c).copied().unwrap_or(c);
    mapped.to_lowercase().next().unwrap_or(mapped)
}
