//! 标签生成器
//!
//! 纯函数：字母池 + 需求数量 + 排除集 -> 有序无冲突标签序列。
//! 两段式分配：字母池够用时全部单字符；不够时从尾部保留若干字母
//! 作为双字符标签的前缀。同一批内，单字符标签与双字符前缀互斥，
//! 排除字符既不做单字符标签也不做双字符标签的第二位。

use compact_str::CompactString;
use rustc_hash::FxHashSet;

/// 生成至多 `count` 个标签。字母池容量不足时返回更少的标签，
/// 调用方必须把未拿到标签的匹配视为本轮不可选中。
pub fn generate_labels(
    alphabet: &str,
    count: usize,
    excluded: &FxHashSet<char>,
) -> Vec<CompactString> {
    if count == 0 {
        return Vec::new();
    }

    let mut letters: Vec<char> = Vec::with_capacity(alphabet.len());
    for c in alphabet.chars() {
        if !letters.contains(&c) {
            letters.push(c);
        }
    }

    let usable: Vec<char> = letters
        .iter()
        .copied()
        .filter(|c| !excluded.contains(c))
        .collect();
    if usable.is_empty() {
        return Vec::new();
    }

    let mut labels: Vec<CompactString> = Vec::with_capacity(count.min(usable.len() * usable.len()));

    if count <= usable.len() {
        for &c in usable.iter().take(count) {
            labels.push(CompactString::from(c.to_string()));
        }
        return labels;
    }

    // 需要双字符标签：从尾部保留最少数量的前缀字母。
    // 每个前缀可与全部可用字母配对（第二位不能是排除字符）。
    let suffix_count = usable.len();
    let mut prefix_count = usable.len();
    for k in 1..=usable.len() {
        if (usable.len() - k) + k * suffix_count >= count {
            prefix_count = k;
            break;
        }
    }
    let single_count = usable.len() - prefix_count;

    for &c in usable.iter().take(single_count) {
        labels.push(CompactString::from(c.to_string()));
    }

    'pairs: for &prefix in usable.iter().skip(single_count) {
        for &suffix in usable.iter() {
            if labels.len() >= count {
                break 'pairs;
            }
            let mut label = CompactString::default();
            label.push(prefix);
            label.push(suffix);
            labels.push(label);
        }
    }

    labels
}

#[cfg(test)]
#[path = "../../tests/unit/services/label.rs"]
mod tests;
