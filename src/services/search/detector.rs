//! 视口感知的匹配检测器
//!
//! 包装 MatchFinder：把结果限制在精确可见区间内，计算继续输入
//! 冲突的排除集，并为幸存的匹配按序挂上标签。

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::core::host::{HostView, VisibleSlice};
use crate::models::FlashMatch;
use crate::services::config::FlashConfig;
use crate::services::label::generate_labels;
use crate::services::search::finder::MatchFinder;

pub struct MatchDetector {
    finder: MatchFinder,
    alphabet: Vec<char>,
    alphabet_string: String,
}

impl MatchDetector {
    pub fn new(config: &FlashConfig) -> Self {
        let alphabet = config.sanitized_alphabet();
        let alphabet_string = alphabet.iter().collect();
        Self {
            finder: MatchFinder::new(config),
            alphabet,
            alphabet_string,
        }
    }

    /// 空搜索串、无视口、无匹配都返回空集，从不报错
    pub fn find_matches(&mut self, search: &str, host: &dyn HostView) -> Vec<FlashMatch> {
        if search.is_empty() {
            return Vec::new();
        }
        let Some(slice) = host.visible_slice() else {
            return Vec::new();
        };

        let mut matches = self.finder.find(search, &slice.text, slice.base_offset);
        let ranges = host.precise_visible_ranges();
        if !ranges.is_empty() {
            // 宿主的视口是超集，按精确区间二次裁剪
            matches.retain(|m| ranges.iter().any(|r| r.start <= m.index && m.end() <= r.end));
        }
        if matches.is_empty() {
            return Vec::new();
        }

        let excluded = self.exclusion_set(search, &slice);
        trace!(count = matches.len(), excluded = excluded.len(), "labeling");
        let labels = generate_labels(&self.alphabet_string, matches.len(), &excluded);
        // 拿不到标签的匹配本轮不可选中，直接丢弃
        matches.truncate(labels.len());
        for (m, label) in matches.iter_mut().zip(labels) {
            m.label = label;
        }
        matches
    }

    /// 继续输入冲突探测：对每个字母试探 search+c 是否仍有匹配，
    /// 有则该字母保留给搜索延长，不参与标签分配。
    fn exclusion_set(&mut self, search: &str, slice: &VisibleSlice) -> FxHashSet<char> {
        let mut excluded = FxHashSet::default();
        let mut probe = String::with_capacity(search.len() + 4);
        for &c in &self.alphabet {
            probe.clear();
            probe.push_str(search);
            probe.push(c);
            if !self
                .finder
                .find(&probe, &slice.text, slice.base_offset)
                .is_empty()
            {
                excluded.insert(c);
            }
        }
        excluded
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/services/detector.rs"]
mod tests;
