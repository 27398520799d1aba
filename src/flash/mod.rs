//! 增量搜索状态机
//!
//! 状态流转：Inactive -> Active(搜索中) -> Active(前缀待定) -> Inactive。
//! 每个按键同步完成一次"更新搜索串或前缀态 -> 调检测器 -> 通知装饰
//! 或触发跳转"的流水线，没有后台工作。任一编辑面同时只允许一个
//! 活动实例，重入激活被拒绝。

pub mod jump;

use compact_str::CompactString;
use std::sync::mpsc::Sender;
use tracing::debug;

use crate::core::host::{HostView, ViewMode};
use crate::core::key::{normalize_key, FlashKey};
use crate::models::FlashMatch;
use crate::services::config::{FlashConfig, JumpPosition};
use crate::services::reassert::{ReassertMessage, ReassertScheduler};
use crate::services::search::MatchDetector;

pub use jump::compute_jump_offset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Searching,
    /// 用户已敲下双字符标签的第一位，等待第二位
    PrefixPending { prefix: char, shift: bool },
}

/// 宿主注册的三个出口回调
pub struct FlashCallbacks {
    /// 每个改变状态的按键之后调用：(带标签匹配, 搜索串长度, 活动前缀)
    pub on_decorations: Box<dyn FnMut(&[FlashMatch], usize, &str)>,
    pub on_jump: Box<dyn FnMut(usize)>,
    /// 每个激活周期恰好一次，在状态完全拆除之后
    pub on_done: Box<dyn FnMut()>,
}

impl FlashCallbacks {
    pub fn noop() -> Self {
        Self {
            on_decorations: Box::new(|_, _, _| {}),
            on_jump: Box::new(|_| {}),
            on_done: Box::new(|| {}),
        }
    }
}

impl Default for FlashCallbacks {
    fn default() -> Self {
        Self::noop()
    }
}

pub struct FlashController<H: HostView> {
    host: H,
    config: FlashConfig,
    detector: MatchDetector,
    callbacks: FlashCallbacks,
    reassert: Option<(ReassertScheduler, Sender<ReassertMessage>)>,
    active: bool,
    deactivating: bool,
    phase: Phase,
    search: String,
    matches: Vec<FlashMatch>,
}

impl<H: HostView> FlashController<H> {
    pub fn new(host: H, mut config: FlashConfig, callbacks: FlashCallbacks) -> Self {
        config.sanitize();
        let detector = MatchDetector::new(&config);
        Self {
            host,
            config,
            detector,
            callbacks,
            reassert: None,
            active: false,
            deactivating: false,
            phase: Phase::Searching,
            search: String::new(),
            matches: Vec::new(),
        }
    }

    /// 接上跳转后光标复位调度。消息由宿主消费（apply_reassert）。
    pub fn with_reassert(
        mut self,
        scheduler: ReassertScheduler,
        tx: Sender<ReassertMessage>,
    ) -> Self {
        self.reassert = Some((scheduler, tx));
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn search_string(&self) -> &str {
        &self.search
    }

    pub fn matches(&self) -> &[FlashMatch] {
        &self.matches
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// 激活一次跳转会话。已激活时拒绝重入，返回 false。
    pub fn activate(&mut self) -> bool {
        if self.active {
            debug!("re-entrant activation rejected");
            return false;
        }
        self.active = true;
        self.phase = Phase::Searching;
        self.search.clear();
        self.matches.clear();
        self.notify();
        true
    }

    /// 拆除全部状态。幂等，且对自身副作用触发的再次调用免疫。
    pub fn deactivate(&mut self) {
        if !self.active || self.deactivating {
            return;
        }
        self.deactivating = true;
        self.active = false;
        self.phase = Phase::Searching;
        self.search.clear();
        self.matches.clear();
        (self.callbacks.on_decorations)(&[], 0, "");
        (self.callbacks.on_done)();
        self.deactivating = false;
    }

    /// 处理一次按键。返回按键是否被消费。
    pub fn handle_key(&mut self, raw: &str, shift: bool) -> bool {
        if !self.active {
            return false;
        }
        match FlashKey::parse(raw) {
            FlashKey::Escape | FlashKey::Tab => {
                self.deactivate();
                true
            }
            FlashKey::Backspace => {
                self.on_backspace();
                true
            }
            FlashKey::Ignored => false,
            FlashKey::Char(c) => {
                match self.phase {
                    Phase::Searching => self.on_search_key(c, shift),
                    Phase::PrefixPending { prefix, shift: prefix_shift } => {
                        self.on_prefix_key(prefix, prefix_shift, c, shift)
                    }
                }
                true
            }
        }
    }

    fn on_backspace(&mut self) {
        match self.phase {
            Phase::PrefixPending { .. } => {
                // 只退前缀，搜索串不动
                self.phase = Phase::Searching;
                self.matches = self.detector.find_matches(&self.search, &self.host);
                self.notify();
            }
            Phase::Searching => {
                if self.search.pop().is_some() {
                    self.matches = self.detector.find_matches(&self.search, &self.host);
                    self.notify();
                }
            }
        }
    }

    fn on_search_key(&mut self, c: char, shift: bool) {
        let can_label = self.search.chars().count() >= self.config.min_search_length
            && !self.matches.is_empty();

        // 延长优先于选标签：原始键先当搜索字符试探
        let mut extended = self.search.clone();
        extended.push(c);
        let probe = self.detector.find_matches(&extended, &self.host);

        if !can_label || !probe.is_empty() {
            self.commit_search(extended, probe, shift);
            return;
        }

        let label_char = normalize_key(c, &self.config.key_layout);
        if let Some(m) = self
            .matches
            .iter()
            .find(|m| m.label.chars().count() == 1 && m.label_first() == Some(label_char))
        {
            let m = m.clone();
            self.jump(&m, shift);
            return;
        }

        let prefixed: Vec<FlashMatch> = self
            .matches
            .iter()
            .filter(|m| m.label.chars().count() == 2 && m.label_first() == Some(label_char))
            .cloned()
            .collect();
        if !prefixed.is_empty() {
            self.phase = Phase::PrefixPending {
                prefix: label_char,
                shift,
            };
            self.matches = prefixed;
            self.notify();
            return;
        }

        // 既延长不了也不是标签：仍提交延长，让用户看到"无匹配"
        self.commit_search(extended, probe, shift);
    }

    fn on_prefix_key(&mut self, prefix: char, prefix_shift: bool, c: char, shift: bool) {
        let second = normalize_key(c, &self.config.key_layout);
        let mut label = CompactString::default();
        label.push(prefix);
        label.push(second);

        if let Some(m) = self.matches.iter().find(|m| m.label == label) {
            let m = m.clone();
            self.jump(&m, prefix_shift || shift);
            return;
        }

        // 前缀落空：还原匹配集，同一个键按普通搜索键重新评估
        self.phase = Phase::Searching;
        self.matches = self.detector.find_matches(&self.search, &self.host);
        self.on_search_key(c, shift);
    }

    fn commit_search(&mut self, extended: String, probe: Vec<FlashMatch>, shift: bool) {
        self.search = extended;
        self.matches = probe;
        if self.config.auto_jump && self.matches.len() == 1 {
            let m = self.matches[0].clone();
            self.jump(&m, shift);
            return;
        }
        self.notify();
    }

    fn jump(&mut self, m: &FlashMatch, use_shift: bool) {
        let slice = self.host.visible_slice();
        // 视图形态解析一次：预览视图没有词结构，退化为匹配起点
        let policy = match (self.host.mode(), use_shift) {
            (ViewMode::Preview, _) => JumpPosition::MatchStart,
            (ViewMode::Source, false) => self.config.jump_position,
            (ViewMode::Source, true) => self.config.jump_position_shift,
        };
        let target = compute_jump_offset(m, policy, slice.as_ref());

        self.host.move_cursor(target, target, true);
        (self.callbacks.on_jump)(target);
        if let Some((scheduler, tx)) = &self.reassert {
            scheduler.schedule(target, tx.clone());
        }
        debug!(target, label = %m.label, "flash jump");
        self.deactivate();
    }

    fn notify(&mut self) {
        let search_len = self.search.chars().count();
        let prefix = match self.phase {
            Phase::PrefixPending { prefix, .. } => prefix.to_string(),
            Phase::Searching => String::new(),
        };
        (self.callbacks.on_decorations)(&self.matches, search_len, &prefix);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flash/controller.rs"]
mod tests;
