use super::*;

use crate::core::host::RopeHost;
use crate::services::config::InputMode;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Recorded {
    jumps: Vec<usize>,
    done: usize,
    /// (匹配数, 搜索串长度, 活动前缀)
    decorations: Vec<(usize, usize, String)>,
}

fn recording_callbacks() -> (FlashCallbacks, Rc<RefCell<Recorded>>) {
    let rec = Rc::new(RefCell::new(Recorded::default()));
    let callbacks = FlashCallbacks {
        on_decorations: {
            let rec = rec.clone();
            Box::new(move |matches, search_len, prefix| {
                rec.borrow_mut()
                    .decorations
                    .push((matches.len(), search_len, prefix.to_string()));
            })
        },
        on_jump: {
            let rec = rec.clone();
            Box::new(move |target| rec.borrow_mut().jumps.push(target))
        },
        on_done: {
            let rec = rec.clone();
            Box::new(move || rec.borrow_mut().done += 1)
        },
    };
    (callbacks, rec)
}

fn controller(
    text: &str,
    config: FlashConfig,
) -> (FlashController<RopeHost>, Rc<RefCell<Recorded>>) {
    let (callbacks, rec) = recording_callbacks();
    (
        FlashController::new(RopeHost::new(text), config, callbacks),
        rec,
    )
}

fn type_keys(ctrl: &mut FlashController<RopeHost>, keys: &str) {
    for c in keys.chars() {
        ctrl.handle_key(&c.to_string(), false);
    }
}

#[test]
fn test_activate_rejects_reentrant() {
    let (mut ctrl, _rec) = controller("foo", FlashConfig::default());
    assert!(ctrl.activate());
    assert!(!ctrl.activate());
    ctrl.deactivate();
    assert!(ctrl.activate());
}

#[test]
fn test_auto_jump_on_single_match() {
    let (mut ctrl, rec) = controller("alpha beta gamma", FlashConfig::default());
    ctrl.activate();
    ctrl.handle_key("b", false);
    assert_eq!(rec.borrow().jumps, vec![6]);
    assert_eq!(rec.borrow().done, 1);
    assert!(!ctrl.is_active());
}

#[test]
fn test_incremental_narrowing_then_auto_jump() {
    let (mut ctrl, rec) = controller("cat cart card", FlashConfig::default());
    ctrl.activate();
    type_keys(&mut ctrl, "cart");
    assert_eq!(rec.borrow().jumps, vec![4]);
    assert_eq!(rec.borrow().done, 1);
}

#[test]
fn test_extension_beats_label_selection() {
    // f 之后 a 既是候选标签又能延长搜索；延长必须赢
    let config = FlashConfig {
        auto_jump: false,
        ..Default::default()
    };
    let (mut ctrl, rec) = controller("fa fb fc", config);
    ctrl.activate();
    type_keys(&mut ctrl, "fa");
    assert!(rec.borrow().jumps.is_empty());
    assert_eq!(ctrl.search_string(), "fa");
    assert!(ctrl.is_active());
}

#[test]
fn test_label_jump_when_extension_fails() {
    let config = FlashConfig {
        alphabet: "abc".to_string(),
        ..Default::default()
    };
    let (mut ctrl, rec) = controller("foo1 foo2 foo3", config);
    ctrl.activate();
    type_keys(&mut ctrl, "foo");
    assert_eq!(ctrl.matches().len(), 3);
    // "foob" 没有匹配，b 按标签解释
    ctrl.handle_key("b", false);
    assert_eq!(rec.borrow().jumps, vec![5]);
    assert!(!ctrl.is_active());
}

#[test]
fn test_zero_match_extension_is_committed_not_ignored() {
    let config = FlashConfig {
        alphabet: "ab".to_string(),
        ..Default::default()
    };
    let (mut ctrl, rec) = controller("qq qq qq", config);
    ctrl.activate();
    type_keys(&mut ctrl, "qz");
    assert!(ctrl.is_active());
    assert_eq!(ctrl.search_string(), "qz");
    assert!(ctrl.matches().is_empty());
    let last = rec.borrow().decorations.last().cloned().unwrap();
    assert_eq!(last, (0, 2, String::new()));
}

#[test]
fn test_prefix_flow_jumps_on_second_char() {
    let config = FlashConfig {
        alphabet: "ab".to_string(),
        ..Default::default()
    };
    // 6 个 q，2 个字母 -> 全部双字符标签 aa ab ba bb，多余匹配被丢弃
    let (mut ctrl, rec) = controller("qq qq qq", config);
    ctrl.activate();
    type_keys(&mut ctrl, "q");
    assert_eq!(ctrl.matches().len(), 4);
    assert!(ctrl.matches().iter().all(|m| m.label.chars().count() == 2));

    ctrl.handle_key("a", false);
    assert!(ctrl.is_active());
    assert_eq!(ctrl.matches().len(), 2);
    let last = rec.borrow().decorations.last().cloned().unwrap();
    assert_eq!(last.2, "a");

    ctrl.handle_key("b", false);
    // 标签 "ab" 是文档序第二个匹配（偏移 1）
    assert_eq!(rec.borrow().jumps, vec![1]);
    assert!(!ctrl.is_active());
}

#[test]
fn test_invalid_prefix_second_char_falls_through() {
    let config = FlashConfig {
        alphabet: "ab".to_string(),
        ..Default::default()
    };
    let (mut ctrl, rec) = controller("qq qq qq", config);
    ctrl.activate();
    type_keys(&mut ctrl, "qa");
    assert_eq!(rec.borrow().decorations.last().unwrap().2, "a");

    // x 不是有效第二位：回到搜索态，按搜索延长重新评估
    ctrl.handle_key("x", false);
    assert!(ctrl.is_active());
    assert!(rec.borrow().jumps.is_empty());
    assert_eq!(ctrl.search_string(), "qx");
    assert!(ctrl.matches().is_empty());
    assert_eq!(rec.borrow().decorations.last().unwrap().2, "");
}

#[test]
fn test_backspace_pops_prefix_before_search() {
    let config = FlashConfig {
        alphabet: "ab".to_string(),
        ..Default::default()
    };
    let (mut ctrl, rec) = controller("qq qq qq", config);
    ctrl.activate();
    type_keys(&mut ctrl, "qa");
    assert_eq!(ctrl.matches().len(), 2);

    // 先退前缀：搜索串不变，匹配集还原
    ctrl.handle_key("Backspace", false);
    assert_eq!(ctrl.search_string(), "q");
    assert_eq!(ctrl.matches().len(), 4);
    assert_eq!(rec.borrow().decorations.last().unwrap().2, "");

    // 再退搜索字符
    ctrl.handle_key("Backspace", false);
    assert_eq!(ctrl.search_string(), "");
    assert!(ctrl.matches().is_empty());

    // 空搜索串上的退格是无操作
    let decorations_before = rec.borrow().decorations.len();
    ctrl.handle_key("Backspace", false);
    assert_eq!(rec.borrow().decorations.len(), decorations_before);
}

#[test]
fn test_escape_deactivates_from_prefix_pending() {
    let config = FlashConfig {
        alphabet: "ab".to_string(),
        ..Default::default()
    };
    let (mut ctrl, rec) = controller("qq qq qq", config);
    ctrl.activate();
    type_keys(&mut ctrl, "qa");

    ctrl.handle_key("Escape", false);
    assert!(!ctrl.is_active());
    assert_eq!(ctrl.search_string(), "");
    assert!(ctrl.matches().is_empty());
    assert_eq!(rec.borrow().done, 1);
    assert_eq!(rec.borrow().decorations.last().cloned().unwrap(), (0, 0, String::new()));
}

#[test]
fn test_tab_deactivates() {
    let (mut ctrl, rec) = controller("foo", FlashConfig::default());
    ctrl.activate();
    ctrl.handle_key("Tab", false);
    assert!(!ctrl.is_active());
    assert_eq!(rec.borrow().done, 1);
}

#[test]
fn test_deactivate_is_idempotent() {
    let (mut ctrl, rec) = controller("foo", FlashConfig::default());
    ctrl.activate();
    ctrl.deactivate();
    ctrl.deactivate();
    assert_eq!(rec.borrow().done, 1);
}

#[test]
fn test_completion_fires_once_even_after_jump() {
    let (mut ctrl, rec) = controller("alpha beta", FlashConfig::default());
    ctrl.activate();
    ctrl.handle_key("b", false);
    ctrl.deactivate();
    assert_eq!(rec.borrow().done, 1);
}

#[test]
fn test_modifier_keys_are_ignored() {
    let (mut ctrl, rec) = controller("foo", FlashConfig::default());
    ctrl.activate();
    let decorations_before = rec.borrow().decorations.len();
    assert!(!ctrl.handle_key("Shift", true));
    assert!(!ctrl.handle_key("Control", false));
    assert_eq!(rec.borrow().decorations.len(), decorations_before);
}

#[test]
fn test_keys_rejected_when_inactive() {
    let (mut ctrl, rec) = controller("foo", FlashConfig::default());
    assert!(!ctrl.handle_key("f", false));
    assert!(rec.borrow().decorations.is_empty());
}

#[test]
fn test_shift_selects_capital_policy() {
    let (mut ctrl, rec) = controller("foo bar", FlashConfig::default());
    ctrl.activate();
    // 默认 shift 策略是匹配结束后一位
    ctrl.handle_key("B", true);
    assert_eq!(rec.borrow().jumps, vec![5]);
    assert_eq!(ctrl.host().selection(), Some((5, 5)));
}

#[test]
fn test_prefix_shift_flag_is_remembered() {
    let config = FlashConfig {
        alphabet: "ab".to_string(),
        ..Default::default()
    };
    let (mut ctrl, rec) = controller("qq qq qq", config);
    ctrl.activate();
    type_keys(&mut ctrl, "q");
    // 前缀键带 Shift，第二键不带：OR 之后仍走 shift 策略
    ctrl.handle_key("A", true);
    ctrl.handle_key("b", false);
    // 标签 ab 的匹配在偏移 1，长度 1，shift 策略落在结束后一位
    assert_eq!(rec.borrow().jumps, vec![2]);
}

#[test]
fn test_below_min_length_keys_always_extend() {
    let config = FlashConfig {
        min_search_length: 2,
        auto_jump: false,
        ..Default::default()
    };
    let (mut ctrl, rec) = controller("sa sb", config);
    ctrl.activate();
    // 阈值之下 a 不可能被当作标签
    type_keys(&mut ctrl, "sa");
    assert!(rec.borrow().jumps.is_empty());
    assert_eq!(ctrl.search_string(), "sa");
    assert_eq!(ctrl.matches().len(), 1);
}

#[test]
fn test_preview_mode_forces_match_start() {
    let config = FlashConfig {
        jump_position: JumpPosition::WordEnd,
        ..Default::default()
    };
    let (callbacks, rec) = recording_callbacks();
    let host = RopeHost::new("foobar").with_mode(ViewMode::Preview);
    let mut ctrl = FlashController::new(host, config.clone(), callbacks);
    ctrl.activate();
    ctrl.handle_key("b", false);
    assert_eq!(rec.borrow().jumps, vec![3]);

    // 源码视图下同一策略落在词尾字符
    let (mut ctrl, rec) = controller("foobar", config);
    ctrl.activate();
    ctrl.handle_key("b", false);
    assert_eq!(rec.borrow().jumps, vec![5]);
}

#[test]
fn test_jump_moves_host_cursor() {
    let (mut ctrl, _rec) = controller("alpha beta", FlashConfig::default());
    ctrl.activate();
    ctrl.handle_key("b", false);
    assert_eq!(ctrl.host().selection(), Some((6, 6)));
}

#[test]
fn test_pinyin_mode_end_to_end() {
    let config = FlashConfig {
        input_mode: InputMode::Pinyin,
        auto_jump: false,
        ..Default::default()
    };
    let (mut ctrl, rec) = controller("世界 中国 世界", config);
    ctrl.activate();
    // "vygo" -> 双码 vy(中) + go(国)
    type_keys(&mut ctrl, "vygo");
    assert!(rec.borrow().jumps.is_empty());
    let matches = ctrl.matches();
    assert_eq!(matches.len(), 1);
    assert_eq!((matches[0].index, matches[0].len), (3, 2));
}

#[test]
fn test_decorations_fire_per_state_affecting_key() {
    let config = FlashConfig {
        auto_jump: false,
        ..Default::default()
    };
    let (mut ctrl, rec) = controller("aa bb cc", config);
    ctrl.activate();
    assert_eq!(rec.borrow().decorations.len(), 1);
    ctrl.handle_key("b", false);
    assert_eq!(rec.borrow().decorations.len(), 2);
    ctrl.handle_key("b", false);
    assert_eq!(rec.borrow().decorations.len(), 3);
}
