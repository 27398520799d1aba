//! 宿主能力接口
//!
//! 引擎不直接触碰任何全局编辑器状态，所有视图访问都通过构造时注入的
//! HostView 能力接口完成。偏移量一律为文档字符偏移。

use std::ops::Range;

use ropey::Rope;

/// 宿主视图形态。每次动作解析一次，不做运行时探测。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// 可编辑的源码视图：跳转移动光标/选区
    #[default]
    Source,
    /// 只读预览视图：没有可编辑的词结构，跳转退化为匹配起点定位
    Preview,
}

/// 宿主上报的可见文本切片。为了平滑滚动，宿主通常会超取
/// 比屏幕实际可见范围更宽的一段文本。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleSlice {
    /// 切片首字符在文档中的绝对字符偏移
    pub base_offset: usize,
    pub text: String,
}

impl VisibleSlice {
    pub fn end_offset(&self) -> usize {
        self.base_offset + self.text.chars().count()
    }
}

/// 宿主注入的视图能力。
///
/// 任何一项不可用（无活动编辑面、无视口）都表现为 None / 空集，
/// 引擎将其降级为"无匹配"，绝不向宿主抛错。
pub trait HostView {
    /// 覆盖渲染视口的连续文本切片（超集）
    fn visible_slice(&self) -> Option<VisibleSlice>;

    /// 精确可见的子区间列表（`[from, to)` 字符区间），用于裁掉超取部分
    fn precise_visible_ranges(&self) -> Vec<Range<usize>>;

    /// 移动宿主光标/选区
    fn move_cursor(&mut self, anchor: usize, head: usize, scroll_into_view: bool);

    /// 当前选区头位置，复位检查用
    fn selection_head(&self) -> Option<usize>;

    fn mode(&self) -> ViewMode;
}

/// 基于 Ropey 的参考宿主实现。
///
/// 既是嵌入方的起步实现，也是本库测试使用的宿主。
pub struct RopeHost {
    rope: Rope,
    viewport: Range<usize>,
    precise: Vec<Range<usize>>,
    selection: Option<(usize, usize)>,
    mode: ViewMode,
}

impl RopeHost {
    pub fn new(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let len = rope.len_chars();
        Self {
            rope,
            viewport: 0..len,
            precise: vec![0..len],
            selection: None,
            mode: ViewMode::Source,
        }
    }

    /// 设定超取视口（字符区间），精确区间同步收窄到视口内
    pub fn with_viewport(mut self, viewport: Range<usize>) -> Self {
        let len = self.rope.len_chars();
        let start = viewport.start.min(len);
        let end = viewport.end.clamp(start, len);
        self.viewport = start..end;
        self.precise = vec![start..end];
        self
    }

    pub fn with_precise_ranges(mut self, ranges: Vec<Range<usize>>) -> Self {
        self.precise = ranges;
        self
    }

    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    pub fn set_selection(&mut self, anchor: usize, head: usize) {
        self.selection = Some((anchor, head));
    }
}

impl HostView for RopeHost {
    fn visible_slice(&self) -> Option<VisibleSlice> {
        let slice = self.rope.slice(self.viewport.clone());
        Some(VisibleSlice {
            base_offset: self.viewport.start,
            text: slice.to_string(),
        })
    }

    fn precise_visible_ranges(&self) -> Vec<Range<usize>> {
        self.precise.clone()
    }

    fn move_cursor(&mut self, anchor: usize, head: usize, _scroll_into_view: bool) {
        self.selection = Some((anchor, head));
    }

    fn selection_head(&self) -> Option<usize> {
        self.selection.map(|(_, head)| head)
    }

    fn mode(&self) -> ViewMode {
        self.mode
    }
}
