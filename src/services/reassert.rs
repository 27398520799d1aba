//! 光标复位调度器
//!
//! 跳转后宿主自身的后处理（折叠展开、滚动动画等）可能挪动光标。
//! 固定短延时后发一条检查消息，宿主收到后做一次幂等的
//! "若光标被挪走则放回目标位置"，没有重试也没有其他副作用。

use std::sync::mpsc::Sender;
use std::time::Duration;

use tracing::trace;

use crate::core::host::HostView;

pub const DEFAULT_REASSERT_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReassertMessage {
    Check { target: usize },
}

pub struct ReassertScheduler {
    runtime: tokio::runtime::Handle,
    delay: Duration,
}

impl ReassertScheduler {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self {
            runtime,
            delay: DEFAULT_REASSERT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// 延时后发送一次检查消息。接收端关闭时静默丢弃。
    pub fn schedule(&self, target: usize, tx: Sender<ReassertMessage>) {
        let delay = self.delay;
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(ReassertMessage::Check { target });
        });
    }
}

/// 宿主侧的消息应用：光标不在目标位置才写回，不请求滚动
pub fn apply_reassert(msg: ReassertMessage, host: &mut dyn HostView) {
    let ReassertMessage::Check { target } = msg;
    if host.selection_head() != Some(target) {
        trace!(target, "cursor moved by host post-processing, re-asserting");
        host.move_cursor(target, target, false);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/reassert.rs"]
mod tests;
