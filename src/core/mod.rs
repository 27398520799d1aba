//! 核心抽象模块
//!
//! - host: 宿主能力接口（视口、光标、视图形态）
//! - key: 按键解析与规范化

pub mod host;
pub mod key;

pub use host::{HostView, RopeHost, ViewMode, VisibleSlice};
pub use key::{normalize_key, FlashKey};
