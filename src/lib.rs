//! zflash - 编辑器内跳转导航引擎库
//!
//! 模块结构：
//! - core: 宿主能力接口（HostView, ViewMode, 按键规范化）
//! - models: 数据模型（FlashMatch, FlashTheme）
//! - services: 服务层（配置、标签生成、拼音码索引、匹配查找/检测、光标复位）
//! - flash: 增量搜索状态机（FlashController, 跳转位置计算）

pub mod core;
pub mod flash;
pub mod logging;
pub mod models;
pub mod services;

pub use crate::core::host::{HostView, RopeHost, ViewMode, VisibleSlice};
pub use crate::flash::{FlashCallbacks, FlashController};
pub use crate::models::matches::{FlashMatch, MatchOrigin};
pub use crate::services::config::{FlashConfig, InputMode, JumpPosition};
