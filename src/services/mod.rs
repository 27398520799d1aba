//! 服务层模块
//!
//! - config: 配置服务（FlashConfig, 主题）
//! - label: 标签生成器
//! - pinyin: 拼音码索引
//! - search: 匹配查找/检测与正则模式守卫
//! - reassert: 跳转后光标复位调度

pub mod config;
pub mod label;
pub mod pinyin;
pub mod reassert;
pub mod search;

pub use config::{FlashConfig, InputMode, JumpPosition};
pub use label::generate_labels;
pub use pinyin::PinyinIndex;
pub use reassert::{apply_reassert, ReassertMessage, ReassertScheduler};
pub use search::{MatchDetector, MatchFinder};
