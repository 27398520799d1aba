//! 搜索服务模块
//!
//! - MatchFinder: 切片内查找（字面 + 拼音双码）
//! - MatchDetector: 视口裁剪、排除集计算、标签挂载
//! - pattern: 一次性正则跳转的模式守卫

mod detector;
mod finder;
pub mod pattern;

pub use detector::MatchDetector;
pub use finder::MatchFinder;
pub use pattern::{compile_user_pattern, pattern_targets, PatternError};
