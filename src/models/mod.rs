//! 数据模型层

pub mod matches;
pub mod theme;

pub use matches::{sort_and_dedup, FlashMatch, MatchOrigin};
pub use theme::FlashTheme;
