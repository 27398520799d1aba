//! 装饰主题
//!
//! 显式的主题值对象，随配置传给宿主的装饰层使用。
//! 匹配核心自身不读取其中任何字段。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashTheme {
    pub label_fg: String,
    pub label_bg: String,
    pub match_bg: String,
    /// 前缀待定时已消费标签字符的淡化色
    pub prefix_dim_fg: String,
}

impl Default for FlashTheme {
    fn default() -> Self {
        Self {
            label_fg: "#1e1e1e".to_string(),
            label_bg: "#ffb86c".to_string(),
            match_bg: "#44475a".to_string(),
            prefix_dim_fg: "#6272a4".to_string(),
        }
    }
}
