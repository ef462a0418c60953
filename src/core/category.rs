//! 节点分类

/// 提示词生成
pub const CATEGORY_PROMPT: &str = "Wan2.2/Prompt Generation";
